use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobify::career::CareerRules;
use jobify::config::Config;
use jobify::extraction::{
    DocumentTextExtractor, ResumeParser, SectionExtractor, SkillCatalog, SkillExtractor,
};
use jobify::routes::build_router;
use jobify::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobify API v{}", env!("CARGO_PKG_VERSION"));

    let catalog = match &config.skills_catalog_path {
        Some(path) => SkillCatalog::from_path(path)?,
        None => SkillCatalog::default(),
    };
    info!("Skill catalog ready ({} terms)", catalog.len());

    let career_rules = match &config.career_rules_path {
        Some(path) => CareerRules::from_path(path)?,
        None => CareerRules::default(),
    };
    info!(
        "Career rules ready ({} categories, {} common skills)",
        career_rules.categories.len(),
        career_rules.common_skills.len()
    );

    let parser = ResumeParser::new(
        SkillExtractor::new(Arc::new(catalog)),
        SectionExtractor::new(),
        DocumentTextExtractor::default(),
    );

    let state = AppState::new(config.clone(), parser, career_rules);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
