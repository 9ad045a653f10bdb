use std::sync::Arc;

use crate::career::CareerRules;
use crate::config::Config;
use crate::extraction::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless per call; shared across requests and blocking tasks.
    pub parser: Arc<ResumeParser>,
    pub career_rules: Arc<CareerRules>,
}

impl AppState {
    pub fn new(config: Config, parser: ResumeParser, career_rules: CareerRules) -> Self {
        Self {
            config,
            parser: Arc::new(parser),
            career_rules: Arc::new(career_rules),
        }
    }
}
