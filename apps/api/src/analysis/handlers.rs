use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::market::{market_insights, MarketInsights};
use crate::analysis::suggestions::{ResumeAnalyzer, Suggestion};
use crate::errors::AppError;
use crate::models::{MatchResult, ResumeProfile};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub profile: ResumeProfile,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
pub struct MarketInsightsRequest {
    pub profile: ResumeProfile,
    pub matches: Vec<MatchResult>,
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze_resume(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let suggestions = ResumeAnalyzer::new().analyze(&request.profile);
    Ok(Json(AnalyzeResponse { suggestions }))
}

/// POST /api/v1/market/insights
pub async fn handle_market_insights(
    Json(request): Json<MarketInsightsRequest>,
) -> Result<Json<MarketInsights>, AppError> {
    Ok(Json(market_insights(&request.matches, &request.profile)))
}
