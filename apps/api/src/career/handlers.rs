use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::career::CareerPathRecommender;
use crate::errors::AppError;
use crate::models::{CareerPath, CareerRecommendation, JobPosting, ResumeProfile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CareerPathRequest {
    pub profile: ResumeProfile,
    pub postings: Vec<JobPosting>,
}

#[derive(Debug, Serialize)]
pub struct CareerPathResponse {
    pub paths: Vec<CareerPath>,
    pub recommendations: Vec<CareerRecommendation>,
}

/// POST /api/v1/career-paths
///
/// Clusters the postings with the configured rule table and scores the
/// profile against the resulting paths.
pub async fn handle_career_paths(
    State(state): State<AppState>,
    Json(request): Json<CareerPathRequest>,
) -> Result<Json<CareerPathResponse>, AppError> {
    if request.postings.is_empty() {
        return Err(AppError::Validation("postings cannot be empty".to_string()));
    }

    let recommender = CareerPathRecommender::new(&request.postings, &state.career_rules);
    let recommendations = recommender.recommend(&request.profile);

    Ok(Json(CareerPathResponse {
        paths: recommender.paths().to_vec(),
        recommendations,
    }))
}
