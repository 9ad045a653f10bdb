use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::JobMatcher;
use crate::models::{JobPosting, MatchResult, ResumeProfile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub profile: ResumeProfile,
    pub postings: Vec<JobPosting>,
    /// Falls back to `DEFAULT_MATCH_LIMIT`.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
    /// Postings that passed the description-length filter.
    pub indexed: usize,
}

/// POST /api/v1/jobs/match
///
/// Indexes the supplied postings into a request-scoped matcher and returns
/// the best `limit` matches for the profile.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let limit = request.limit.unwrap_or(state.config.default_match_limit);
    if limit == 0 {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }

    let mut matcher = JobMatcher::new();
    let indexed = matcher.index(request.postings)?;
    let mut matches = matcher.match_profile(&request.profile)?;
    matches.truncate(limit);

    Ok(Json(MatchResponse { matches, indexed }))
}
