use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Descriptions must be longer than this (trimmed, in chars) to be vectorized.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// A job posting supplied by an external collaborator.
///
/// `title` and `description` are required; unknown keys survive in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub date_posted: String,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub job_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobPosting {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.description.trim().chars().count() > MIN_DESCRIPTION_CHARS
    }
}

/// A posting annotated with its cosine similarity to a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub similarity_score: f64,
}
