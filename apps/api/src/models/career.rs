use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A named cluster of postings with its skill vocabulary and role ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub name: String,
    pub skills: BTreeSet<String>,
    /// Progression order, junior first. Never empty.
    pub roles: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub path_name: String,
    /// Jaccard similarity as a percentage (0–100).
    pub similarity_score: f64,
    pub description: String,
    pub current_role: String,
    /// `None` when the path has a single role.
    #[serde(default)]
    pub next_role: Option<String>,
    pub missing_skills: Vec<String>,
    pub career_progression: Vec<String>,
}
