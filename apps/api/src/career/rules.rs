//! Career category rule table. Loaded as data so rules can change without
//! touching the clustering pass.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extraction::skills::contains_term;

/// Name of the catch-all bucket for postings no rule claims.
pub const OTHER_CATEGORY: &str = "Other";

const OTHER_DESCRIPTION: &str = "Roles that fall outside the configured career categories.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    /// Any keyword contained in the lowercased title + description claims the posting.
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Require keywords to stand as whole words ("ai" no longer fires inside "maintain").
    #[serde(default)]
    pub whole_words: bool,
}

impl CategoryRule {
    /// `text` is expected lowercase.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| {
            if self.whole_words {
                contains_term(text, keyword)
            } else {
                text.contains(keyword.as_str())
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRules {
    /// Evaluated in order; the first matching category wins.
    pub categories: Vec<CategoryRule>,
    /// Skill vocabulary scanned for in each category's descriptions.
    pub common_skills: Vec<String>,
    #[serde(default = "default_other_description")]
    pub other_description: String,
}

fn default_other_description() -> String {
    OTHER_DESCRIPTION.to_string()
}

impl CareerRules {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: CareerRules =
            serde_json::from_str(json).context("Career rules JSON is malformed")?;
        rules.normalized()
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read career rules '{}'", path.display()))?;
        let rules = Self::from_json_str(&json)?;
        info!(
            "Loaded {} career categories from {}",
            rules.categories.len(),
            path.display()
        );
        Ok(rules)
    }

    /// Lowercases keywords and skills, drops blanks, rejects unusable tables.
    fn normalized(mut self) -> Result<Self> {
        for rule in &mut self.categories {
            rule.name = rule.name.trim().to_string();
            ensure!(!rule.name.is_empty(), "Career category names cannot be blank");
            ensure!(
                rule.name != OTHER_CATEGORY,
                "'{OTHER_CATEGORY}' is reserved for unmatched postings"
            );
            rule.keywords = lowercase_all(&rule.keywords);
        }
        self.common_skills = lowercase_all(&self.common_skills);
        Ok(self)
    }
}

fn lowercase_all(terms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !out.contains(&term) {
            out.push(term);
        }
    }
    out
}

fn rule(name: &str, keywords: &[&str], description: &str) -> CategoryRule {
    CategoryRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        description: description.to_string(),
        whole_words: false,
    }
}

impl Default for CareerRules {
    fn default() -> Self {
        Self {
            categories: vec![
                rule(
                    "Data Science",
                    &[
                        "data scientist", "data science", "machine learning", "data analyst",
                        "data engineer", "analytics", "artificial intelligence", "nlp",
                        "deep learning",
                    ],
                    "Extracting insights and building models from data.",
                ),
                rule(
                    "DevOps",
                    &[
                        "devops", "site reliability", "sre", "cloud", "infrastructure",
                        "kubernetes", "platform engineer", "system administrator",
                    ],
                    "Operations, infrastructure and deployment.",
                ),
                rule(
                    "Security",
                    &["security", "penetration", "threat", "soc analyst"],
                    "Protecting systems, networks and data.",
                ),
                rule(
                    "Quality Assurance",
                    &["qa", "quality assurance", "test automation", "selenium", "tester"],
                    "Verifying software through manual and automated testing.",
                ),
                rule(
                    "Design",
                    &["designer", "ux", "ui/ux", "figma", "user research"],
                    "Shaping how products look, feel and behave for users.",
                ),
                rule(
                    "Product Management",
                    &["product manager", "product owner", "roadmap", "scrum master"],
                    "Guiding what gets built and why.",
                ),
                rule(
                    "Software Development",
                    &[
                        "developer", "software", "backend", "frontend", "full stack",
                        "programming", "web", "mobile",
                    ],
                    "Building software applications and systems.",
                ),
            ],
            common_skills: [
                "python", "java", "c++", "javascript", "react", "angular", "node.js", "git",
                "docker", "kubernetes", "aws", "sql", "flask", "django", "machine learning",
                "tensorflow", "pytorch", "css", "html", "linux", "ci/cd", "jenkins", "vue", "azure",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            other_description: default_other_description(),
        }
    }
}
