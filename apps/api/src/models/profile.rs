use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Detected skills, grouped by catalog category and flattened.
///
/// Both views keep detection order and never hold a term twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(default)]
    pub by_category: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub all_skills: Vec<String>,
}

impl SkillSet {
    /// Records `term` under `category`. Returns false when it was already present.
    pub fn insert(&mut self, term: &str, category: &str) -> bool {
        if self.contains(term) {
            return false;
        }
        self.by_category
            .entry(category.to_string())
            .or_default()
            .push(term.to_string());
        self.all_skills.push(term.to_string());
        true
    }

    pub fn contains(&self, term: &str) -> bool {
        self.all_skills.iter().any(|s| s == term)
    }

    pub fn is_empty(&self) -> bool {
        self.all_skills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.all_skills.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    /// Date range as written, e.g. "2018-2020".
    #[serde(default)]
    pub dates: String,
    /// Free-form tenure such as "3 years".
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub school: String,
    #[serde(default)]
    pub dates: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }
}

/// Structured profile produced from one resume document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub contact: ContactInfo,
}

impl ResumeProfile {
    /// Lowercased flat skill terms.
    pub fn skill_terms(&self) -> impl Iterator<Item = String> + '_ {
        self.skills.all_skills.iter().map(|s| s.to_lowercase())
    }
}
