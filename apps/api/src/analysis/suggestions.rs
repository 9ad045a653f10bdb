use serde::{Deserialize, Serialize};

use crate::extraction::skills::contains_term;
use crate::models::ResumeProfile;

const ACTION_VERBS: &[&str] = &[
    "achieved", "improved", "trained", "maintained", "managed", "created", "resolved",
    "volunteered", "influenced", "increased", "decreased", "researched", "formulated",
    "developed", "designed", "revamped", "eliminated", "strengthened", "accelerated",
    "enhanced", "optimized",
];

const WEAK_PHRASES: &[&str] = &[
    "responsible for", "worked on", "helped with", "assisted", "participated in",
    "duties included", "was involved in", "handled", "successfully", "effectively",
];

const MIN_ACTION_VERBS: usize = 3;
const MIN_SKILLS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub suggestion: String,
    pub examples: String,
}

impl Suggestion {
    fn new(category: &str, suggestion: &str, examples: String) -> Self {
        Self {
            category: category.to_string(),
            suggestion: suggestion.to_string(),
            examples,
        }
    }
}

/// Rule-based resume improvement hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResumeAnalyzer;

impl ResumeAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, profile: &ResumeProfile) -> Vec<Suggestion> {
        let descriptions: Vec<String> = profile
            .experience
            .iter()
            .map(|e| e.description.to_lowercase())
            .collect();

        let action_verbs = count_terms(&descriptions, ACTION_VERBS);
        let weak_phrases = count_terms(&descriptions, WEAK_PHRASES);

        let mut suggestions = Vec::new();

        if !profile.experience.is_empty() && action_verbs < MIN_ACTION_VERBS {
            suggestions.push(Suggestion::new(
                "Action Verbs",
                "Use more action verbs in your experience descriptions to showcase your achievements.",
                ACTION_VERBS[..5].join(", "),
            ));
        }

        if weak_phrases > 0 {
            suggestions.push(Suggestion::new(
                "Weak Words",
                "Avoid weak or passive phrases in your experience descriptions.",
                format!(
                    "Replace phrases like '{}' with stronger action verbs.",
                    WEAK_PHRASES[..3].join("', '")
                ),
            ));
        }

        if profile.skills.len() < MIN_SKILLS {
            suggestions.push(Suggestion::new(
                "Skills",
                "Consider adding more relevant skills to your resume.",
                "Technical skills, soft skills, and domain-specific knowledge.".to_string(),
            ));
        }

        if profile.education.is_empty() {
            suggestions.push(Suggestion::new(
                "Education",
                "Add your educational background to your resume.",
                "Include degrees, certifications, and relevant coursework.".to_string(),
            ));
        }

        if profile.contact.is_empty() {
            suggestions.push(Suggestion::new(
                "Contact Information",
                "Make sure your contact information is included and up to date.",
                "Email, phone number, LinkedIn profile, and location.".to_string(),
            ));
        }

        suggestions
    }
}

/// Number of (description, term) pairs where the term occurs.
fn count_terms(descriptions: &[String], terms: &[&str]) -> usize {
    descriptions
        .iter()
        .map(|d| terms.iter().filter(|t| contains_term(d, t)).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactInfo, EducationEntry, ExperienceEntry, SkillSet};

    fn complete_profile() -> ResumeProfile {
        let mut skills = SkillSet::default();
        for s in ["python", "rust", "sql", "docker", "git"] {
            skills.insert(s, "any");
        }
        ResumeProfile {
            skills,
            experience: vec![ExperienceEntry {
                title: "Engineer".into(),
                company: "Acme".into(),
                description: "Designed and developed a billing service; optimized queries".into(),
                ..Default::default()
            }],
            education: vec![EducationEntry {
                degree: "Bachelor".into(),
                field: "Physics".into(),
                school: "State U".into(),
                dates: String::new(),
            }],
            contact: ContactInfo {
                email: Some("a@b.io".into()),
                phone: None,
            },
        }
    }

    fn categories(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.category.as_str()).collect()
    }

    #[test]
    fn test_complete_profile_has_no_suggestions() {
        assert!(ResumeAnalyzer::new().analyze(&complete_profile()).is_empty());
    }

    #[test]
    fn test_empty_profile_flags_gaps() {
        let suggestions = ResumeAnalyzer::new().analyze(&ResumeProfile::default());
        assert_eq!(
            categories(&suggestions),
            vec!["Skills", "Education", "Contact Information"]
        );
    }

    #[test]
    fn test_weak_phrases_and_few_verbs() {
        let mut profile = complete_profile();
        profile.experience[0].description = "Responsible for reports; worked on the website".into();
        let suggestions = ResumeAnalyzer::new().analyze(&profile);
        assert_eq!(categories(&suggestions), vec!["Action Verbs", "Weak Words"]);
        assert!(suggestions[1].examples.contains("'responsible for', 'worked on', 'helped with'"));
    }

    #[test]
    fn test_verbs_match_whole_words() {
        let descriptions = vec!["mismanaged redeveloped".to_string()];
        assert_eq!(count_terms(&descriptions, ACTION_VERBS), 0);
    }
}
