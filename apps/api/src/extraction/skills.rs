//! Skill extraction — maps free text onto a categorized catalog of known terms.
//!
//! Matching is word-bounded and leftmost-longest: "java" never fires inside
//! "javascript", and "sql server" claims its span before "sql" can. Runs of
//! whitespace count as a single space, so phrases survive line wraps.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::models::SkillSet;

const DEFAULT_CATALOG: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &[
            "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "Ruby", "PHP", "Swift",
            "Kotlin", "Go", "Rust", "SQL", "HTML", "CSS",
        ],
    ),
    (
        "frameworks",
        &[
            "React", "Angular", "Vue", "Django", "Flask", "Spring", "Express", "Node.js",
            "TensorFlow", "PyTorch", "Scikit-learn",
        ],
    ),
    (
        "databases",
        &[
            "MySQL", "PostgreSQL", "MongoDB", "SQLite", "Oracle", "SQL Server", "Redis",
            "Cassandra", "DynamoDB",
        ],
    ),
    (
        "tools",
        &[
            "Git", "Docker", "Kubernetes", "AWS", "Azure", "Google Cloud", "Jenkins", "Jira",
            "Confluence", "Slack", "Linux", "Terraform", "CI/CD",
        ],
    ),
    (
        "soft_skills",
        &[
            "Communication", "Leadership", "Problem Solving", "Critical Thinking", "Teamwork",
            "Time Management",
        ],
    ),
    (
        "data_science",
        &["Machine Learning", "Data Analysis", "Statistics"],
    ),
];

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Lowercases and collapses every whitespace run to one space.
fn normalize(text: &str) -> String {
    WHITESPACE_RE.replace_all(&text.to_lowercase(), " ").into_owned()
}

/// Immutable lowercase term → category lookup.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    /// Load order, used to keep extraction deterministic.
    entries: Vec<(String, String)>,
    index: HashMap<String, String>,
}

impl SkillCatalog {
    /// Builds a catalog from (category, terms) pairs. Terms are lowercased; a
    /// term listed under two categories keeps the first one.
    pub fn from_categories<I, C, T, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for (category, terms) in categories {
            let category = category.into();
            for term in terms {
                let term = normalize(term.as_ref().trim());
                if term.is_empty() || index.contains_key(&term) {
                    continue;
                }
                index.insert(term.clone(), category.clone());
                entries.push((term, category.clone()));
            }
        }

        Self { entries, index }
    }

    /// Parses `{"category": ["Term", ...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_json::from_str(json).context("Skill catalog must map category → [terms]")?;
        Ok(Self::from_categories(raw))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill catalog '{}'", path.display()))?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded skill catalog from {} ({} terms)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn category_of(&self, term: &str) -> Option<&str> {
        self.index.get(term).map(String::as_str)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::from_categories(
            DEFAULT_CATALOG
                .iter()
                .map(|(category, terms)| (*category, terms.iter().copied())),
        )
    }
}

/// Characters that glue onto a term and therefore break a match ("c" in "c++").
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '_')
}

/// Byte spans of every word-bounded occurrence of `term` in `haystack`.
/// Both inputs are expected lowercase.
pub fn term_spans<'a>(haystack: &'a str, term: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
    let check_start = term.chars().next().is_some_and(is_word_char);
    let check_end = term.chars().last().is_some_and(is_word_char);

    haystack.match_indices(term).filter_map(move |(start, matched)| {
        let end = start + matched.len();
        let before_ok = !check_start
            || haystack[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !is_word_char(c));
        let after_ok = !check_end
            || haystack[end..]
                .chars()
                .next()
                .map_or(true, |c| !is_word_char(c));
        (before_ok && after_ok).then_some((start, end))
    })
}

/// True when `term` occurs word-bounded in `haystack` (both lowercase).
pub fn contains_term(haystack: &str, term: &str) -> bool {
    !term.is_empty() && term_spans(haystack, term).next().is_some()
}

/// Extracts catalog skills from text. Holds its catalog explicitly; construct
/// once and reuse across documents.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    catalog: Arc<SkillCatalog>,
}

impl SkillExtractor {
    pub fn new(catalog: Arc<SkillCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn extract(&self, text: &str) -> SkillSet {
        let mut skills = SkillSet::default();
        if text.trim().is_empty() {
            return skills;
        }

        let lowered = normalize(text);

        let mut candidates: Vec<(usize, usize, &str, &str)> = self
            .catalog
            .terms()
            .flat_map(|(term, category)| {
                term_spans(&lowered, term).map(move |(start, end)| (start, end, term, category))
            })
            .collect();

        // Leftmost first; at the same start the longer span wins.
        candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut claimed_until = 0;
        for (start, end, term, category) in candidates {
            if start < claimed_until {
                continue;
            }
            claimed_until = end;
            skills.insert(term, category);
        }

        debug!(
            "Extracted {} skills across {} categories ({} chars)",
            skills.len(),
            skills.by_category.len(),
            text.len()
        );

        skills
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new(Arc::new(SkillCatalog::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    fn extractor() -> SkillExtractor {
        SkillExtractor::default()
    }

    #[test]
    fn test_extracts_languages_and_phrases() {
        let skills = extractor().extract(
            "Experience with Python, JavaScript, and React. Proficient in data analysis and machine learning.",
        );
        for term in ["python", "javascript", "react", "data analysis", "machine learning"] {
            assert!(skills.contains(term), "missing {term}: {:?}", skills.all_skills);
        }
        assert_eq!(skills.by_category["data_science"], vec!["data analysis", "machine learning"]);
    }

    #[test]
    fn test_phrases_match_across_line_breaks_and_double_spaces() {
        let skills = extractor().extract("Built models with Machine\nLearning and data  analysis");
        assert!(skills.contains("machine learning"), "{:?}", skills.all_skills);
        assert!(skills.contains("data analysis"), "{:?}", skills.all_skills);
    }

    #[test]
    fn test_catalog_terms_are_whitespace_normalized() {
        let catalog = SkillCatalog::from_categories([("tools", vec!["Google \t Cloud"])]);
        assert_eq!(catalog.category_of("google cloud"), Some("tools"));
        let skills = SkillExtractor::new(Arc::new(catalog)).extract("Deployed on Google\r\nCloud");
        assert_eq!(skills.all_skills, vec!["google cloud"]);
    }

    #[test]
    fn test_java_does_not_match_inside_javascript() {
        let skills = extractor().extract("Senior JavaScript developer");
        assert!(skills.contains("javascript"));
        assert!(!skills.contains("java"));
    }

    #[test]
    fn test_c_sharp_and_cpp_are_distinct() {
        let catalog = SkillCatalog::from_categories([(
            "programming_languages",
            vec!["C", "C++", "C#"],
        )]);
        let skills = SkillExtractor::new(Arc::new(catalog)).extract("Wrote C++ and C# services.");
        assert_eq!(skills.all_skills, vec!["c++", "c#"]);
    }

    #[test]
    fn test_longer_term_claims_span() {
        let skills = extractor().extract("Administered SQL Server clusters");
        assert!(skills.contains("sql server"));
        assert!(!skills.contains("sql"));
    }

    #[test]
    fn test_detection_order_follows_text() {
        let skills = extractor().extract("Docker, then Python, then Docker again, then Git");
        assert_eq!(skills.all_skills, vec!["docker", "python", "git"]);
    }

    #[test]
    fn test_punctuated_terms_match() {
        let skills = extractor().extract("Built APIs on Node.js. Owned CI/CD.");
        assert!(skills.contains("node.js"));
        assert!(skills.contains("ci/cd"));
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(extractor().extract("   \n\t ").is_empty());
        assert!(extractor().extract("").is_empty());
    }

    #[test]
    fn test_duplicate_term_keeps_first_category() {
        let catalog = SkillCatalog::from_categories([
            ("tools", vec!["Redis"]),
            ("databases", vec!["redis"]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.category_of("redis"), Some("tools"));
    }

    #[test]
    fn test_catalog_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"languages": ["Rust", "Zig"], "tools": ["Cargo"]}}"#).unwrap();

        let catalog = SkillCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.category_of("zig"), Some("languages"));
    }

    #[test]
    fn test_catalog_rejects_wrong_shape() {
        assert!(SkillCatalog::from_json_str(r#"["python"]"#).is_err());
    }

    #[test]
    fn test_contains_term_respects_boundaries() {
        assert!(contains_term("python, sql and java", "java"));
        assert!(!contains_term("javascript only", "java"));
        assert!(!contains_term("anything", ""));
    }

    proptest! {
        #[test]
        fn prop_standalone_term_detected_once(reps in 1usize..8, filler in "[ ,.;]{1,3}") {
            let text = vec!["kubernetes"; reps].join(&filler);
            let skills = extractor().extract(&text);
            prop_assert_eq!(skills.all_skills.iter().filter(|s| *s == "kubernetes").count(), 1);
        }

        #[test]
        fn prop_text_without_terms_is_empty(text in "[qxz ]{0,64}") {
            prop_assert!(extractor().extract(&text).is_empty());
        }

        #[test]
        fn prop_every_skill_in_exactly_one_bucket(text in "(python|react|docker|sql server|go|teamwork| |,){0,20}") {
            let skills = extractor().extract(&text);
            for term in &skills.all_skills {
                let buckets = skills.by_category.values().filter(|v| v.contains(term)).count();
                prop_assert_eq!(buckets, 1);
            }
        }
    }
}
