use tracing::{debug, info};

use crate::errors::AppError;
use crate::matching::tfidf::{SparseVector, TfidfVectorizer};
use crate::models::{JobPosting, MatchResult, ResumeProfile};

/// Fitted state for one corpus of eligible postings.
struct MatchIndex {
    postings: Vec<JobPosting>,
    vectorizer: TfidfVectorizer,
    vectors: Vec<SparseVector>,
}

/// Ranks job postings against a resume profile by TF-IDF cosine similarity.
///
/// `index` takes `&mut self` and `match_profile` takes `&self`, so a corpus
/// cannot be swapped out under an in-flight match. Callers matching in
/// parallel use separate instances.
#[derive(Default)]
pub struct JobMatcher {
    index: Option<MatchIndex>,
}

impl JobMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits the vector space over eligible postings, replacing any prior index.
    /// Returns the number of postings indexed. A failed call leaves the previous
    /// index untouched.
    pub fn index(&mut self, postings: Vec<JobPosting>) -> Result<usize, AppError> {
        let total = postings.len();
        let eligible: Vec<JobPosting> = postings.into_iter().filter(JobPosting::is_eligible).collect();
        if eligible.is_empty() {
            return Err(AppError::NoEligiblePostings);
        }

        let descriptions: Vec<&str> = eligible.iter().map(|p| p.description.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&descriptions);
        let vectors = descriptions.iter().map(|d| vectorizer.transform(d)).collect();

        info!(
            "Indexed {} of {} postings ({} terms)",
            eligible.len(),
            total,
            vectorizer.vocabulary_len()
        );

        let indexed = eligible.len();
        self.index = Some(MatchIndex {
            postings: eligible,
            vectorizer,
            vectors,
        });
        Ok(indexed)
    }

    /// Every indexed posting with its similarity to `profile`, best first.
    /// Equal scores keep corpus order.
    pub fn match_profile(&self, profile: &ResumeProfile) -> Result<Vec<MatchResult>, AppError> {
        let index = self.index.as_ref().ok_or(AppError::NotIndexed)?;

        let text = Self::profile_text(profile);
        if text.trim().is_empty() {
            return Err(AppError::EmptyProfileText);
        }

        let query = index.vectorizer.transform(&text);
        let mut results: Vec<MatchResult> = index
            .postings
            .iter()
            .zip(&index.vectors)
            .map(|(posting, vector)| MatchResult {
                posting: posting.clone(),
                similarity_score: query.cosine(vector),
            })
            .collect();

        results.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));

        debug!(
            "Matched profile ({} query terms) against {} postings",
            query.nnz(),
            results.len()
        );
        Ok(results)
    }

    /// Skills, then each experience's title, company and description, then each
    /// education's degree, field and school, space-joined.
    pub fn profile_text(profile: &ResumeProfile) -> String {
        let mut parts: Vec<&str> = profile.skills.all_skills.iter().map(String::as_str).collect();
        for exp in &profile.experience {
            parts.extend([exp.title.as_str(), exp.company.as_str(), exp.description.as_str()]);
        }
        for edu in &profile.education {
            parts.extend([edu.degree.as_str(), edu.field.as_str(), edu.school.as_str()]);
        }
        parts.retain(|p| !p.trim().is_empty());
        parts.join(" ")
    }

    pub fn indexed_len(&self) -> usize {
        self.index.as_ref().map_or(0, |i| i.postings.len())
    }

    pub fn vocabulary_len(&self) -> usize {
        self.index.as_ref().map_or(0, |i| i.vectorizer.vocabulary_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry, SkillSet};
    use proptest::prelude::*;

    fn profile_with_skills(skills: &[&str]) -> ResumeProfile {
        let mut set = SkillSet::default();
        for skill in skills {
            set.insert(skill, "programming_languages");
        }
        ResumeProfile {
            skills: set,
            ..Default::default()
        }
    }

    fn scenario_postings() -> Vec<JobPosting> {
        vec![
            JobPosting::new("A", "Python backend role, 20+ chars"),
            JobPosting::new("B", "Graphic design role, no tech, 20+ chars"),
        ]
    }

    #[test]
    fn test_relevant_posting_ranks_first() {
        let mut matcher = JobMatcher::new();
        matcher.index(scenario_postings()).unwrap();

        let results = matcher
            .match_profile(&profile_with_skills(&["Python", "React"]))
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].posting.title, "A");
        assert!(results[0].similarity_score > results[1].similarity_score);
    }

    #[test]
    fn test_match_before_index_fails() {
        let err = JobMatcher::new()
            .match_profile(&profile_with_skills(&["python"]))
            .unwrap_err();
        assert!(matches!(err, AppError::NotIndexed));
    }

    #[test]
    fn test_short_descriptions_are_not_indexed() {
        let mut matcher = JobMatcher::new();
        let err = matcher
            .index(vec![JobPosting::new("A", "too short"), JobPosting::new("B", "")])
            .unwrap_err();
        assert!(matches!(err, AppError::NoEligiblePostings));
        assert_eq!(matcher.indexed_len(), 0);
    }

    #[test]
    fn test_empty_corpus_fails() {
        let err = JobMatcher::new().index(Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::NoEligiblePostings));
    }

    #[test]
    fn test_empty_profile_fails() {
        let mut matcher = JobMatcher::new();
        matcher.index(scenario_postings()).unwrap();
        let err = matcher.match_profile(&ResumeProfile::default()).unwrap_err();
        assert!(matches!(err, AppError::EmptyProfileText));
    }

    #[test]
    fn test_reindex_replaces_corpus() {
        let mut matcher = JobMatcher::new();
        matcher.index(scenario_postings()).unwrap();
        matcher
            .index(vec![JobPosting::new("C", "Rust systems programming with tokio")])
            .unwrap();

        let results = matcher.match_profile(&profile_with_skills(&["rust"])).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].posting.title, "C");
    }

    #[test]
    fn test_failed_reindex_keeps_previous_corpus() {
        let mut matcher = JobMatcher::new();
        matcher.index(scenario_postings()).unwrap();
        assert!(matcher.index(vec![JobPosting::new("X", "short")]).is_err());
        assert_eq!(matcher.indexed_len(), 2);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let mut matcher = JobMatcher::new();
        matcher
            .index(vec![
                JobPosting::new("first", "Warehouse logistics coordinator role"),
                JobPosting::new("second", "Retail store associate weekend shifts"),
                JobPosting::new("third", "Python data engineering position"),
            ])
            .unwrap();

        let titles: Vec<_> = matcher
            .match_profile(&profile_with_skills(&["python"]))
            .unwrap()
            .into_iter()
            .map(|r| r.posting.title)
            .collect();
        assert_eq!(titles, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_out_of_vocabulary_profile_scores_zero() {
        let mut matcher = JobMatcher::new();
        matcher.index(scenario_postings()).unwrap();
        let results = matcher.match_profile(&profile_with_skills(&["haskell"])).unwrap();
        assert!(results.iter().all(|r| r.similarity_score == 0.0));
        assert_eq!(matcher.vocabulary_len(), 8);
    }

    #[test]
    fn test_profile_text_order() {
        let mut profile = profile_with_skills(&["python"]);
        profile.experience.push(ExperienceEntry {
            title: "Engineer".into(),
            company: "Acme".into(),
            description: "Built APIs".into(),
            ..Default::default()
        });
        profile.education.push(EducationEntry {
            degree: "Bachelor".into(),
            field: "Physics".into(),
            school: "State U".into(),
            dates: String::new(),
        });
        assert_eq!(
            JobMatcher::profile_text(&profile),
            "python Engineer Acme Built APIs Bachelor Physics State U"
        );
    }

    proptest! {
        #[test]
        fn prop_results_cover_corpus_sorted_and_bounded(
            descriptions in prop::collection::vec("[a-z]{3,8}( [a-z]{3,8}){3,8}", 1..8),
            skills in prop::collection::vec("[a-z]{3,8}", 1..5),
        ) {
            let postings: Vec<JobPosting> = descriptions
                .iter()
                .enumerate()
                .map(|(i, d)| JobPosting::new(format!("job-{i}"), d.clone()))
                .collect();
            let eligible = postings.iter().filter(|p| p.is_eligible()).count();
            prop_assume!(eligible > 0);

            let mut matcher = JobMatcher::new();
            matcher.index(postings).unwrap();

            let refs: Vec<&str> = skills.iter().map(String::as_str).collect();
            let profile = profile_with_skills(&refs);
            let first = matcher.match_profile(&profile).unwrap();
            let second = matcher.match_profile(&profile).unwrap();

            prop_assert_eq!(first.len(), eligible);
            prop_assert!(first.iter().all(|r| (0.0..=1.0).contains(&r.similarity_score)));
            prop_assert!(first.windows(2).all(|w| w[0].similarity_score >= w[1].similarity_score));
            prop_assert_eq!(first, second);
        }
    }
}
