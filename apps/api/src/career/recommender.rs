//! Career path recommendation.
//!
//! Construction clusters postings into paths in one pass over the rule table;
//! `recommend` scores a profile against the frozen paths.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::career::experience::estimate_years;
use crate::career::rules::{CareerRules, OTHER_CATEGORY};
use crate::extraction::skills::contains_term;
use crate::models::{CareerPath, CareerRecommendation, JobPosting, ResumeProfile};

/// Role assigned to a path whose postings carried no usable title.
pub const ENTRY_LEVEL_ROLE: &str = "Entry Level";

const MAX_RECOMMENDATIONS: usize = 4;
const MAX_MISSING_SKILLS: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Clustering
// ────────────────────────────────────────────────────────────────────────────

struct RoleTally {
    title: String,
    count: usize,
    first_seen: usize,
}

#[derive(Default)]
struct Bucket {
    postings: usize,
    skills: BTreeSet<String>,
    roles: Vec<RoleTally>,
}

impl Bucket {
    fn add(&mut self, posting: &JobPosting, text: &str, common_skills: &[String]) {
        self.postings += 1;

        for skill in common_skills {
            if contains_term(text, skill) {
                self.skills.insert(skill.clone());
            }
        }

        let title = posting.title.trim();
        if title.is_empty() {
            return;
        }
        match self.roles.iter_mut().find(|r| r.title == title) {
            Some(tally) => tally.count += 1,
            None => {
                let first_seen = self.roles.len();
                self.roles.push(RoleTally {
                    title: title.to_string(),
                    count: 1,
                    first_seen,
                });
            }
        }
    }

    fn into_path(mut self, name: &str, description: &str) -> CareerPath {
        self.roles.sort_by(|a, b| {
            seniority(&a.title)
                .cmp(&seniority(&b.title))
                .then(b.count.cmp(&a.count))
                .then(a.first_seen.cmp(&b.first_seen))
        });

        let mut roles: Vec<String> = self.roles.into_iter().map(|r| r.title).collect();
        if roles.is_empty() {
            roles.push(ENTRY_LEVEL_ROLE.to_string());
        }

        CareerPath {
            name: name.to_string(),
            skills: self.skills,
            roles,
            description: description.to_string(),
        }
    }
}

/// Seniority tier inferred from title words, lowest first. Untagged titles sit
/// in the middle.
fn seniority(title: &str) -> u8 {
    const TIERS: &[(u8, &[&str])] = &[
        (6, &["director", "head", "vp", "vice president", "chief", "cto", "cio"]),
        (5, &["architect", "manager"]),
        (4, &["lead", "principal", "staff"]),
        (3, &["senior", "sr"]),
        (1, &["junior", "jr", "associate", "entry"]),
        (0, &["intern", "internship", "trainee"]),
    ];

    let lowered = title.to_lowercase();
    TIERS
        .iter()
        .find(|(_, words)| words.iter().any(|w| contains_term(&lowered, w)))
        .map_or(2, |(tier, _)| *tier)
}

// ────────────────────────────────────────────────────────────────────────────
// Recommender
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CareerPathRecommender {
    paths: Vec<CareerPath>,
}

impl CareerPathRecommender {
    /// Assigns each posting to the first category with a keyword contained in
    /// its lowercased title and description, "Other" when none has one.
    pub fn new(postings: &[JobPosting], rules: &CareerRules) -> Self {
        let mut buckets: Vec<Bucket> = rules.categories.iter().map(|_| Bucket::default()).collect();
        let mut other = Bucket::default();

        for posting in postings {
            let text = format!("{} {}", posting.title, posting.description).to_lowercase();
            let category = rules.categories.iter().position(|rule| rule.matches(&text));

            let bucket = match category {
                Some(i) => &mut buckets[i],
                None => &mut other,
            };
            bucket.add(posting, &text, &rules.common_skills);
        }

        let mut paths: Vec<CareerPath> = buckets
            .into_iter()
            .zip(&rules.categories)
            .filter(|(bucket, _)| bucket.postings > 0 && !bucket.skills.is_empty())
            .map(|(bucket, rule)| bucket.into_path(&rule.name, &rule.description))
            .collect();

        if other.postings > 0 {
            paths.push(other.into_path(OTHER_CATEGORY, &rules.other_description));
        }

        info!(
            "Clustered {} postings into {} career paths",
            postings.len(),
            paths.len()
        );
        Self { paths }
    }

    pub fn paths(&self) -> &[CareerPath] {
        &self.paths
    }

    /// Paths ranked 2 through 5 by Jaccard skill overlap. The top path is
    /// skipped on the assumption job matching already surfaced it.
    pub fn recommend(&self, profile: &ResumeProfile) -> Vec<CareerRecommendation> {
        let profile_skills: BTreeSet<String> = profile.skill_terms().collect();
        let years = estimate_years(&profile.experience);

        let mut scored: Vec<(&CareerPath, f64)> = self
            .paths
            .iter()
            .map(|path| (path, jaccard(&profile_skills, &path.skills)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let recommendations: Vec<CareerRecommendation> = scored
            .into_iter()
            .skip(1)
            .take(MAX_RECOMMENDATIONS)
            .map(|(path, score)| recommendation(path, score, years, &profile_skills))
            .collect();

        debug!(
            "Recommended {} paths ({} profile skills, {} years)",
            recommendations.len(),
            profile_skills.len(),
            years
        );
        recommendations
    }
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn recommendation(
    path: &CareerPath,
    score: f64,
    years: u32,
    profile_skills: &BTreeSet<String>,
) -> CareerRecommendation {
    let (current_role, next_role) = if path.roles.len() < 2 {
        (path.roles.first().cloned().unwrap_or_default(), None)
    } else {
        let index = ((years / 2) as usize).min(path.roles.len() - 2);
        (path.roles[index].clone(), Some(path.roles[index + 1].clone()))
    };

    CareerRecommendation {
        path_name: path.name.clone(),
        similarity_score: score * 100.0,
        description: path.description.clone(),
        current_role,
        next_role,
        missing_skills: path
            .skills
            .difference(profile_skills)
            .take(MAX_MISSING_SKILLS)
            .cloned()
            .collect(),
        career_progression: path.roles.clone(),
    }
}
