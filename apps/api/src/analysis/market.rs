//! Market insights — aggregates over a set of job matches relative to one profile.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::skills::contains_term;
use crate::models::{JobPosting, MatchResult, ResumeProfile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDemand {
    pub skill: String,
    pub mentions: usize,
    /// Percentage of the matches mentioning the skill.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySummary {
    pub postings_with_salary: usize,
    pub min: f64,
    pub max: f64,
    /// Mean of each posting's range midpoint.
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSpan {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsights {
    pub total_matches: usize,
    /// Percentage, 0–100.
    pub average_match_score: f64,
    /// Profile skills found in at least one description, most mentioned first.
    pub skill_demand: Vec<SkillDemand>,
    pub top_skill: Option<SkillDemand>,
    pub unmentioned_skills: Vec<String>,
    pub locations: Vec<LocationCount>,
    pub salary: Option<SalarySummary>,
    pub date_span: Option<DateSpan>,
}

pub fn market_insights(matches: &[MatchResult], profile: &ResumeProfile) -> MarketInsights {
    let total = matches.len();
    let descriptions: Vec<String> = matches
        .iter()
        .map(|m| m.posting.description.to_lowercase())
        .collect();

    let mut profile_skills: Vec<String> = Vec::new();
    for skill in profile.skill_terms() {
        if !profile_skills.contains(&skill) {
            profile_skills.push(skill);
        }
    }

    let mut skill_demand = Vec::new();
    let mut unmentioned_skills = Vec::new();
    for skill in profile_skills {
        let mentions = descriptions.iter().filter(|d| contains_term(d, &skill)).count();
        if mentions == 0 {
            unmentioned_skills.push(skill);
        } else {
            skill_demand.push(SkillDemand {
                share: percentage(mentions, total),
                skill,
                mentions,
            });
        }
    }
    skill_demand.sort_by(|a, b| b.mentions.cmp(&a.mentions).then_with(|| a.skill.cmp(&b.skill)));

    let average_match_score = if total == 0 {
        0.0
    } else {
        matches.iter().map(|m| m.similarity_score).sum::<f64>() / total as f64 * 100.0
    };

    let insights = MarketInsights {
        total_matches: total,
        average_match_score,
        top_skill: skill_demand.first().cloned(),
        skill_demand,
        unmentioned_skills,
        locations: location_counts(matches),
        salary: salary_summary(matches.iter().map(|m| &m.posting)),
        date_span: date_span(matches.iter().map(|m| m.posting.date_posted.as_str())),
    };

    debug!(
        "Market insights over {} matches: {} skills in demand, {} locations",
        total,
        insights.skill_demand.len(),
        insights.locations.len()
    );
    insights
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Non-empty locations, most frequent first, ties in first-seen order.
fn location_counts(matches: &[MatchResult]) -> Vec<LocationCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in matches {
        let location = m.posting.location.trim();
        if location.is_empty() {
            continue;
        }
        let count = counts.entry(location).or_insert(0);
        if *count == 0 {
            order.push(location);
        }
        *count += 1;
    }

    let mut locations: Vec<LocationCount> = order
        .into_iter()
        .map(|location| LocationCount {
            location: location.to_string(),
            count: counts[location],
        })
        .collect();
    locations.sort_by(|a, b| b.count.cmp(&a.count));
    locations
}

fn salary_summary<'a>(postings: impl Iterator<Item = &'a JobPosting>) -> Option<SalarySummary> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut midpoint_sum = 0.0;
    let mut count = 0;

    for posting in postings {
        let (low, high) = match (posting.salary_min, posting.salary_max) {
            (Some(a), Some(b)) => (a.min(b), a.max(b)),
            (Some(a), None) | (None, Some(a)) => (a, a),
            (None, None) => continue,
        };
        min = min.min(low);
        max = max.max(high);
        midpoint_sum += (low + high) / 2.0;
        count += 1;
    }

    (count > 0).then(|| SalarySummary {
        postings_with_salary: count,
        min,
        max,
        average: midpoint_sum / count as f64,
    })
}

/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; anything else is ignored.
fn parse_posting_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn date_span<'a>(dates: impl Iterator<Item = &'a str>) -> Option<DateSpan> {
    dates.filter_map(parse_posting_date).fold(None, |span, date| {
        Some(match span {
            None => DateSpan {
                earliest: date,
                latest: date,
            },
            Some(DateSpan { earliest, latest }) => DateSpan {
                earliest: earliest.min(date),
                latest: latest.max(date),
            },
        })
    })
}
