use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ExperienceEntry;

static YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:years|year|yrs|yr)\b").expect("years pattern is valid")
});

/// Years credited for an entry that states none.
const DEFAULT_YEARS_PER_ENTRY: u32 = 1;

/// Total years across entries: the stated count from `duration`, else from
/// `description`, else one year per entry.
pub fn estimate_years(entries: &[ExperienceEntry]) -> u32 {
    entries
        .iter()
        .map(|entry| {
            stated_years(&entry.duration)
                .or_else(|| stated_years(&entry.description))
                .unwrap_or(DEFAULT_YEARS_PER_ENTRY)
        })
        .fold(0u32, u32::saturating_add)
}

fn stated_years(text: &str) -> Option<u32> {
    YEARS_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}
