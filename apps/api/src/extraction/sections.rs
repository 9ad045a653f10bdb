//! Section extraction — best-effort structural parsing of experience,
//! education and contact details out of plain resume text.
//!
//! Lines that do not fit the entry patterns are skipped, never reported.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{ContactInfo, EducationEntry, ExperienceEntry};

/// A recognized section header, matched against a whole line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Experience,
    Education,
    Projects,
    Skills,
}

impl SectionKind {
    fn from_header(header: &str) -> Option<Self> {
        match header.to_lowercase().as_str() {
            "experience" | "work experience" | "professional experience" => {
                Some(SectionKind::Experience)
            }
            "education" => Some(SectionKind::Education),
            "projects" => Some(SectionKind::Projects),
            "skills" => Some(SectionKind::Skills),
            _ => None,
        }
    }
}

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(work experience|professional experience|experience|education|projects|skills)[ \t]*:?[ \t\r]*$",
    )
    .expect("header pattern is valid")
});

static EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[\s•*\-]*(?P<title>.+?)\s+at\s+(?P<company>.+?)\s*\((?P<dates>(?:[\d\-\x{2013} ]|present|current)+)\)",
    )
    .expect("experience pattern is valid")
});

static EDUCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?P<degree>bachelor|master|ph\.?d|associate)(?:'s|s)?\b[^,\n]*?[ \t]+in[ \t]+(?P<field>[^,\n]+?)[ \t]*,[ \t]*(?P<school>[^\n]+)",
    )
    .expect("education pattern is valid")
});

static TRAILING_DATES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\((?P<dates>[^()]*\d[^()]*)\)\s*$").expect("trailing dates pattern is valid")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.\-]?)?(?:\(\d{3}\)|\d{3})[\s.\-]?\d{3}[\s.\-]?\d{4}\b")
        .expect("phone pattern is valid")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Text between the first `kind` header and the next recognized header.
    /// Falls back to the whole text when no such header exists.
    pub fn section<'t>(&self, text: &'t str, kind: SectionKind) -> &'t str {
        let headers: Vec<_> = HEADER_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let kind = SectionKind::from_header(caps.get(1)?.as_str())?;
                Some((kind, whole.start(), whole.end()))
            })
            .collect();

        let Some(position) = headers.iter().position(|(k, _, _)| *k == kind) else {
            return text;
        };

        let body_start = headers[position].2;
        let body_end = headers
            .get(position + 1)
            .map_or(text.len(), |(_, start, _)| *start);

        &text[body_start..body_end]
    }

    /// Entries shaped `<title> at <company> (<date-range>)`, in text order.
    /// Lines following an entry, up to the next one, become its description.
    pub fn extract_experience(&self, text: &str) -> Vec<ExperienceEntry> {
        let section = self.section(text, SectionKind::Experience);
        let mut entries: Vec<ExperienceEntry> = Vec::new();
        let mut description: Vec<&str> = Vec::new();

        for line in section.lines() {
            if let Some(entry) = parse_experience_line(line) {
                if let Some(previous) = entries.last_mut() {
                    previous.description = description.join(" ");
                }
                description.clear();
                entries.push(entry);
                continue;
            }

            let trimmed = line.trim();
            if !entries.is_empty() && !trimmed.is_empty() {
                description.push(trimmed);
            }
        }

        if let Some(last) = entries.last_mut() {
            last.description = description.join(" ");
        }

        debug!("Extracted {} experience entries", entries.len());
        entries
    }

    /// Entries shaped `<Degree> [...] in <field>, <school>`, in text order.
    pub fn extract_education(&self, text: &str) -> Vec<EducationEntry> {
        let section = self.section(text, SectionKind::Education);

        let entries: Vec<EducationEntry> = EDUCATION_RE
            .captures_iter(section)
            .map(|caps| {
                let (school, dates) = split_trailing_dates(caps["school"].trim());
                EducationEntry {
                    degree: caps["degree"].trim().to_string(),
                    field: caps["field"].trim().to_string(),
                    school,
                    dates,
                }
            })
            .filter(|entry| !entry.field.is_empty() && !entry.school.is_empty())
            .collect();

        debug!("Extracted {} education entries", entries.len());
        entries
    }

    /// First email address and phone number anywhere in the text.
    pub fn extract_contact(&self, text: &str) -> ContactInfo {
        ContactInfo {
            email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
            phone: PHONE_RE.find(text).map(|m| m.as_str().trim().to_string()),
        }
    }
}

fn parse_experience_line(line: &str) -> Option<ExperienceEntry> {
    let caps = EXPERIENCE_RE.captures(line)?;
    let dates = caps["dates"].trim();
    if !dates.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let title = caps["title"].trim();
    let company = caps["company"].trim();
    if title.is_empty() || company.is_empty() {
        return None;
    }

    Some(ExperienceEntry {
        title: title.to_string(),
        company: company.to_string(),
        dates: dates.to_string(),
        ..Default::default()
    })
}

fn split_trailing_dates(school: &str) -> (String, String) {
    match TRAILING_DATES_RE.captures(school) {
        Some(caps) => {
            let whole = caps.get(0).map_or(school.len(), |m| m.start());
            (
                school[..whole].trim().to_string(),
                caps["dates"].trim().to_string(),
            )
        }
        None => (school.to_string(), String::new()),
    }
}
