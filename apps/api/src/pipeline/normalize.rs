//! Normalizer: derives the final `ResumeRecord` from extracted fields.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::models::{ExtractedFields, ResumeRecord};

static INDIA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bindia\b").unwrap());

static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:mca|bca|b\.?tech|m\.?tech|bba|mba|bsc|msc)").unwrap()
});

static SKILL_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[:,;]").unwrap());

static LINKEDIN_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^.*?(?:linkedin\.com/in/|linkedin\.com/|linkedin/)").unwrap()
});

static GITHUB_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*?(?:github\.com/|github/)").unwrap());

/// Keywords that mark where a runaway experience section really ends.
const EXPERIENCE_STOP_KEYWORDS: &[&str] = &[
    "education",
    "skills",
    "projects",
    "certifications",
    "summary",
];

pub fn normalize_resume(fields: ExtractedFields) -> ResumeRecord {
    ResumeRecord {
        location: fields.location.as_deref().and_then(normalize_location),
        education: fields
            .education
            .as_deref()
            .map(degree_codes)
            .unwrap_or_default(),
        skills: fields.skills.as_deref().map(tokenize_skills).unwrap_or_default(),
        experience: fields.experience.as_deref().and_then(truncate_experience),
        profile_links: profile_links(fields.linkedin.as_deref(), fields.github.as_deref()),
        name: fields.name,
        email: fields.email,
        phone: fields.phone,
        projects: fields.projects,
        certifications: fields.certifications,
    }
}

/// Drops the country token and any separators it leaves dangling.
pub fn normalize_location(raw: &str) -> Option<String> {
    let stripped = INDIA_RE.replace(raw, "");
    let cleaned = stripped.trim_matches(|c: char| c == ',' || c.is_whitespace());
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Degree codes found on any line, dot-stripped, uppercased, deduped and sorted.
pub fn degree_codes(education: &str) -> Vec<String> {
    let codes: BTreeSet<String> = education
        .lines()
        .flat_map(|line| {
            DEGREE_RE
                .find_iter(line)
                .filter(move |m| !touches_letter(line, m.start(), m.end()))
        })
        .map(|m| m.as_str().replace('.', "").to_uppercase())
        .collect();
    codes.into_iter().collect()
}

/// Letters on either side mean the code is part of a longer word. Digits and
/// punctuation are fine ("MCA2019", "BTech(CSE)").
fn touches_letter(line: &str, start: usize, end: usize) -> bool {
    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();
    [before, after]
        .into_iter()
        .flatten()
        .any(|c| c.is_ascii_alphabetic())
}

pub fn tokenize_skills(skills: &str) -> Vec<String> {
    let flat = skills.replace('\n', " ");
    SKILL_SPLIT_RE
        .split(&flat)
        .map(|token| token.trim().to_lowercase())
        .filter(|token| token.chars().count() > 1)
        .collect()
}

/// Cuts the text before the earliest stop keyword found past the first byte.
pub fn truncate_experience(experience: &str) -> Option<String> {
    let lowered = experience.to_ascii_lowercase();
    let stop = EXPERIENCE_STOP_KEYWORDS
        .iter()
        .filter_map(|keyword| lowered.find(keyword))
        .filter(|&idx| idx > 0)
        .min();

    let kept = match stop {
        Some(idx) => &experience[..idx],
        None => experience,
    };
    let kept = kept.trim();
    if kept.is_empty() {
        None
    } else {
        Some(kept.to_string())
    }
}

pub fn profile_links(linkedin: Option<&str>, github: Option<&str>) -> Option<Vec<String>> {
    let mut links = Vec::new();
    if let Some(raw) = linkedin {
        links.push(format!(
            "https://www.linkedin.com/in/{}",
            profile_handle(&LINKEDIN_PREFIX_RE, raw)
        ));
    }
    if let Some(raw) = github {
        links.push(format!(
            "https://github.com/{}",
            profile_handle(&GITHUB_PREFIX_RE, raw)
        ));
    }
    if links.is_empty() {
        None
    } else {
        Some(links)
    }
}

fn profile_handle<'a>(prefix: &Regex, raw: &'a str) -> &'a str {
    let rest = match prefix.find(raw) {
        Some(m) => &raw[m.end()..],
        None => raw,
    };
    rest.trim()
        .trim_end_matches(|c: char| matches!(c, '|' | ',' | ';' | ')' | '/'))
}
