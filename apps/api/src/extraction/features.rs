//! Feature Extractor — turns raw resume text into a fixed-schema `FeatureRecord`.
//!
//! Pure and infallible: text with no recognizable signal yields
//! `FeatureRecord::default()`. All matching is case-insensitive.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::features::FeatureRecord;

/// Each keyword contributes at most 1 to Workshops/Certifications.
const ACHIEVEMENT_KEYWORDS: &[&str] = &["competition", "symposium", "hackathon", "award"];

const EXTRACURRICULAR_KEYWORDS: &[&str] = &[
    "volunteer",
    "sports",
    "club",
    "football",
    "public relations",
    "nso",
];

const NO_PLACEMENT_TRAINING: &str = "no placement training";

fn cgpa_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)CGPA[:\s]*([0-9]*\.?[0-9]+)").unwrap())
}

fn marks_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:Class\s*1[02]|S\.?S\.?C\.?|H\.?S\.?C\.?)[^0-9]*([0-9]{2,3})%?").unwrap()
    })
}

/// Extracts a `FeatureRecord` from raw resume text.
pub fn parse_resume(text: &str) -> FeatureRecord {
    let lower = text.to_lowercase();
    let mut record = FeatureRecord::default();

    if let Some(cgpa) = extract_cgpa(text) {
        record.cgpa = cgpa;
    }

    // Positional: first school mark is taken as HSC, second as SSC,
    // regardless of which label produced the match.
    let marks = extract_school_marks(text);
    if let [hsc, ssc, ..] = marks.as_slice() {
        record.hsc_marks = *hsc;
        record.ssc_marks = *ssc;
    }

    record.internships = count_occurrences(&lower, "internship");
    record.projects = count_occurrences(&lower, "project");
    record.workshops_certifications =
        count_occurrences(&lower, "certificate") + count_present(&lower, ACHIEVEMENT_KEYWORDS);
    record.extracurricular_activities = count_present(&lower, EXTRACURRICULAR_KEYWORDS) > 0;

    if lower.contains(NO_PLACEMENT_TRAINING) {
        record.placement_training = false;
    }

    record
}

fn extract_cgpa(text: &str) -> Option<f64> {
    cgpa_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// School-leaving marks in document order.
fn extract_school_marks(text: &str) -> Vec<u32> {
    marks_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .collect()
}

/// Non-overlapping occurrences of `needle` in already lower-cased `haystack`.
fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    haystack.matches(needle).count() as u32
}

/// Number of distinct keywords present at least once.
fn count_present(haystack: &str, keywords: &[&str]) -> u32 {
    keywords.iter().filter(|k| haystack.contains(*k)).count() as u32
}
