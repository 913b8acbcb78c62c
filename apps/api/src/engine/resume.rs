//! Resume quality heuristic.
//!
//! Combines a size tier, a keyword content scan and a category bonus into a
//! score clamped to `[60, 95]`. The engine receives bytes that were already
//! read by the caller; it performs no file I/O of its own.
//!
//! Sub-scores share a 0–100 scale:
//! - size: tiered by byte length, 60 (tiny) up to 95 (100–200 KB)
//! - content: 50 baseline plus up to 50 keyword points
//! - bonus: 100 when the category signal is present, else 0
//!
//! `final = round(size*0.25 + content*0.65 + bonus*0.10)` then clamped.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::engine::clamp;
use crate::models::candidate::UserCategory;

pub const MIN_RESUME_SCORE: u32 = 60;
pub const MAX_RESUME_SCORE: u32 = 95;
/// Returned when text cannot be extracted from the document.
pub const EXTRACTION_FAILURE_SCORE: u32 = 75;

const SIZE_WEIGHT: f64 = 0.25;
const CONTENT_WEIGHT: f64 = 0.65;
const BONUS_WEIGHT: f64 = 0.10;

const CONTENT_BASELINE: f64 = 50.0;
const CONTENT_RANGE: f64 = 50.0;

const KB: usize = 1024;

const CONTENT_KEYWORDS: &[(&str, u32)] = &[
    ("experience", 15),
    ("skills", 15),
    ("education", 15),
    ("project", 10),
    ("summary", 5),
    ("certification", 5),
    ("achievement", 5),
    // Tech terms
    ("python", 5),
    ("javascript", 5),
    ("java", 5),
    ("react", 5),
    ("node", 5),
    ("sql", 5),
    ("aws", 5),
    ("docker", 5),
    ("git", 5),
    ("typescript", 5),
    ("machine learning", 5),
    ("api", 5),
];

/// Whole-word keyword scan. Section headings also match their plural.
static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(experiences?|skills?|education|projects?|summary|certifications?|achievements?|python|javascript|java|react|node|sql|aws|docker|git|typescript|machine\s+learning|api)\b",
    )
    .expect("valid regex")
});

#[derive(Debug, Error)]
enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("PDF extractor panicked")]
    Panicked,
}

/// Score plus the sub-scores that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeAssessment {
    pub score: u32,
    pub size_score: f64,
    pub content_score: f64,
    pub category_bonus: bool,
    pub matched_keywords: Vec<String>,
    pub extraction_failed: bool,
}

impl ResumeAssessment {
    fn extraction_failure() -> Self {
        Self {
            score: EXTRACTION_FAILURE_SCORE,
            size_score: 0.0,
            content_score: 0.0,
            category_bonus: false,
            matched_keywords: Vec::new(),
            extraction_failed: true,
        }
    }
}

/// Integer resume score in `[60, 95]`. Never fails.
pub fn score_resume(bytes: &[u8], file_name: &str, category: UserCategory) -> u32 {
    assess_resume(bytes, file_name, category).score
}

pub fn assess_resume(bytes: &[u8], file_name: &str, category: UserCategory) -> ResumeAssessment {
    let text = match extract_text(bytes, file_name) {
        Ok(text) => text.to_lowercase(),
        Err(e) => {
            warn!("Resume '{file_name}' unreadable, using default score: {e}");
            return ResumeAssessment::extraction_failure();
        }
    };

    let size_score = size_score(bytes.len());

    let found = found_keywords(&text);
    let max_points: u32 = CONTENT_KEYWORDS.iter().map(|(_, w)| w).sum();
    let mut points = 0;
    let mut matched_keywords = Vec::new();
    for (keyword, weight) in CONTENT_KEYWORDS {
        if found.contains(keyword) {
            points += weight;
            matched_keywords.push(keyword.to_string());
        }
    }
    let content_score =
        CONTENT_BASELINE + CONTENT_RANGE * clamp::coverage(points as f64, max_points as usize);

    let category_bonus = match category {
        UserCategory::Student => found.contains("project") || found.contains("education"),
        UserCategory::Professional => found.contains("experience") || text.contains("employed"),
    };
    let bonus_score = if category_bonus { 100.0 } else { 0.0 };

    let raw = size_score * SIZE_WEIGHT + content_score * CONTENT_WEIGHT + bonus_score * BONUS_WEIGHT;

    ResumeAssessment {
        score: clamp::within(raw, MIN_RESUME_SCORE, MAX_RESUME_SCORE),
        size_score,
        content_score,
        category_bonus,
        matched_keywords,
        extraction_failed: false,
    }
}

/// Table keywords present in `text` as whole words.
fn found_keywords(text: &str) -> BTreeSet<&'static str> {
    KEYWORD_RE
        .find_iter(text)
        .filter_map(|m| {
            let word = m.as_str().to_lowercase();
            let word = word.split_whitespace().collect::<Vec<_>>().join(" ");
            CONTENT_KEYWORDS
                .iter()
                .map(|(k, _)| *k)
                .find(|k| *k == word || (word.ends_with('s') && *k == &word[..word.len() - 1]))
        })
        .collect()
}

fn size_score(len: usize) -> f64 {
    match len {
        n if n < 10 * KB => 60.0,
        n if n < 50 * KB => 70.0,
        n if n < 100 * KB => 85.0,
        n if n < 200 * KB => 95.0,
        n if n <= 300 * KB => 80.0,
        n if n <= 1024 * KB => 75.0,
        _ => 70.0,
    }
}

fn is_pdf(bytes: &[u8], file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".pdf") || bytes.starts_with(b"%PDF-")
}

/// PDFs go through `pdf-extract`; everything else is decoded as lossy UTF-8.
fn extract_text(bytes: &[u8], file_name: &str) -> Result<String, ExtractError> {
    if !is_pdf(bytes, file_name) {
        return Ok(String::from_utf8_lossy(bytes).into_owned());
    }
    // pdf-extract can panic on malformed streams.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::Pdf(format!("{e:?}"))),
        Err(_) => Err(ExtractError::Panicked),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(text: &str, len: usize) -> Vec<u8> {
        let mut bytes = text.as_bytes().to_vec();
        bytes.resize(len.max(bytes.len()), b' ');
        bytes
    }

    #[test]
    fn test_tiny_unrecognizable_buffer_scores_floor() {
        assert_eq!(score_resume(b"abcde", "notes.txt", UserCategory::Student), 60);
    }

    #[test]
    fn test_empty_buffer_within_bounds() {
        let score = score_resume(&[], "resume.txt", UserCategory::Professional);
        assert_eq!(score, 60);
    }

    #[test]
    fn test_unreadable_pdf_returns_safe_default() {
        let a = assess_resume(b"not a pdf at all", "resume.pdf", UserCategory::Student);
        assert!(a.extraction_failed);
        assert_eq!(a.score, EXTRACTION_FAILURE_SCORE);
    }

    #[test]
    fn test_pdf_magic_detected_without_extension() {
        let a = assess_resume(b"%PDF-1.4 truncated", "upload.bin", UserCategory::Student);
        assert!(a.extraction_failed);
    }

    #[test]
    fn test_rich_resume_hits_ceiling() {
        let text = "Summary. Experience at Acme. Skills: Python, Java, JavaScript, TypeScript, React, \
                    Node, SQL, AWS, Docker, Git, machine learning, REST API. Education: BSc. \
                    Project: chat app. Certification: AWS. Achievement: hackathon winner.";
        let bytes = padded(text, 120 * KB);
        let a = assess_resume(&bytes, "resume.txt", UserCategory::Professional);
        assert_eq!(a.content_score, 100.0);
        assert!(a.category_bonus);
        assert_eq!(a.score, MAX_RESUME_SCORE);
    }

    #[test]
    fn test_section_keywords_only() {
        // size 70, content 50 + 45/130*50, bonus 10 → 71.25
        let bytes = padded("experience skills education", 20 * KB);
        assert_eq!(score_resume(&bytes, "cv.txt", UserCategory::Student), 71);
    }

    #[test]
    fn test_keywords_inside_other_words_do_not_count() {
        let a = assess_resume(b"digital laws rapid reactive nodes", "cv.txt", UserCategory::Student);
        assert!(a.matched_keywords.is_empty());
        assert_eq!(a.content_score, 50.0);

        let a = assess_resume(b"javascript", "cv.txt", UserCategory::Student);
        assert_eq!(a.matched_keywords, vec!["javascript"]);
    }

    #[test]
    fn test_plural_headings_and_spaced_terms_match() {
        let a = assess_resume(
            b"PROJECTS\nMachine   Learning pipeline\nSkills",
            "cv.txt",
            UserCategory::Student,
        );
        assert_eq!(a.matched_keywords, vec!["skills", "project", "machine learning"]);
        assert!(a.category_bonus);
    }

    #[test]
    fn test_category_bonus_depends_on_user_category() {
        let bytes = padded("skills education project", 120 * KB);
        let student = assess_resume(&bytes, "cv.txt", UserCategory::Student);
        let professional = assess_resume(&bytes, "cv.txt", UserCategory::Professional);
        assert!(student.category_bonus);
        assert!(!professional.category_bonus);
        assert_eq!(student.score, professional.score + 10);
    }

    #[test]
    fn test_size_tiers() {
        assert_eq!(size_score(5), 60.0);
        assert_eq!(size_score(20 * KB), 70.0);
        assert_eq!(size_score(75 * KB), 85.0);
        assert_eq!(size_score(150 * KB), 95.0);
        assert_eq!(size_score(250 * KB), 80.0);
        assert_eq!(size_score(600 * KB), 75.0);
        assert_eq!(size_score(5 * 1024 * KB), 70.0);
    }

    #[test]
    fn test_score_always_clamped() {
        let inputs: Vec<(Vec<u8>, &str)> = vec![
            (vec![], "a.txt"),
            (vec![0xff; 3000], "b.docx"),
            (padded("experience", 2 * 1024 * KB), "c.txt"),
            (b"%PDF-".to_vec(), "d.pdf"),
        ];
        for (bytes, name) in inputs {
            for category in [UserCategory::Student, UserCategory::Professional] {
                let score = score_resume(&bytes, name, category);
                assert!((MIN_RESUME_SCORE..=MAX_RESUME_SCORE).contains(&score));
            }
        }
    }
}
