//! Heuristic fallback scorer: a presence/absence check used when the remote backend is down.
//!
//! Starts at 100 and deducts per missing element:
//! email −10, phone −5, summary (absent or under 50 characters) −15,
//! experience −25, skills −20.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::analyzer::AnalysisResult;
use crate::analysis::scoring::SectionSignals;
use crate::extraction::ParsedDocument;
use crate::models::resume::ResumeData;

const MIN_SUMMARY_CHARS: usize = 50;
const FALLBACK_JOB_TYPE: &str = "Unclassified";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("valid email pattern")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{5,}\d").expect("valid phone pattern"));
static YEAR_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}\s*-\s*\d{4}$").expect("valid year range pattern"));

const SUMMARY_HEADINGS: &[&str] = &[
    "summary",
    "professional summary",
    "profile",
    "professional profile",
    "objective",
    "about me",
];

const FIXED_SUGGESTIONS: &[&str] = &[
    "Add quantifiable achievements to experience",
    "Include relevant keywords from job descriptions",
    "Use action verbs in descriptions",
    "Keep formatting consistent and ATS-friendly",
];

/// What the fallback scorer looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeSignals {
    pub has_email: bool,
    pub has_phone: bool,
    /// Character length of the summary, 0 when absent.
    pub summary_chars: usize,
    pub has_experience: bool,
    pub has_skills: bool,
}

impl ResumeSignals {
    pub fn from_resume(data: &ResumeData) -> Self {
        Self {
            has_email: !data.personal.email.trim().is_empty(),
            has_phone: !data.personal.phone.trim().is_empty(),
            summary_chars: data
                .summary
                .as_deref()
                .map(|s| s.chars().count())
                .unwrap_or(0),
            has_experience: !data.experience.is_empty(),
            has_skills: !data.skills.technical.is_empty() || !data.skills.business.is_empty(),
        }
    }

    /// Best-effort signals for an unstructured document.
    pub fn from_text(text: &str) -> Self {
        let sections = SectionSignals::from_text(text);
        Self {
            has_email: EMAIL_RE.is_match(text),
            has_phone: PHONE_RE.find_iter(text).any(|m| looks_like_phone(m.as_str())),
            summary_chars: summary_length(text),
            has_experience: sections.has_dedicated_experience_section,
            has_skills: sections.has_dedicated_skills_section,
        }
    }
}

fn looks_like_phone(candidate: &str) -> bool {
    let digits = candidate.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits) && !YEAR_RANGE_RE.is_match(candidate.trim())
}

/// Length of the paragraph under the first summary-like heading.
fn summary_length(text: &str) -> usize {
    let mut lines = text.lines().map(str::trim);
    let found = lines.by_ref().any(|line| {
        let heading = line.trim_end_matches(':').to_lowercase();
        SUMMARY_HEADINGS.contains(&heading.as_str())
    });
    if !found {
        return 0;
    }

    lines
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty())
        .map(|line| line.chars().count())
        .sum()
}

/// Per-dimension view derived from the overall fallback score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicBreakdown {
    pub keyword_matching: u32,
    pub semantic_matching: u32,
    pub format_compliance: u32,
    pub content_quality: u32,
    pub ats_compatibility: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicAnalysis {
    pub score: u32,
    pub breakdown: BasicBreakdown,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

pub fn perform_basic_analysis(signals: &ResumeSignals) -> BasicAnalysis {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    let checks: [(bool, &str, i32); 5] = [
        (signals.has_email, "Missing email address", 10),
        (signals.has_phone, "Missing phone number", 5),
        (
            signals.summary_chars >= MIN_SUMMARY_CHARS,
            "Professional summary too short",
            15,
        ),
        (signals.has_experience, "No work experience listed", 25),
        (signals.has_skills, "No skills section found", 20),
    ];
    for (present, issue, penalty) in checks {
        if !present {
            issues.push(issue.to_string());
            score -= penalty;
        }
    }

    let below = |offset: i32| (score - offset).max(0) as u32;
    BasicAnalysis {
        score: score.max(0) as u32,
        breakdown: BasicBreakdown {
            keyword_matching: below(20),
            semantic_matching: below(15),
            format_compliance: below(10),
            content_quality: below(25),
            ats_compatibility: below(5),
        },
        issues,
        suggestions: FIXED_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

impl BasicAnalysis {
    /// Presents the fallback outcome in the regular result shape. No keywords
    /// are matched and no job type is inferred.
    pub fn into_analysis_result(self, document: &ParsedDocument) -> AnalysisResult {
        AnalysisResult {
            job_type: FALLBACK_JOB_TYPE.to_string(),
            ats_score: self.score,
            keyword_matches: Vec::new(),
            missing_keywords: Vec::new(),
            suggestions: self.suggestions,
            strengths: Vec::new(),
            weaknesses: self.issues,
            keyword_density: BTreeMap::new(),
            word_count: document.word_count,
            character_count: document.character_count,
            job_detection_confidence: None,
        }
    }
}
