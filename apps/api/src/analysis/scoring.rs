//! ATS Score Calculator.
//!
//! | component  | points | rule                                             |
//! |------------|--------|--------------------------------------------------|
//! | keywords   | 0–40   | 40 × matched / total profile keywords            |
//! | length     | 5–20   | banded on word count                             |
//! | skills     | 15     | a skills-section phrase appears                  |
//! | experience | 15     | an experience-section phrase appears             |
//! | education  | 10     | an education phrase appears                      |

use serde::Serialize;

use crate::analysis::density::KeywordAnalysis;

const KEYWORD_POINTS: f64 = 40.0;
const SKILLS_POINTS: f64 = 15.0;
const EXPERIENCE_POINTS: f64 = 15.0;
const EDUCATION_POINTS: f64 = 10.0;

const SKILLS_PHRASES: &[&str] = &["skills", "technical skills", "core competencies", "expertise"];
const EXPERIENCE_PHRASES: &[&str] = &["experience", "work history", "employment", "career"];
const EDUCATION_PHRASES: &[&str] = &["education", "degree", "university", "college", "certification"];

// Narrower sets used by the feedback rules.
const DEDICATED_SKILLS_PHRASES: &[&str] = &["skills", "technical skills", "core competencies"];
const DEDICATED_EXPERIENCE_PHRASES: &[&str] = &["experience", "work history", "employment"];

/// Presence flags derived from a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSignals {
    pub has_skills_section: bool,
    pub has_experience_section: bool,
    pub has_education_section: bool,
    pub has_dedicated_skills_section: bool,
    pub has_dedicated_experience_section: bool,
    pub has_digits: bool,
}

impl SectionSignals {
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        let any = |phrases: &[&str]| phrases.iter().any(|p| lower.contains(p));
        Self {
            has_skills_section: any(SKILLS_PHRASES),
            has_experience_section: any(EXPERIENCE_PHRASES),
            has_education_section: any(EDUCATION_PHRASES),
            has_dedicated_skills_section: any(DEDICATED_SKILLS_PHRASES),
            has_dedicated_experience_section: any(DEDICATED_EXPERIENCE_PHRASES),
            has_digits: text.chars().any(|c| c.is_ascii_digit()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub keyword: f64,
    pub length: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl ScoreBreakdown {
    /// Rounded sum, clamped to 0–100.
    pub fn total(&self) -> u32 {
        let sum = self.keyword + self.length + self.skills + self.experience + self.education;
        sum.round().clamp(0.0, 100.0) as u32
    }
}

pub fn length_points(word_count: usize) -> f64 {
    match word_count {
        400..=800 => 20.0,
        300..=1000 => 15.0,
        200..=1200 => 10.0,
        _ => 5.0,
    }
}

pub fn score_breakdown(
    word_count: usize,
    keywords: &KeywordAnalysis,
    signals: &SectionSignals,
) -> ScoreBreakdown {
    let points = |present: bool, value: f64| if present { value } else { 0.0 };
    ScoreBreakdown {
        keyword: (KEYWORD_POINTS * keywords.coverage()).min(KEYWORD_POINTS),
        length: length_points(word_count),
        skills: points(signals.has_skills_section, SKILLS_POINTS),
        experience: points(signals.has_experience_section, EXPERIENCE_POINTS),
        education: points(signals.has_education_section, EDUCATION_POINTS),
    }
}

pub fn calculate_ats_score(
    word_count: usize,
    keywords: &KeywordAnalysis,
    signals: &SectionSignals,
) -> u32 {
    score_breakdown(word_count, keywords, signals).total()
}
