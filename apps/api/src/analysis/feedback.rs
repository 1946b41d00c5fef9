//! Feedback Generator: suggestions, strengths and weaknesses for an analyzed document.

use serde::Serialize;

use crate::analysis::catalog::JobProfile;
use crate::analysis::density::KeywordAnalysis;
use crate::analysis::scoring::SectionSignals;

const TOP_MISSING_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Feedback {
    pub suggestions: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

pub fn generate_feedback(
    word_count: usize,
    keywords: &KeywordAnalysis,
    signals: &SectionSignals,
    profile: &JobProfile,
) -> Feedback {
    Feedback {
        suggestions: suggestions(word_count, keywords, signals, profile),
        strengths: strengths(word_count, keywords, signals),
        weaknesses: weaknesses(word_count, keywords, signals),
    }
}

fn suggestions(
    word_count: usize,
    keywords: &KeywordAnalysis,
    signals: &SectionSignals,
    profile: &JobProfile,
) -> Vec<String> {
    let mut out = Vec::new();

    if !keywords.missing_keywords.is_empty() {
        let top: Vec<&str> = keywords
            .missing_keywords
            .iter()
            .take(TOP_MISSING_KEYWORDS)
            .map(String::as_str)
            .collect();
        out.push(format!(
            "Add these important {} keywords: {}",
            profile.name,
            top.join(", ")
        ));
    }

    if word_count < 400 {
        out.push("Expand your resume with more detailed descriptions and achievements".to_string());
    } else if word_count > 800 {
        out.push(
            "Consider condensing your resume to focus on the most relevant information".to_string(),
        );
    }

    if !signals.has_dedicated_skills_section {
        out.push(format!(
            "Add a dedicated skills section to highlight your {} abilities",
            profile.name
        ));
    }
    if !signals.has_dedicated_experience_section {
        out.push(
            "Include a clear work experience section with job titles and responsibilities"
                .to_string(),
        );
    }
    if !signals.has_digits {
        out.push("Add quantifiable achievements and metrics to demonstrate your impact".to_string());
    }

    out
}

fn strengths(word_count: usize, keywords: &KeywordAnalysis, signals: &SectionSignals) -> Vec<String> {
    let mut out = Vec::new();
    let coverage = keywords.coverage();

    if coverage > 0.7 {
        out.push("Excellent keyword alignment with industry standards".to_string());
    } else if coverage > 0.5 {
        out.push("Good keyword coverage for the role".to_string());
    }
    if (400..=800).contains(&word_count) {
        out.push("Optimal resume length for ATS systems".to_string());
    }
    if signals.has_dedicated_skills_section {
        out.push("Clear skills section present".to_string());
    }
    if signals.has_dedicated_experience_section {
        out.push("Well-structured experience section".to_string());
    }

    out
}

fn weaknesses(word_count: usize, keywords: &KeywordAnalysis, signals: &SectionSignals) -> Vec<String> {
    let mut out = Vec::new();

    if keywords.coverage() < 0.3 {
        out.push("Low keyword alignment with industry requirements".to_string());
    }
    if word_count < 300 {
        out.push("Resume may be too brief for comprehensive evaluation".to_string());
    } else if word_count > 1000 {
        out.push("Resume may be too long for ATS systems".to_string());
    }
    if !signals.has_dedicated_skills_section {
        out.push("Missing dedicated skills section".to_string());
    }
    if !signals.has_dedicated_experience_section {
        out.push("Missing clear work experience section".to_string());
    }
    if !signals.has_digits {
        out.push("Lack of quantifiable achievements and metrics".to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn profile() -> JobProfile {
        JobProfile {
            id: "data-analyst".into(),
            name: "Data Analyst".into(),
            keywords: vec![],
            skills: vec![],
            experience_phrases: vec![],
        }
    }

    fn analysis(matched: &[&str], missing: &[&str]) -> KeywordAnalysis {
        KeywordAnalysis {
            matched_keywords: matched.iter().map(|s| s.to_string()).collect(),
            missing_keywords: missing.iter().map(|s| s.to_string()).collect(),
            density: BTreeMap::new(),
        }
    }

    #[test]
    fn test_bare_document_gets_every_warning() {
        let kw = analysis(&[], &["sql", "excel", "tableau", "power bi", "python", "reporting"]);
        let fb = generate_feedback(50, &kw, &SectionSignals::from_text("hello"), &profile());

        assert_eq!(
            fb.suggestions,
            vec![
                "Add these important Data Analyst keywords: sql, excel, tableau, power bi, python",
                "Expand your resume with more detailed descriptions and achievements",
                "Add a dedicated skills section to highlight your Data Analyst abilities",
                "Include a clear work experience section with job titles and responsibilities",
                "Add quantifiable achievements and metrics to demonstrate your impact",
            ]
        );
        assert!(fb.strengths.is_empty());
        assert_eq!(
            fb.weaknesses,
            vec![
                "Low keyword alignment with industry requirements",
                "Resume may be too brief for comprehensive evaluation",
                "Missing dedicated skills section",
                "Missing clear work experience section",
                "Lack of quantifiable achievements and metrics",
            ]
        );
    }

    #[test]
    fn test_strong_document_gets_strengths_only() {
        let kw = analysis(&["a", "b", "c", "d"], &[]);
        let signals = SectionSignals::from_text("Skills\nExperience\n2019-2023");
        let fb = generate_feedback(600, &kw, &signals, &profile());

        assert!(fb.suggestions.is_empty());
        assert!(fb.weaknesses.is_empty());
        assert_eq!(
            fb.strengths,
            vec![
                "Excellent keyword alignment with industry standards",
                "Optimal resume length for ATS systems",
                "Clear skills section present",
                "Well-structured experience section",
            ]
        );
    }

    #[test]
    fn test_good_coverage_band() {
        let kw = analysis(&["a", "b", "c"], &["d", "e"]);
        let fb = generate_feedback(900, &kw, &SectionSignals::from_text("skills experience 1"), &profile());
        assert_eq!(fb.strengths[0], "Good keyword coverage for the role");
        assert!(fb
            .suggestions
            .contains(&"Consider condensing your resume to focus on the most relevant information".to_string()));
    }

    #[test]
    fn test_long_document_weakness() {
        let kw = analysis(&["a"], &["b"]);
        let fb = generate_feedback(1500, &kw, &SectionSignals::from_text("skills experience 1"), &profile());
        assert_eq!(fb.weaknesses, vec!["Resume may be too long for ATS systems"]);
    }

    #[test]
    fn test_expertise_alone_is_not_a_dedicated_section() {
        let kw = analysis(&["a"], &[]);
        let fb = generate_feedback(500, &kw, &SectionSignals::from_text("Expertise: 5 years"), &profile());
        assert!(fb.weaknesses.contains(&"Missing dedicated skills section".to_string()));
    }
}
