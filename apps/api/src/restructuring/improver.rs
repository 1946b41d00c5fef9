//! Deterministic content improvement for summary, experience descriptions and
//! technical skills. Metrics are never invented; a missing metric becomes a
//! suggestion instead.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::resume::ResumeData;
use crate::restructuring::lowercase_first;
use crate::restructuring::vocabulary::{ImprovementVocabulary, Vocabulary};

static LEADERSHIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:led|managed)\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentImprovement {
    pub section: String,
    pub original: String,
    pub improved: String,
    pub reason: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementReport {
    pub resume: ResumeData,
    pub improvements: Vec<ContentImprovement>,
    pub suggestions: Vec<String>,
}

pub fn improve_resume(data: &ResumeData, vocab: &Vocabulary) -> ImprovementReport {
    let words = &vocab.improvement;
    let mut resume = data.clone();
    let mut improvements = Vec::new();
    let mut suggestions = Vec::new();

    if let Some(summary) = data.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        let improved = improve_summary(summary, words);
        if !has_digits(summary) {
            suggestions.push("Add quantifiable achievements to your professional summary".to_string());
        }
        if improved != summary {
            improvements.push(ContentImprovement {
                section: "summary".to_string(),
                original: summary.to_string(),
                improved: improved.clone(),
                reason: "Adds a results-focused opening and positioning keywords".to_string(),
                impact: Impact::High,
            });
            resume.summary = Some(improved);
        }
    }

    let mut verbs = ActionVerbs::new(&words.action_verbs);
    for (index, exp) in resume.experience.iter_mut().enumerate() {
        let description = exp.description.trim();
        if description.is_empty() {
            continue;
        }
        if !has_digits(description) {
            suggestions.push(format!(
                "Quantify the impact of your {} role at {}",
                exp.position, exp.company
            ));
        }
        if starts_with_action_verb(description, &words.action_verbs) {
            continue;
        }
        let verb = verbs.next();
        let improved = format!("{verb} {}", lowercase_first(description));
        improvements.push(ContentImprovement {
            section: format!("experience[{index}]"),
            original: exp.description.clone(),
            improved: improved.clone(),
            reason: format!("Opens with the action verb \"{verb}\""),
            impact: Impact::Medium,
        });
        exp.description = improved;
    }

    let technical = improve_technical_skills(&resume.skills.technical, words);
    if !resume.skills.technical.is_empty() && technical != resume.skills.technical {
        improvements.push(ContentImprovement {
            section: "skills.technical".to_string(),
            original: resume.skills.technical.join(", "),
            improved: technical.join(", "),
            reason: "Adds a commonly screened skill and sorts the list".to_string(),
            impact: Impact::Medium,
        });
        resume.skills.technical = technical;
    }

    debug!(
        "Content improvement produced {} changes and {} suggestions",
        improvements.len(),
        suggestions.len()
    );

    ImprovementReport {
        resume,
        improvements,
        suggestions,
    }
}

pub fn improve_summary(summary: &str, words: &ImprovementVocabulary) -> String {
    let mut improved = summary.trim().to_string();

    let prefix = words.summary_prefix.trim();
    let already_prefixed = improved
        .get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix));
    if !prefix.is_empty() && !already_prefixed && !LEADERSHIP_RE.is_match(&improved) {
        improved = format!("{prefix} {}", lowercase_first(&improved));
    }

    let lower = improved.to_lowercase();
    let has_keyword = words
        .summary_keywords
        .iter()
        .any(|k| lower.contains(&k.to_lowercase()));
    if !has_keyword {
        if let Some(keyword) = words.summary_keywords.first() {
            let body = improved.trim_end_matches(['.', '!', '?']).trim_end();
            improved = format!("{body} with {keyword} solutions.");
        }
    }

    improved
}

/// Adds the first common skill not already listed, then sorts case-insensitively.
pub fn improve_technical_skills(skills: &[String], words: &ImprovementVocabulary) -> Vec<String> {
    let lower: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
    let mut improved = skills.to_vec();

    let missing = words
        .common_technical_skills
        .iter()
        .find(|common| {
            let common = common.to_lowercase();
            !lower.iter().any(|s| s.contains(&common))
        });
    if let Some(skill) = missing {
        improved.push(skill.clone());
    }

    improved.sort_by_key(|s| s.to_lowercase());
    improved
}

/// Hands out verbs in list order, skipping ones already used in this batch.
/// Starts over once every verb has been used.
struct ActionVerbs<'a> {
    verbs: &'a [String],
    used: HashSet<&'a str>,
}

impl<'a> ActionVerbs<'a> {
    fn new(verbs: &'a [String]) -> Self {
        Self {
            verbs,
            used: HashSet::new(),
        }
    }

    fn next(&mut self) -> &'a str {
        if self.used.len() >= self.verbs.len() {
            self.used.clear();
        }
        let verb = self
            .verbs
            .iter()
            .map(String::as_str)
            .find(|v| !self.used.contains(v))
            .unwrap_or_default();
        self.used.insert(verb);
        verb
    }
}

fn starts_with_action_verb(text: &str, verbs: &[String]) -> bool {
    let first = text
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric());
    verbs.iter().any(|v| v.eq_ignore_ascii_case(first))
}

fn has_digits(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}
