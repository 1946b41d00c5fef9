//! Restructuring vocabulary: the word lists behind every restructuring heuristic,
//! compiled once at startup into case-insensitive matchers.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::info;

use crate::data::{self, DataError};
use crate::restructuring::capitalize_first;
use crate::restructuring::skills::Proficiency;

const TABLE: &str = "restructuring";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VocabularyFile {
    experience_technologies: Vec<Vec<String>>,
    project_technologies: Vec<Vec<String>>,
    metric_patterns: Vec<String>,
    performance_terms: Vec<String>,
    achievement_verbs: Vec<String>,
    responsibility_verbs: Vec<String>,
    default_achievement_verb: String,
    default_responsibility_verb: String,
    project_impact_verbs: Vec<String>,
    technical_buckets: Vec<SkillBucket>,
    business_buckets: Vec<SkillBucket>,
    #[serde(default)]
    key_areas: Vec<KeyArea>,
    improvement: ImprovementVocabulary,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillBucket {
    pub category: String,
    pub proficiency: Proficiency,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyArea {
    pub label: String,
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementVocabulary {
    /// Opening put in front of a summary that names no leadership.
    pub summary_prefix: String,
    pub action_verbs: Vec<String>,
    pub summary_keywords: Vec<String>,
    pub common_technical_skills: Vec<String>,
}

/// Finds whole-word mentions of a term list and reports them in canonical spelling.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    /// `None` for an empty term list, which matches nothing.
    pattern: Option<Regex>,
    canonical: HashMap<String, String>,
}

impl TermMatcher {
    fn new(terms: &[String]) -> Result<Self, DataError> {
        let mut sorted: Vec<&String> = terms.iter().filter(|t| !t.trim().is_empty()).collect();
        // longest first so `GitHub` wins over `Git`
        sorted.sort_by(|a, b| b.len().cmp(&a.len()));

        let alternatives: Vec<String> = sorted.iter().map(|t| bounded(t)).collect();
        let pattern = if alternatives.is_empty() {
            None
        } else {
            Some(compile(&format!("(?i)(?:{})", alternatives.join("|")))?)
        };
        let canonical = terms
            .iter()
            .map(|t| (t.to_lowercase(), t.clone()))
            .collect();
        Ok(Self { pattern, canonical })
    }

    /// Mentions in order of appearance, canonical spelling, repeats included.
    pub fn find_all(&self, text: &str) -> Vec<String> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        pattern
            .find_iter(text)
            .map(|m| {
                self.canonical
                    .get(&m.as_str().to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| m.as_str().to_string())
            })
            .collect()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().map_or(false, |p| p.is_match(text))
    }
}

/// Word boundaries only where the term's edge is itself a word character,
/// so `C#` and `CI/CD` still match.
fn bounded(term: &str) -> String {
    let is_word = |c: Option<char>| c.map_or(false, |c| c.is_alphanumeric() || c == '_');
    let left = if is_word(term.chars().next()) { r"\b" } else { "" };
    let right = if is_word(term.chars().last()) { r"\b" } else { "" };
    format!("{left}{}{right}", regex::escape(term))
}

fn compile(pattern: &str) -> Result<Regex, DataError> {
    Regex::new(pattern).map_err(|source| DataError::Pattern {
        table: TABLE,
        source,
    })
}

/// A verb list with its canonical capitalized forms.
#[derive(Debug, Clone)]
pub struct VerbList {
    leading: Option<Regex>,
    anywhere: TermMatcher,
}

impl VerbList {
    fn new(verbs: &[String]) -> Result<Self, DataError> {
        let alternatives: Vec<String> = verbs
            .iter()
            .filter(|v| !v.trim().is_empty())
            .map(|v| regex::escape(v.trim()))
            .collect();
        let leading = if alternatives.is_empty() {
            None
        } else {
            Some(compile(&format!(r"(?i)^(?:{})\b\s*", alternatives.join("|")))?)
        };
        Ok(Self {
            leading,
            anywhere: TermMatcher::new(verbs)?,
        })
    }

    /// The verb a sentence opens with, capitalized, and the rest of the sentence.
    pub fn strip_leading<'a>(&self, sentence: &'a str) -> Option<(String, &'a str)> {
        let m = self.leading.as_ref()?.find(sentence)?;
        let verb = capitalize_first(&m.as_str().trim().to_lowercase());
        Some((verb, &sentence[m.end()..]))
    }

    pub fn starts(&self, sentence: &str) -> bool {
        self.leading.as_ref().map_or(false, |p| p.is_match(sentence))
    }

    /// Whole-word mention anywhere in the sentence.
    pub fn mentioned(&self, sentence: &str) -> bool {
        self.anywhere.is_match(sentence)
    }
}

/// Compiled vocabulary shared by all restructuring operations.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub experience_technologies: Vec<TermMatcher>,
    pub project_technologies: Vec<TermMatcher>,
    /// Numeric metric patterns plus performance terms.
    pub impact: Regex,
    pub achievement_verbs: VerbList,
    pub responsibility_verbs: VerbList,
    pub default_achievement_verb: String,
    pub default_responsibility_verb: String,
    pub project_impact_verbs: VerbList,
    pub technical_buckets: Vec<SkillBucket>,
    pub business_buckets: Vec<SkillBucket>,
    pub key_areas: Vec<KeyArea>,
    pub improvement: ImprovementVocabulary,
}

impl Vocabulary {
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let file: VocabularyFile = data::parse_table(TABLE, json)?;
        Self::compile(file)
    }

    pub fn load(path: Option<&Path>) -> Result<Self, DataError> {
        let json = data::read_table(path, data::RESTRUCTURING_JSON)?;
        let vocabulary = Self::from_json(&json)?;
        info!(
            "Restructuring vocabulary loaded: {} technical and {} business skill buckets",
            vocabulary.technical_buckets.len(),
            vocabulary.business_buckets.len()
        );
        Ok(vocabulary)
    }

    fn compile(file: VocabularyFile) -> Result<Self, DataError> {
        let invalid = |reason: &str| DataError::Invalid {
            table: TABLE,
            reason: reason.to_string(),
        };
        if file.technical_buckets.is_empty() || file.business_buckets.is_empty() {
            return Err(invalid("at least one technical and one business bucket is required"));
        }
        if file.achievement_verbs.is_empty() || file.responsibility_verbs.is_empty() {
            return Err(invalid("achievement and responsibility verb lists must not be empty"));
        }
        if file.improvement.action_verbs.is_empty() {
            return Err(invalid("improvement.actionVerbs must not be empty"));
        }

        let mut impact_parts: Vec<String> = file.metric_patterns.clone();
        impact_parts.extend(file.performance_terms.iter().map(|t| regex::escape(t)));
        if impact_parts.is_empty() {
            return Err(invalid("metricPatterns and performanceTerms must not both be empty"));
        }
        let impact = compile(&format!("(?i)(?:{})", impact_parts.join("|")))?;

        let matchers = |groups: &[Vec<String>]| -> Result<Vec<TermMatcher>, DataError> {
            groups.iter().map(|g| TermMatcher::new(g)).collect()
        };

        Ok(Self {
            experience_technologies: matchers(&file.experience_technologies)?,
            project_technologies: matchers(&file.project_technologies)?,
            impact,
            achievement_verbs: VerbList::new(&file.achievement_verbs)?,
            responsibility_verbs: VerbList::new(&file.responsibility_verbs)?,
            default_achievement_verb: file.default_achievement_verb,
            default_responsibility_verb: file.default_responsibility_verb,
            project_impact_verbs: VerbList::new(&file.project_impact_verbs)?,
            technical_buckets: file.technical_buckets,
            business_buckets: file.business_buckets,
            key_areas: file.key_areas,
            improvement: file.improvement,
        })
    }
}
