//! Keyword/Density Analyzer: which profile keywords a document mentions, and how often.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::catalog::JobProfile;
use crate::analysis::keywords::tokenize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    /// Catalog order, original spelling.
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Percentage of document tokens, keyed by matched keyword.
    pub density: BTreeMap<String, f64>,
}

impl KeywordAnalysis {
    /// Fraction of profile keywords found; 0 for a profile without keywords.
    pub fn coverage(&self) -> f64 {
        let total = self.matched_keywords.len() + self.missing_keywords.len();
        if total == 0 {
            0.0
        } else {
            self.matched_keywords.len() as f64 / total as f64
        }
    }
}

/// Occurrences of the keyword's token sequence per 100 document tokens.
///
/// Both sides are normalized the same way, so `node.js` is counted as the
/// two-token sequence `node js`. Always within [0, 100].
pub fn keyword_density(text: &str, keyword: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }
    let needle = tokenize(keyword);
    if needle.is_empty() || needle.len() > tokens.len() {
        return 0.0;
    }

    let occurrences = tokens
        .windows(needle.len())
        .filter(|window| *window == needle.as_slice())
        .count();

    (occurrences as f64 / tokens.len() as f64 * 100.0).clamp(0.0, 100.0)
}

/// Splits the profile keywords into matched and missing, recording density for matches.
/// A keyword matches when its lowercased form is a substring of the lowercased text.
pub fn analyze_keywords(text: &str, profile: &JobProfile) -> KeywordAnalysis {
    let text_lower = text.to_lowercase();
    let mut analysis = KeywordAnalysis {
        matched_keywords: Vec::new(),
        missing_keywords: Vec::new(),
        density: BTreeMap::new(),
    };

    for keyword in &profile.keywords {
        let keyword_lower = keyword.to_lowercase();
        if text_lower.contains(&keyword_lower) {
            analysis
                .density
                .insert(keyword.clone(), keyword_density(text, &keyword_lower));
            analysis.matched_keywords.push(keyword.clone());
        } else {
            analysis.missing_keywords.push(keyword.clone());
        }
    }

    analysis
}
