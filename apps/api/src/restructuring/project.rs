//! Project restructuring: features, impact statements and technologies from a project blurb.

use serde::{Deserialize, Serialize};

use crate::restructuring::vocabulary::Vocabulary;
use crate::restructuring::{dedup_preserving_order, split_sentences};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBreakdown {
    pub key_features: Vec<String>,
    pub technologies: Vec<String>,
    pub impact: Vec<String>,
}

/// Sentences mentioning an impact verb become impact statements; the rest are features.
pub fn restructure_project_description(description: &str, vocab: &Vocabulary) -> ProjectBreakdown {
    let mut key_features = Vec::new();
    let mut technologies = Vec::new();
    let mut impact = Vec::new();

    for sentence in split_sentences(description) {
        for group in &vocab.project_technologies {
            technologies.extend(group.find_all(&sentence));
        }
        if vocab.project_impact_verbs.mentioned(&sentence) {
            impact.push(sentence);
        } else {
            key_features.push(sentence);
        }
    }

    ProjectBreakdown {
        key_features: dedup_preserving_order(key_features),
        technologies: dedup_preserving_order(technologies),
        impact: dedup_preserving_order(impact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_breakdown() {
        let vocab = Vocabulary::load(None).unwrap();
        let breakdown = restructure_project_description(
            "Realtime chat app with React, Supabase and Tailwind. \
             Reduced message latency by half. \
             Deployed on Vercel with GitHub Actions",
            &vocab,
        );
        assert_eq!(
            breakdown.key_features,
            vec![
                "Realtime chat app with React, Supabase and Tailwind",
                "Deployed on Vercel with GitHub Actions",
            ]
        );
        assert_eq!(breakdown.impact, vec!["Reduced message latency by half"]);
        assert_eq!(
            breakdown.technologies,
            vec!["React", "Supabase", "Tailwind", "Vercel", "GitHub"]
        );
    }

    #[test]
    fn test_impact_verbs_are_whole_words() {
        let vocab = Vocabulary::load(None).unwrap();
        let breakdown = restructure_project_description("A scalable design system", &vocab);
        assert_eq!(breakdown.key_features, vec!["A scalable design system"]);
        assert!(breakdown.impact.is_empty());
    }
}
