//! Experience restructuring: splits a job description into achievements and responsibilities.

use serde::{Deserialize, Serialize};

use crate::restructuring::vocabulary::Vocabulary;
use crate::restructuring::{capitalize_first, dedup_preserving_order, lowercase_first, split_sentences};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceBreakdown {
    pub achievements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub key_technologies: Vec<String>,
    pub impact_metrics: Vec<String>,
}

/// Every sentence lands in exactly one of `achievements` or `responsibilities`.
/// A sentence is an achievement when it mentions an achievement verb as a whole word.
pub fn restructure_experience_description(description: &str, vocab: &Vocabulary) -> ExperienceBreakdown {
    let mut achievements = Vec::new();
    let mut responsibilities = Vec::new();
    let mut key_technologies = Vec::new();
    let mut impact_metrics = Vec::new();

    for sentence in split_sentences(description) {
        for group in &vocab.experience_technologies {
            key_technologies.extend(group.find_all(&sentence));
        }

        if vocab.impact.is_match(&sentence) {
            impact_metrics.push(sentence.clone());
        }

        if vocab.achievement_verbs.mentioned(&sentence) {
            achievements.push(format_achievement(&sentence, vocab));
        } else {
            responsibilities.push(format_responsibility(&sentence, vocab));
        }
    }

    ExperienceBreakdown {
        achievements: dedup_preserving_order(achievements),
        responsibilities: dedup_preserving_order(responsibilities),
        key_technologies: dedup_preserving_order(key_technologies),
        impact_metrics: dedup_preserving_order(impact_metrics),
    }
}

/// Leads with the sentence's own achievement verb when it opens with one,
/// otherwise with the default achievement verb.
pub fn format_achievement(sentence: &str, vocab: &Vocabulary) -> String {
    let sentence = sentence.trim();
    match vocab.achievement_verbs.strip_leading(sentence) {
        Some((verb, rest)) if rest.trim().is_empty() => verb,
        Some((verb, rest)) => format!("{verb} {}", rest.trim()),
        None => format!("{} {}", vocab.default_achievement_verb, lowercase_first(sentence)),
    }
}

pub fn format_responsibility(sentence: &str, vocab: &Vocabulary) -> String {
    let sentence = capitalize_first(sentence.trim());
    if vocab.responsibility_verbs.starts(&sentence) {
        sentence
    } else {
        format!("{} {}", vocab.default_responsibility_verb, lowercase_first(&sentence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::load(None).unwrap()
    }

    const DESCRIPTION: &str = "Built a React storefront on Next.js serving 2M users. \
        Improved page load time by 40%. \
        Worked with designers on accessibility. \
        Responsible for the CMS migration to Contentful. \
        Built a React storefront on Next.js serving 2M users.";

    #[test]
    fn test_sentences_partitioned() {
        let breakdown = restructure_experience_description(DESCRIPTION, &vocab());
        assert_eq!(
            breakdown.achievements,
            vec![
                "Built a React storefront on Next.js serving 2M users",
                "Improved page load time by 40%",
            ]
        );
        assert_eq!(
            breakdown.responsibilities,
            vec![
                "Worked with designers on accessibility",
                "Managed responsible for the CMS migration to Contentful",
            ]
        );
    }

    #[test]
    fn test_technologies_and_metrics() {
        let breakdown = restructure_experience_description(DESCRIPTION, &vocab());
        assert_eq!(
            breakdown.key_technologies,
            vec!["React", "Next.js", "Accessibility", "CMS", "Contentful"]
        );
        assert_eq!(
            breakdown.impact_metrics,
            vec![
                "Built a React storefront on Next.js serving 2M users",
                "Improved page load time by 40%",
            ]
        );
    }

    #[test]
    fn test_mid_sentence_verb_gets_default_prefix() {
        let v = vocab();
        assert_eq!(
            format_achievement("Our team delivered the billing revamp", &v),
            "Developed our team delivered the billing revamp"
        );
        assert_eq!(
            format_achievement("API layer that reduced costs", &v),
            "Developed API layer that reduced costs"
        );
        assert_eq!(format_achievement("optimized", &v), "Optimized");
    }

    #[test]
    fn test_responsibility_verb_kept() {
        let v = vocab();
        assert_eq!(format_responsibility("led the on-call rotation", &v), "Led the on-call rotation");
        assert_eq!(
            format_responsibility("Daily standups", &v),
            "Managed daily standups"
        );
    }

    #[test]
    fn test_rerun_is_stable() {
        let v = vocab();
        let first = restructure_experience_description(DESCRIPTION, &v);
        let joined = first
            .achievements
            .iter()
            .chain(first.responsibilities.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join(". ");
        let second = restructure_experience_description(&joined, &v);
        assert_eq!(
            second.achievements.len() + second.responsibilities.len(),
            first.achievements.len() + first.responsibilities.len()
        );
        assert_eq!(second.achievements, first.achievements);
        assert_eq!(second.responsibilities, first.responsibilities);
    }

    #[test]
    fn test_empty_description() {
        let breakdown = restructure_experience_description("  ", &vocab());
        assert_eq!(breakdown, ExperienceBreakdown::default());
    }
}
