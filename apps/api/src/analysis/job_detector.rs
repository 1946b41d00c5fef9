//! Job Type Detector: scores every catalog profile against a document and picks the best.

use serde::Serialize;
use tracing::debug;

use crate::analysis::catalog::{JobCatalog, JobProfile};
use crate::errors::AppError;

const KEYWORD_WEIGHT: f64 = 2.0;
const SKILL_WEIGHT: f64 = 1.5;
const EXPERIENCE_WEIGHT: f64 = 1.0;
const TITLE_WEIGHT: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub profile_id: String,
    pub profile_name: String,
    pub score: f64,
}

/// Affinity of one profile to a document.
///
/// `text_lower` must already be lowercased; `keywords` is the extractor output.
pub fn score_profile(profile: &JobProfile, text_lower: &str, keywords: &[String]) -> f64 {
    let mut score = 0.0;

    for keyword in &profile.keywords {
        let keyword = keyword.to_lowercase();
        if text_lower.contains(&keyword) || keywords.iter().any(|k| *k == keyword) {
            score += KEYWORD_WEIGHT;
        }
    }
    for skill in &profile.skills {
        if text_lower.contains(&skill.to_lowercase()) {
            score += SKILL_WEIGHT;
        }
    }
    for phrase in &profile.experience_phrases {
        if text_lower.contains(&phrase.to_lowercase()) {
            score += EXPERIENCE_WEIGHT;
        }
    }
    if text_lower.contains(&profile.name.to_lowercase()) {
        score += TITLE_WEIGHT;
    }

    score
}

/// Every profile with its score, best first. Equal scores keep catalog order.
pub fn rank_profiles(catalog: &JobCatalog, text: &str, keywords: &[String]) -> Vec<JobMatch> {
    let text_lower = text.to_lowercase();
    let mut ranked: Vec<JobMatch> = catalog
        .profiles()
        .iter()
        .map(|profile| JobMatch {
            profile_id: profile.id.clone(),
            profile_name: profile.name.clone(),
            score: score_profile(profile, &text_lower, keywords),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// The highest-scoring profile. The earliest profile in catalog order wins ties,
/// including the all-zero case.
pub fn detect_job_type<'a>(
    catalog: &'a JobCatalog,
    text: &str,
    keywords: &[String],
) -> Result<(&'a JobProfile, f64), AppError> {
    let text_lower = text.to_lowercase();
    let mut best: Option<(&JobProfile, f64)> = None;

    for profile in catalog.profiles() {
        let score = score_profile(profile, &text_lower, keywords);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((profile, score)),
        }
    }

    let (profile, score) = best.ok_or(AppError::JobDetection)?;
    debug!("Detected job type '{}' (score {score})", profile.id);
    Ok((profile, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::keywords::{extract_keywords, StopWords};

    fn profile(id: &str, name: &str, keywords: &[&str], skills: &[&str], phrases: &[&str]) -> JobProfile {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
        JobProfile {
            id: id.into(),
            name: name.into(),
            keywords: owned(keywords),
            skills: owned(skills),
            experience_phrases: owned(phrases),
        }
    }

    fn two_profiles() -> JobCatalog {
        JobCatalog::new(vec![
            profile("alpha", "Alpha Role", &["shared"], &[], &[]),
            profile("beta", "Beta Role", &["shared"], &[], &[]),
        ])
        .unwrap()
    }

    #[test]
    fn test_weights() {
        let p = profile(
            "se",
            "Software Engineer",
            &["rust", "kafka"],
            &["system design"],
            &["shipped"],
        );
        let text = "software engineer who shipped rust services; system design";
        // 2 (rust) + 1.5 + 1 + 3
        assert_eq!(score_profile(&p, text, &[]), 7.5);
    }

    #[test]
    fn test_keyword_found_via_extracted_list() {
        let p = profile("x", "X Role", &["kafka"], &[], &[]);
        assert_eq!(score_profile(&p, "", &["kafka".to_string()]), 2.0);
    }

    #[test]
    fn test_tie_goes_to_first_in_catalog_order() {
        let catalog = two_profiles();
        let (winner, score) = detect_job_type(&catalog, "shared", &[]).unwrap();
        assert_eq!(winner.id, "alpha");
        assert_eq!(score, 2.0);
    }

    #[test]
    fn test_all_zero_scores_pick_first_profile() {
        let catalog = two_profiles();
        let (winner, score) = detect_job_type(&catalog, "", &[]).unwrap();
        assert_eq!(winner.id, "alpha");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_catalog_is_job_detection_error() {
        let catalog = JobCatalog::default();
        let err = detect_job_type(&catalog, "anything", &[]).unwrap_err();
        assert!(matches!(err, AppError::JobDetection));
    }

    #[test]
    fn test_detection_is_deterministic() {
        let catalog = JobCatalog::load(None).unwrap();
        let text = "Data scientist with python, machine learning, statistics and pandas";
        let first = detect_job_type(&catalog, text, &[]).unwrap().0.id.clone();
        for _ in 0..5 {
            assert_eq!(detect_job_type(&catalog, text, &[]).unwrap().0.id, first);
        }
    }

    #[test]
    fn test_frontend_resume_detected_as_software_engineer() {
        let catalog = JobCatalog::load(None).unwrap();
        let stop_words = StopWords::load(None).unwrap();
        let text = "Software Engineer. Built React and Node.js applications in JavaScript \
                    and TypeScript, with GitHub Actions CI/CD and code review. \
                    Developed RESTful services and implemented testing.";
        let keywords = extract_keywords(text, &stop_words);
        let (winner, _) = detect_job_type(&catalog, text, &keywords).unwrap();
        assert_eq!(winner.id, "software-engineer");
    }

    #[test]
    fn test_rank_profiles_sorted_and_stable() {
        let catalog = JobCatalog::new(vec![
            profile("a", "A Role", &["one"], &[], &[]),
            profile("b", "B Role", &["two", "three"], &[], &[]),
            profile("c", "C Role", &["one"], &[], &[]),
        ])
        .unwrap();
        let ranked = rank_profiles(&catalog, "one two three", &[]);
        let ids: Vec<&str> = ranked.iter().map(|m| m.profile_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(ranked[0].score, 4.0);
    }
}
