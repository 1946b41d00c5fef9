//! Skill categorization: buckets skills into semantic categories.
//!
//! Each skill goes into the first bucket whose vocabulary it matches, in
//! vocabulary order. Unmatched technical skills go to the first technical
//! bucket and unmatched business skills to the first business bucket.
//! Empty buckets are dropped from the output.

use serde::{Deserialize, Serialize};

use crate::restructuring::vocabulary::{SkillBucket, Vocabulary};

const SHORT_TERM_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedSkills {
    pub technical: Vec<SkillCategory>,
    pub business: Vec<SkillCategory>,
}

impl CategorizedSkills {
    /// Skills flattened back out in bucket order.
    pub fn technical_skills(&self) -> Vec<String> {
        self.technical.iter().flat_map(|c| c.skills.iter().cloned()).collect()
    }

    pub fn business_skills(&self) -> Vec<String> {
        self.business.iter().flat_map(|c| c.skills.iter().cloned()).collect()
    }
}

/// Whether `term` occurs in the lowercased skill. Terms of three characters
/// or fewer must sit on token boundaries, so `go` does not match `django`.
pub fn contains_term(skill_lower: &str, term: &str) -> bool {
    let term = term.to_lowercase();
    if term.is_empty() {
        return false;
    }
    if term.chars().count() > SHORT_TERM_CHARS {
        return skill_lower.contains(&term);
    }

    skill_lower.match_indices(&term).any(|(start, _)| {
        let before = skill_lower[..start].chars().next_back();
        let after = skill_lower[start + term.len()..].chars().next();
        !before.map_or(false, char::is_alphanumeric) && !after.map_or(false, char::is_alphanumeric)
    })
}

fn matching_bucket(skill: &str, buckets: &[SkillBucket]) -> Option<usize> {
    let lower = skill.to_lowercase();
    buckets
        .iter()
        .position(|bucket| bucket.terms.iter().any(|term| contains_term(&lower, term)))
}

fn empty_categories(buckets: &[SkillBucket]) -> Vec<SkillCategory> {
    buckets
        .iter()
        .map(|b| SkillCategory {
            category: b.category.clone(),
            skills: Vec::new(),
            proficiency: b.proficiency,
        })
        .collect()
}

fn non_empty(categories: Vec<SkillCategory>) -> Vec<SkillCategory> {
    categories.into_iter().filter(|c| !c.skills.is_empty()).collect()
}

/// Categorizes pre-split technical and business skills.
pub fn categorize_skills(technical: &[String], business: &[String], vocab: &Vocabulary) -> CategorizedSkills {
    let mut tech = empty_categories(&vocab.technical_buckets);
    let mut biz = empty_categories(&vocab.business_buckets);

    for skill in technical {
        let index = matching_bucket(skill, &vocab.technical_buckets).unwrap_or(0);
        tech[index].skills.push(skill.clone());
    }
    for skill in business {
        let index = matching_bucket(skill, &vocab.business_buckets).unwrap_or(0);
        biz[index].skills.push(skill.clone());
    }

    CategorizedSkills {
        technical: non_empty(tech),
        business: non_empty(biz),
    }
}

/// Categorizes a flat skill list. Technical vocabulary is tried first, then
/// business; a skill matching neither goes to the first technical bucket.
pub fn categorize_skill_list(skills: &[String], vocab: &Vocabulary) -> CategorizedSkills {
    let mut tech = empty_categories(&vocab.technical_buckets);
    let mut biz = empty_categories(&vocab.business_buckets);

    for skill in skills {
        if let Some(index) = matching_bucket(skill, &vocab.technical_buckets) {
            tech[index].skills.push(skill.clone());
        } else if let Some(index) = matching_bucket(skill, &vocab.business_buckets) {
            biz[index].skills.push(skill.clone());
        } else {
            tech[0].skills.push(skill.clone());
        }
    }

    CategorizedSkills {
        technical: non_empty(tech),
        business: non_empty(biz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::load(None).unwrap()
    }

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn names(categories: &[SkillCategory]) -> Vec<&str> {
        categories.iter().map(|c| c.category.as_str()).collect()
    }

    #[test]
    fn test_contains_term_short_terms_need_boundaries() {
        assert!(contains_term("go", "go"));
        assert!(contains_term("go (golang)", "go"));
        assert!(!contains_term("django", "go"));
        assert!(!contains_term("mongodb", "go"));
        assert!(contains_term("c#", "c#"));
        assert!(contains_term("aws lambda", "aws"));
        assert!(contains_term("reactjs", "react"));
    }

    #[test]
    fn test_technical_buckets() {
        let skills = strings(&["React", "Python", "PostgreSQL", "Docker", "Jest", "Django"]);
        let categorized = categorize_skills(&skills, &[], &vocab());
        assert_eq!(
            names(&categorized.technical),
            vec![
                "Frontend Development",
                "Backend Development",
                "Database & Storage",
                "DevOps & Cloud",
                "Testing & Quality",
            ]
        );
        // Django matches nothing and defaults to the first bucket
        assert_eq!(categorized.technical[0].skills, vec!["React", "Django"]);
        assert_eq!(categorized.technical[0].proficiency, Proficiency::Advanced);
        assert!(categorized.business.is_empty());
    }

    #[test]
    fn test_business_buckets_and_default() {
        let skills = strings(&["Public Speaking", "Team Leadership", "Technical Writing", "Scrum"]);
        let categorized = categorize_skills(&[], &skills, &vocab());
        assert_eq!(
            names(&categorized.business),
            vec!["Project Management", "Communication", "Leadership"]
        );
        assert_eq!(categorized.business[0].skills, vec!["Public Speaking", "Scrum"]);
        assert_eq!(categorized.business[1].skills, vec!["Technical Writing"]);
        assert_eq!(categorized.business[2].skills, vec!["Team Leadership"]);
    }

    #[test]
    fn test_every_skill_placed_exactly_once() {
        let tech = strings(&["TypeScript", "Rust", "Redis", "Kubernetes", "Cypress", "Elixir"]);
        let biz = strings(&["Kanban", "Mentoring", "Negotiation"]);
        let categorized = categorize_skills(&tech, &biz, &vocab());
        assert_eq!(categorized.technical_skills().len(), tech.len());
        assert_eq!(categorized.business_skills().len(), biz.len());
        assert!(categorized
            .technical
            .iter()
            .chain(categorized.business.iter())
            .all(|c| !c.skills.is_empty()));
    }

    #[test]
    fn test_flat_list_routing() {
        let skills = strings(&["Vue", "Agile", "Mentoring", "Origami"]);
        let categorized = categorize_skill_list(&skills, &vocab());
        assert_eq!(categorized.technical_skills(), vec!["Vue", "Origami"]);
        assert_eq!(categorized.business_skills(), vec!["Agile", "Mentoring"]);
    }

    #[test]
    fn test_mixed_flat_list_fills_distinct_buckets() {
        let skills = strings(&["react", "node.js", "scrum"]);
        let categorized = categorize_skill_list(&skills, &vocab());
        assert_eq!(
            names(&categorized.technical),
            vec!["Frontend Development", "Backend Development"]
        );
        assert_eq!(categorized.technical[0].skills, vec!["react"]);
        assert_eq!(categorized.technical[1].skills, vec!["node.js"]);
        assert_eq!(names(&categorized.business), vec!["Project Management"]);
        assert_eq!(categorized.business[0].skills, vec!["scrum"]);
    }

    #[test]
    fn test_empty_input() {
        let categorized = categorize_skills(&[], &[], &vocab());
        assert_eq!(categorized, CategorizedSkills::default());
    }

    #[test]
    fn test_proficiency_serializes_as_word() {
        let json = serde_json::to_string(&Proficiency::Intermediate).unwrap();
        assert_eq!(json, "\"Intermediate\"");
    }
}
