//! Whole-résumé restructuring and summary generation.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::resume::{Education, PersonalInfo, Project, ResumeData, Skills, WorkExperience};
use crate::restructuring::experience::restructure_experience_description;
use crate::restructuring::project::restructure_project_description;
use crate::restructuring::skills::{categorize_skills, contains_term, CategorizedSkills};
use crate::restructuring::vocabulary::Vocabulary;

const DEFAULT_ROLE: &str = "Software Developer";
const MAX_SUMMARY_SKILLS: usize = 5;
const MAX_KEY_AREAS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestructuredExperience {
    /// `achievements` is replaced by the restructured list.
    #[serde(flatten)]
    pub experience: WorkExperience,
    pub responsibilities: Vec<String>,
    pub key_technologies: Vec<String>,
    pub impact_metrics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestructuredProject {
    /// `technologies` is replaced by the extracted list.
    #[serde(flatten)]
    pub project: Project,
    pub key_features: Vec<String>,
    pub impact: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestructuredResume {
    pub personal: PersonalInfo,
    pub summary: Option<String>,
    pub experience: Vec<RestructuredExperience>,
    pub education: Vec<Education>,
    /// Technical and business lists re-ordered by category.
    pub skills: Skills,
    pub skill_categories: CategorizedSkills,
    pub projects: Vec<RestructuredProject>,
    pub achievements: Option<Vec<String>>,
}

pub fn restructure_resume(data: &ResumeData, vocab: &Vocabulary) -> RestructuredResume {
    let mut personal = data.personal.clone();
    let has_title = personal
        .job_title
        .as_deref()
        .map_or(false, |t| !t.trim().is_empty());
    if !has_title {
        if let Some(first) = data.experience.first() {
            personal.job_title = Some(first.position.clone());
        }
    }

    let experience = data
        .experience
        .iter()
        .map(|exp| {
            let breakdown = restructure_experience_description(&exp.description, vocab);
            RestructuredExperience {
                experience: WorkExperience {
                    achievements: breakdown.achievements,
                    ..exp.clone()
                },
                responsibilities: breakdown.responsibilities,
                key_technologies: breakdown.key_technologies,
                impact_metrics: breakdown.impact_metrics,
            }
        })
        .collect();

    let projects = data
        .projects
        .iter()
        .map(|project| {
            let breakdown = restructure_project_description(&project.description, vocab);
            RestructuredProject {
                project: Project {
                    technologies: breakdown.technologies,
                    ..project.clone()
                },
                key_features: breakdown.key_features,
                impact: breakdown.impact,
            }
        })
        .collect();

    let skill_categories = categorize_skills(&data.skills.technical, &data.skills.business, vocab);
    let skills = Skills {
        technical: skill_categories.technical_skills(),
        business: skill_categories.business_skills(),
        ..data.skills.clone()
    };

    RestructuredResume {
        personal,
        summary: data.summary.clone(),
        experience,
        education: data.education.clone(),
        skills,
        skill_categories,
        projects,
        achievements: data.achievements.clone(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Summary generation
// ────────────────────────────────────────────────────────────────────────────

/// Writes a one-paragraph summary from the experience and skills.
/// Without experience the existing summary (or an empty string) is returned.
pub fn generate_summary(data: &ResumeData, today: NaiveDate, vocab: &Vocabulary) -> String {
    let Some(latest) = data.experience.first() else {
        return data.summary.clone().unwrap_or_default();
    };

    let role = if latest.position.trim().is_empty() {
        DEFAULT_ROLE
    } else {
        latest.position.trim()
    };

    let years = years_of_experience(&data.experience, today)
        .map(format_experience_years)
        .unwrap_or_else(|| "several years".to_string());

    let skills: Vec<&str> = data
        .skills
        .technical
        .iter()
        .take(MAX_SUMMARY_SKILLS)
        .map(String::as_str)
        .collect();
    let specialization = if skills.is_empty() {
        "software development".to_string()
    } else {
        skills.join(", ")
    };

    let areas = key_areas(&data.experience, vocab);
    let expertise = if areas.is_empty() {
        "cross-platform development".to_string()
    } else {
        format!("{} and cross-platform development", areas.join(", "))
    };

    format!(
        "{role} with {years} of experience building scalable applications, \
         specializing in {specialization}. Proven expertise in {expertise}."
    )
}

/// Span from the oldest listed start date to the newest end date (today when
/// current), in years rounded to one decimal. `None` when a date is unreadable
/// or the span is negative.
pub fn years_of_experience(experience: &[WorkExperience], today: NaiveDate) -> Option<f64> {
    let newest = experience.first()?;
    let oldest = experience.last()?;

    let start = parse_resume_date(&oldest.start_date)?;
    let end = if newest.current {
        today
    } else {
        match newest.end_date.as_deref() {
            Some(end) if end.trim().eq_ignore_ascii_case("present") => today,
            Some(end) => parse_resume_date(end)?,
            None => return None,
        }
    };

    let days = (end - start).num_days();
    if days < 0 {
        return None;
    }
    Some((days as f64 / 365.25 * 10.0).round() / 10.0)
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM`, `MM/YYYY` and `YYYY`.
pub fn parse_resume_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if let Some((month, year)) = raw.split_once('/') {
        let month: u32 = month.trim().parse().ok()?;
        let year: i32 = year.trim().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    if raw.len() == 4 {
        let year: i32 = raw.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).filter(|d| d.year() > 0);
    }
    None
}

/// `6 months`, `1 year`, `3 years`, `2.5 years`. Spans shorter than a
/// month read as one month.
pub fn format_experience_years(years: f64) -> String {
    if years < 1.0 {
        let months = ((years * 12.0).round() as i64).max(1);
        return match months {
            1 => "1 month".to_string(),
            12.. => "1 year".to_string(),
            _ => format!("{months} months"),
        };
    }
    if years.fract() == 0.0 {
        let whole = years as i64;
        return if whole == 1 {
            "1 year".to_string()
        } else {
            format!("{whole} years")
        };
    }
    format!("{years:.1} years")
}

fn key_areas(experience: &[WorkExperience], vocab: &Vocabulary) -> Vec<String> {
    let mut areas: Vec<String> = Vec::new();
    for exp in experience {
        let description = exp.description.to_lowercase();
        for area in &vocab.key_areas {
            if areas.contains(&area.label) {
                continue;
            }
            if area.triggers.iter().any(|t| contains_term(&description, t)) {
                areas.push(area.label.clone());
            }
        }
    }
    areas.truncate(MAX_KEY_AREAS);
    areas
}
