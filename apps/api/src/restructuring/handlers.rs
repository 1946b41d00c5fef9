use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::restructuring::experience::{restructure_experience_description, ExperienceBreakdown};
use crate::restructuring::improver::{improve_resume, ImprovementReport};
use crate::restructuring::project::{restructure_project_description, ProjectBreakdown};
use crate::restructuring::resume::{generate_summary, restructure_resume, RestructuredResume};
use crate::restructuring::skills::{categorize_skill_list, categorize_skills, CategorizedSkills};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DescriptionRequest {
    pub description: String,
}

/// Either the pre-split lists or a flat `skills` list.
#[derive(Deserialize)]
pub struct SkillsRequest {
    pub technical: Option<Vec<String>>,
    pub business: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// POST /api/v1/restructure/experience
pub async fn handle_restructure_experience(
    State(state): State<AppState>,
    Json(req): Json<DescriptionRequest>,
) -> Json<ExperienceBreakdown> {
    Json(restructure_experience_description(&req.description, &state.vocabulary))
}

/// POST /api/v1/restructure/project
pub async fn handle_restructure_project(
    State(state): State<AppState>,
    Json(req): Json<DescriptionRequest>,
) -> Json<ProjectBreakdown> {
    Json(restructure_project_description(&req.description, &state.vocabulary))
}

/// POST /api/v1/restructure/skills
pub async fn handle_categorize_skills(
    State(state): State<AppState>,
    Json(req): Json<SkillsRequest>,
) -> Result<Json<CategorizedSkills>, AppError> {
    let categorized = match req {
        SkillsRequest {
            technical: None,
            business: None,
            skills: Some(skills),
        } => categorize_skill_list(&skills, &state.vocabulary),
        SkillsRequest {
            technical: None,
            business: None,
            skills: None,
        } => {
            return Err(AppError::Validation(
                "Provide `technical`/`business` lists or a `skills` list".to_string(),
            ))
        }
        SkillsRequest {
            technical,
            business,
            ..
        } => categorize_skills(
            &technical.unwrap_or_default(),
            &business.unwrap_or_default(),
            &state.vocabulary,
        ),
    };
    Ok(Json(categorized))
}

/// POST /api/v1/restructure/resume
pub async fn handle_restructure_resume(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Json<RestructuredResume> {
    info!(
        "Restructuring résumé with {} experiences and {} projects",
        data.experience.len(),
        data.projects.len()
    );
    Json(restructure_resume(&data, &state.vocabulary))
}

/// POST /api/v1/restructure/summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Json<SummaryResponse> {
    let today = Utc::now().date_naive();
    Json(SummaryResponse {
        summary: generate_summary(&data, today, &state.vocabulary),
    })
}

/// POST /api/v1/restructure/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Json<ImprovementReport> {
    Json(improve_resume(&data, &state.vocabulary))
}
