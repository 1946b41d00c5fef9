use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::analyzer::{analyze_with_fallback, AnalysisRequest, AnalysisResponse};
use crate::analysis::fallback::ResumeSignals;
use crate::analysis::job_detector::{rank_profiles, JobMatch};
use crate::analysis::keywords::extract_keywords;
use crate::errors::AppError;
use crate::extraction::handlers::read_upload_form;
use crate::extraction::{extract_upload, DocumentUpload, ParsedDocument};
use crate::models::resume::{render_resume_text, ResumeData};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

/// POST /api/v1/ats/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let document = extract_upload(&form.upload, state.config.max_upload_bytes).await?;
    info!(
        "Analyzing {:?} ({} words, job description: {})",
        form.upload.file_name,
        document.word_count,
        form.job_description.is_some()
    );

    let request = AnalysisRequest {
        upload: form.upload,
        document,
        job_description: form.job_description,
    };
    let response = analyze_with_fallback(state.analyzer.as_ref(), &request, || {
        ResumeSignals::from_text(&request.document.text)
    })
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/resumes/analyze
/// Analyzes structured résumé data by rendering it to plain text first.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let text = render_resume_text(&data);
    let request = AnalysisRequest {
        upload: DocumentUpload::plain_text(text.clone(), "resume.txt"),
        document: ParsedDocument::from_text(text),
        job_description: None,
    };
    let response = analyze_with_fallback(state.analyzer.as_ref(), &request, || {
        ResumeSignals::from_resume(&data)
    })
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/ats/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Json<KeywordsResponse> {
    Json(KeywordsResponse {
        keywords: extract_keywords(&req.text, &state.tables.stop_words),
    })
}

/// POST /api/v1/ats/detect
pub async fn handle_detect(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<Vec<JobMatch>>, AppError> {
    if state.tables.catalog.is_empty() {
        return Err(AppError::JobDetection);
    }
    let keywords = extract_keywords(&req.text, &state.tables.stop_words);
    Ok(Json(rank_profiles(&state.tables.catalog, &req.text, &keywords)))
}
