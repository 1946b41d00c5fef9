pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::extraction::handlers as extraction;
use crate::restructuring::handlers as restructuring;
use crate::state::AppState;

/// Headroom for multipart framing and the `job_description` part, so an
/// oversized file reaches the size check instead of being cut off mid-stream.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route(
            "/api/v1/documents/supported-formats",
            get(extraction::handle_supported_formats),
        )
        .route("/api/v1/documents/parse", post(extraction::handle_parse_document))
        // ATS analysis
        .route("/api/v1/ats/analyze", post(analysis::handle_analyze))
        .route("/api/v1/ats/keywords", post(analysis::handle_keywords))
        .route("/api/v1/ats/detect", post(analysis::handle_detect))
        .route("/api/v1/resumes/analyze", post(analysis::handle_analyze_resume))
        // Content restructuring
        .route(
            "/api/v1/restructure/experience",
            post(restructuring::handle_restructure_experience),
        )
        .route(
            "/api/v1/restructure/project",
            post(restructuring::handle_restructure_project),
        )
        .route(
            "/api/v1/restructure/skills",
            post(restructuring::handle_categorize_skills),
        )
        .route(
            "/api/v1/restructure/resume",
            post(restructuring::handle_restructure_resume),
        )
        .route(
            "/api/v1/restructure/summary",
            post(restructuring::handle_generate_summary),
        )
        .route("/api/v1/restructure/improve", post(restructuring::handle_improve))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
