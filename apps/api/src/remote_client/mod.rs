//! Remote analysis client: the only place this service talks to the external scoring backend.
//!
//! Two endpoints, both multipart:
//! - `POST {base}/api/upload/analyze` with `file` and `job_description`
//! - `POST {base}/api/upload/quick-analyze` with `file` only (the backend
//!   writes its own job description)
//!
//! Calls are never retried here; the caller decides what to do on failure.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::DocumentUpload;

const ANALYZE_PATH: &str = "/api/upload/analyze";
const QUICK_ANALYZE_PATH: &str = "/api/upload/quick-analyze";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("remote analysis rejected: {0}")]
    Rejected(String),

    #[error("AI job detection failed")]
    JobDetectionFailed,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<RemoteAnalysis>,
}

/// FastAPI error body: `detail` is a string or a list of validation errors.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// The subset of the backend's analysis payload this service consumes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RemoteAnalysis {
    pub ats_score: f64,
    pub detected_job_type: Option<String>,
    pub job_detection_confidence: f64,
    pub keyword_matches: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub word_count: usize,
}

/// Checks a successful response body against the contract.
pub fn parse_analysis_body(body: &str) -> Result<RemoteAnalysis, RemoteError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| RemoteError::Rejected(format!("unreadable response body: {e}")))?;

    if !envelope.success {
        return Err(RemoteError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "backend reported failure".to_string()),
        ));
    }

    let analysis = envelope
        .data
        .ok_or_else(|| RemoteError::Rejected("response has no data".to_string()))?;

    match analysis.detected_job_type.as_deref() {
        Some(job_type) if !job_type.trim().is_empty() => Ok(analysis),
        _ => Err(RemoteError::JobDetectionFailed),
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.to_string(),
    }
}

#[derive(Clone)]
pub struct RemoteAnalyzerClient {
    client: Client,
    base_url: String,
}

impl RemoteAnalyzerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full analysis against a caller-supplied job description.
    pub async fn analyze(
        &self,
        upload: &DocumentUpload,
        job_description: &str,
    ) -> Result<RemoteAnalysis, RemoteError> {
        let form = file_form(upload)?.text("job_description", job_description.to_string());
        self.post(ANALYZE_PATH, form).await
    }

    /// Analysis where the backend detects the role and writes its own job description.
    pub async fn quick_analyze(&self, upload: &DocumentUpload) -> Result<RemoteAnalysis, RemoteError> {
        let form = file_form(upload)?;
        self.post(QUICK_ANALYZE_PATH, form).await
    }

    async fn post(&self, path: &str, form: Form) -> Result<RemoteAnalysis, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!("Remote analyzer returned {status}: {message}");
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let analysis = parse_analysis_body(&body)?;
        debug!(
            "Remote analysis succeeded: job_type={:?}, score={}",
            analysis.detected_job_type, analysis.ats_score
        );
        Ok(analysis)
    }
}

fn file_form(upload: &DocumentUpload) -> Result<Form, RemoteError> {
    let mut part = Part::bytes(upload.bytes.to_vec())
        .file_name(upload.file_name.clone().unwrap_or_else(|| "resume".to_string()));
    if let Some(media_type) = upload.media_type.as_deref() {
        part = part.mime_str(media_type)?;
    }
    Ok(Form::new().part("file", part))
}
