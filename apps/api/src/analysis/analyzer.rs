//! Analysis pipeline: pluggable analyzer behind one trait.
//!
//! Default: `LocalAnalyzer` (the in-process keyword pipeline, deterministic).
//! Alternative: `RemoteAnalyzer` (delegates to the external scoring backend).
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`, chosen at startup via
//! `ANALYZER_BACKEND`. When the remote backend fails, `analyze_with_fallback`
//! answers with the heuristic scorer instead.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::catalog::JobCatalog;
use crate::analysis::density::analyze_keywords;
use crate::analysis::fallback::{perform_basic_analysis, BasicBreakdown, ResumeSignals};
use crate::analysis::feedback::generate_feedback;
use crate::analysis::job_detector::detect_job_type;
use crate::analysis::keywords::{extract_keywords, StopWords};
use crate::analysis::scoring::{calculate_ats_score, SectionSignals};
use crate::config::Config;
use crate::data::DataError;
use crate::errors::AppError;
use crate::extraction::{DocumentUpload, ParsedDocument};
use crate::remote_client::{RemoteAnalysis, RemoteAnalyzerClient};

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all analyzer backends)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub job_type: String,
    pub ats_score: u32, // 0 – 100
    pub keyword_matches: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub keyword_density: BTreeMap<String, f64>,
    pub word_count: usize,
    pub character_count: usize,
    /// Reported by the remote backend only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_detection_confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisBackend {
    Local,
    Remote,
    Fallback,
}

/// HTTP envelope for an analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub result: AnalysisResult,
    pub analysis_backend: AnalysisBackend,
    /// Per-dimension scores of the heuristic scorer, present on fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_breakdown: Option<BasicBreakdown>,
}

/// One analysis job. The document is always extracted locally so the
/// fallback scorer has text to work with.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub upload: DocumentUpload,
    pub document: ParsedDocument,
    pub job_description: Option<String>,
}

/// Read-only tables consulted by the local pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisTables {
    pub catalog: JobCatalog,
    pub stop_words: StopWords,
}

impl AnalysisTables {
    pub fn load(config: &Config) -> Result<Self, DataError> {
        Ok(Self {
            catalog: JobCatalog::load(config.job_profiles_path.as_deref())?,
            stop_words: StopWords::load(config.stop_words_path.as_deref())?,
        })
    }
}

/// Runs the full local pipeline on an extracted document.
///
/// With a job description, detection runs on the description first; a
/// description that scores zero against every profile falls back to the
/// document text.
pub fn analyze_document(
    document: &ParsedDocument,
    job_description: Option<&str>,
    tables: &AnalysisTables,
) -> Result<AnalysisResult, AppError> {
    let keywords = extract_keywords(&document.text, &tables.stop_words);

    let from_description = match job_description.filter(|jd| !jd.trim().is_empty()) {
        Some(jd) => {
            let jd_keywords = extract_keywords(jd, &tables.stop_words);
            let (profile, score) = detect_job_type(&tables.catalog, jd, &jd_keywords)?;
            (score > 0.0).then_some(profile)
        }
        None => None,
    };
    let profile = match from_description {
        Some(profile) => profile,
        None => detect_job_type(&tables.catalog, &document.text, &keywords)?.0,
    };

    let keyword_analysis = analyze_keywords(&document.text, profile);
    let signals = SectionSignals::from_text(&document.text);
    let ats_score = calculate_ats_score(document.word_count, &keyword_analysis, &signals);
    let feedback = generate_feedback(document.word_count, &keyword_analysis, &signals, profile);

    info!(
        "Analyzed document as '{}': score {ats_score}, {}/{} keywords",
        profile.name,
        keyword_analysis.matched_keywords.len(),
        profile.keywords.len()
    );

    Ok(AnalysisResult {
        job_type: profile.name.clone(),
        ats_score,
        keyword_matches: keyword_analysis.matched_keywords,
        missing_keywords: keyword_analysis.missing_keywords,
        suggestions: feedback.suggestions,
        strengths: feedback.strengths,
        weaknesses: feedback.weaknesses,
        keyword_density: keyword_analysis.density,
        word_count: document.word_count,
        character_count: document.character_count,
        job_detection_confidence: None,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError>;

    fn backend(&self) -> AnalysisBackend;
}

// ────────────────────────────────────────────────────────────────────────────
// LocalAnalyzer: default
// ────────────────────────────────────────────────────────────────────────────

pub struct LocalAnalyzer {
    tables: Arc<AnalysisTables>,
}

impl LocalAnalyzer {
    pub fn new(tables: Arc<AnalysisTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ResumeAnalyzer for LocalAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
        analyze_document(
            &request.document,
            request.job_description.as_deref(),
            &self.tables,
        )
    }

    fn backend(&self) -> AnalysisBackend {
        AnalysisBackend::Local
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RemoteAnalyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct RemoteAnalyzer {
    client: RemoteAnalyzerClient,
}

impl RemoteAnalyzer {
    pub fn new(client: RemoteAnalyzerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResumeAnalyzer for RemoteAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
        let analysis = match request.job_description.as_deref() {
            Some(jd) => self.client.analyze(&request.upload, jd).await?,
            None => self.client.quick_analyze(&request.upload).await?,
        };
        Ok(from_remote(analysis, &request.document))
    }

    fn backend(&self) -> AnalysisBackend {
        AnalysisBackend::Remote
    }
}

/// Maps the backend's payload onto the local result shape. The backend
/// reports no density; character count comes from the local extraction.
fn from_remote(analysis: RemoteAnalysis, document: &ParsedDocument) -> AnalysisResult {
    AnalysisResult {
        job_type: analysis.detected_job_type.unwrap_or_default(),
        ats_score: analysis.ats_score.round().clamp(0.0, 100.0) as u32,
        keyword_matches: analysis.keyword_matches,
        missing_keywords: analysis.missing_keywords,
        suggestions: analysis.suggestions,
        strengths: analysis.strengths,
        weaknesses: analysis.weaknesses,
        keyword_density: BTreeMap::new(),
        word_count: if analysis.word_count > 0 {
            analysis.word_count
        } else {
            document.word_count
        },
        character_count: document.character_count,
        job_detection_confidence: Some(analysis.job_detection_confidence),
    }
}

/// Runs the configured analyzer. A remote failure is answered by the
/// heuristic scorer over `signals`; every other error propagates.
pub async fn analyze_with_fallback(
    analyzer: &dyn ResumeAnalyzer,
    request: &AnalysisRequest,
    signals: impl FnOnce() -> ResumeSignals,
) -> Result<AnalysisResponse, AppError> {
    match analyzer.analyze(request).await {
        Ok(result) => Ok(AnalysisResponse {
            result,
            analysis_backend: analyzer.backend(),
            fallback_breakdown: None,
        }),
        Err(AppError::RemoteAnalysis(reason)) => {
            warn!("Remote analysis failed, using heuristic fallback: {reason}");
            let basic = perform_basic_analysis(&signals());
            let breakdown = basic.breakdown;
            Ok(AnalysisResponse {
                result: basic.into_analysis_result(&request.document),
                analysis_backend: AnalysisBackend::Fallback,
                fallback_breakdown: Some(breakdown),
            })
        }
        Err(e) => Err(e),
    }
}
