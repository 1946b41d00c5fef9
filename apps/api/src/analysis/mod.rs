//! ATS analysis engine.
//!
//! Stages, leaf-first: keyword extraction, job type detection against the
//! profile catalog, keyword density, scoring and feedback. `analyzer` wires
//! them into one `AnalysisResult` behind the `ResumeAnalyzer` trait.

pub mod analyzer;
pub mod catalog;
pub mod density;
pub mod fallback;
pub mod feedback;
pub mod handlers;
pub mod job_detector;
pub mod keywords;
pub mod scoring;
