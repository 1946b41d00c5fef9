//! Lookup tables shipped with the service.
//!
//! Every table is embedded at compile time and can be replaced at start-up by
//! pointing the matching environment variable at a JSON file on disk, so the
//! catalog and vocabularies can be edited without a rebuild.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub const JOB_PROFILES_JSON: &str = include_str!("../data/job_profiles.json");
pub const STOP_WORDS_JSON: &str = include_str!("../data/stop_words.json");
pub const RESTRUCTURING_JSON: &str = include_str!("../data/restructuring.json");

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read table file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("table '{table}' is not valid JSON: {source}")]
    Json {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("table '{table}' is invalid: {reason}")]
    Invalid { table: &'static str, reason: String },

    #[error("table '{table}' contains an invalid pattern: {source}")]
    Pattern {
        table: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Returns the override file's contents when a path is configured, otherwise the embedded table.
pub fn read_table(path: Option<&Path>, embedded: &'static str) -> Result<Cow<'static, str>, DataError> {
    match path {
        Some(path) => {
            info!("Loading table override from {}", path.display());
            std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| DataError::Io {
                    path: path.to_path_buf(),
                    source,
                })
        }
        None => Ok(Cow::Borrowed(embedded)),
    }
}

/// Deserializes a JSON table, tagging failures with the table name.
pub fn parse_table<T: serde::de::DeserializeOwned>(
    table: &'static str,
    json: &str,
) -> Result<T, DataError> {
    serde_json::from_str(json).map_err(|source| DataError::Json { table, source })
}
