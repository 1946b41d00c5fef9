use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::extraction::DEFAULT_MAX_UPLOAD_BYTES;

/// Which analyzer answers `/api/v1/ats/analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerBackend {
    Local,
    Remote,
}

/// Application configuration loaded from environment variables.
/// Start-up fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub analyzer_backend: AnalyzerBackend,
    pub remote_analyzer_url: Option<String>,
    pub remote_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub job_profiles_path: Option<PathBuf>,
    pub stop_words_path: Option<PathBuf>,
    pub restructuring_vocab_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let analyzer_backend = match get("ANALYZER_BACKEND")
            .unwrap_or_else(|| "local".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "local" => AnalyzerBackend::Local,
            "remote" => AnalyzerBackend::Remote,
            other => bail!("ANALYZER_BACKEND must be 'local' or 'remote', got '{other}'"),
        };

        let remote_analyzer_url = get("REMOTE_ANALYZER_URL");
        if analyzer_backend == AnalyzerBackend::Remote && remote_analyzer_url.is_none() {
            bail!("REMOTE_ANALYZER_URL must be set when ANALYZER_BACKEND=remote");
        }

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            analyzer_backend,
            remote_analyzer_url,
            remote_timeout_secs: get("REMOTE_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse::<u64>()
                .context("REMOTE_TIMEOUT_SECS must be a whole number of seconds")?,
            max_upload_bytes: match get("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            job_profiles_path: get("JOB_PROFILES_PATH").map(PathBuf::from),
            stop_words_path: get("STOP_WORDS_PATH").map(PathBuf::from),
            restructuring_vocab_path: get("RESTRUCTURING_VOCAB_PATH").map(PathBuf::from),
        })
    }
}
