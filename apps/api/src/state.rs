use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use crate::analysis::analyzer::{AnalysisTables, LocalAnalyzer, RemoteAnalyzer, ResumeAnalyzer};
use crate::config::{AnalyzerBackend, Config};
use crate::remote_client::RemoteAnalyzerClient;
use crate::restructuring::vocabulary::Vocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Job catalog and stop words, loaded once at startup.
    pub tables: Arc<AnalysisTables>,
    pub vocabulary: Arc<Vocabulary>,
    /// Pluggable analyzer. Default: LocalAnalyzer. Swap via ANALYZER_BACKEND env.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
}

impl AppState {
    /// Loads the data tables and picks the analyzer backend named in `config`.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let tables = Arc::new(AnalysisTables::load(&config)?);
        let vocabulary = Arc::new(Vocabulary::load(config.restructuring_vocab_path.as_deref())?);

        let analyzer: Arc<dyn ResumeAnalyzer> = match config.analyzer_backend {
            AnalyzerBackend::Local => Arc::new(LocalAnalyzer::new(tables.clone())),
            AnalyzerBackend::Remote => {
                let url = config
                    .remote_analyzer_url
                    .clone()
                    .context("REMOTE_ANALYZER_URL is required for the remote backend")?;
                let client =
                    RemoteAnalyzerClient::new(url, Duration::from_secs(config.remote_timeout_secs));
                info!("Remote analyzer configured at {}", client.base_url());
                Arc::new(RemoteAnalyzer::new(client))
            }
        };

        Ok(Self {
            config,
            tables,
            vocabulary,
            analyzer,
        })
    }
}
