use crate::config::Config;
use crate::error::Result;
use crate::upstream::{ParaphraseUpstream, RapidApiClient};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::broadcast;

pub mod metrics;

pub use metrics::Metrics;

/// Process-wide, read-only state shared by every request handler.
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<dyn ParaphraseUpstream>,
    pub metrics: Arc<Metrics>,
    pub started_at: DateTime<Utc>,
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Builds the state with the HTTP client for the configured upstream.
    pub fn new(config: Config) -> Result<(Arc<Self>, broadcast::Receiver<()>)> {
        let upstream = Arc::new(RapidApiClient::new(&config.upstream)?);
        Self::with_upstream(config, upstream)
    }

    pub fn with_upstream(
        config: Config,
        upstream: Arc<dyn ParaphraseUpstream>,
    ) -> Result<(Arc<Self>, broadcast::Receiver<()>)> {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(16);

        let state = Arc::new(Self {
            config: Arc::new(config),
            upstream,
            metrics: Arc::new(Metrics::new()?),
            started_at: Utc::now(),
            shutdown_tx,
        });

        Ok((state, shutdown_rx))
    }

    pub fn shutdown(&self) {
        // No receivers left just means everything already stopped
        let _ = self.shutdown_tx.send(());
    }
}
