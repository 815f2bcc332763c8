//! Client side of the third-party paraphrase API.

use crate::error::UpstreamError;
use async_trait::async_trait;
use paraph_shared::UpstreamRequest;
use serde_json::Value;

pub mod rapidapi;

pub use rapidapi::RapidApiClient;

/// Answer of the upstream API, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    /// Decoded JSON when the upstream declared a JSON content type, the raw
    /// text as a JSON string otherwise.
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParaphraseUpstream: Send + Sync + 'static {
    /// Performs exactly one call. Non-success statuses are returned as
    /// replies; only a call that produced no usable answer is an error.
    async fn paraphrase(
        &self,
        api_key: &str,
        request: &UpstreamRequest,
    ) -> Result<UpstreamReply, UpstreamError>;
}
