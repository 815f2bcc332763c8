use super::{ParaphraseUpstream, UpstreamReply};
use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use async_trait::async_trait;
use paraph_shared::UpstreamRequest;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

const KEY_HEADER: &str = "x-rapidapi-key";
const HOST_HEADER: &str = "x-rapidapi-host";

/// Paraphrase API reached through the RapidAPI gateway.
pub struct RapidApiClient {
    client: reqwest::Client,
    url: String,
    host: String,
}

impl RapidApiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            host: config.host.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ParaphraseUpstream for RapidApiClient {
    async fn paraphrase(
        &self,
        api_key: &str,
        request: &UpstreamRequest,
    ) -> Result<UpstreamReply, UpstreamError> {
        let started = Instant::now();

        let response = self
            .client
            .post(&self.url)
            .header(KEY_HEADER, api_key)
            .header(HOST_HEADER, &self.host)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("application/json"));

        let body = if is_json {
            response
                .json::<Value>()
                .await
                .map_err(|e| UpstreamError::Decode(e.to_string()))?
        } else {
            Value::String(
                response
                    .text()
                    .await
                    .map_err(|e| UpstreamError::Transport(e.to_string()))?,
            )
        };

        debug!(
            status,
            json = is_json,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Upstream answered"
        );

        Ok(UpstreamReply { status, body })
    }
}
