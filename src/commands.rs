use crate::config::{Config, API_KEY_ENV};
use crate::error::{ConfigError, ProxyError, Result};
use crate::upstream::{ParaphraseUpstream, RapidApiClient};
use paraph_shared::{ParaphraseRequest, ResultType};
use tracing::{error, info, warn};

const PROBE_TEXT: &str = "The quick brown fox jumps over the lazy dog.";

/// Validates the configuration and, with `probe`, sends one real
/// paraphrase request upstream.
pub async fn run_config_check(config: Config, probe: bool) -> Result<()> {
    info!("Checking configuration...");

    crate::config::validate(&config)?;
    info!("✓ Configuration is valid");

    let effective = serde_yaml::to_string(&config)
        .map_err(|e| ConfigError::Parse(format!("Failed to render configuration: {}", e)))?;
    info!("Effective configuration (credential omitted):\n{}", effective);

    let Some(api_key) = config.upstream.api_key() else {
        warn!(
            "✗ No upstream credential configured; set {} or upstream.apiKey",
            API_KEY_ENV
        );
        return Err(ConfigError::Validation(format!("{} is not set", API_KEY_ENV)).into());
    };
    info!("✓ Upstream credential present");

    if !probe {
        return Ok(());
    }

    let client = RapidApiClient::new(&config.upstream)?;
    info!("Probing upstream at {}", client.url());

    let request = ParaphraseRequest::new(PROBE_TEXT, ResultType::Single).to_upstream();
    match client.paraphrase(api_key, &request).await {
        Ok(reply) if reply.is_success() => {
            info!("✓ Upstream answered with status {}", reply.status);
            Ok(())
        }
        Ok(reply) => {
            error!(
                "✗ Upstream answered with status {}: {}",
                reply.status, reply.body
            );
            Err(ConfigError::Validation(format!(
                "Upstream probe returned status {}",
                reply.status
            ))
            .into())
        }
        Err(e) => {
            error!("✗ Upstream probe failed: {}", e);
            Err(ProxyError::Upstream(e))
        }
    }
}
