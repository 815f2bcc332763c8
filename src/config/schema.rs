use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_URL: &str = "https://paraphrase-genius.p.rapidapi.com/dev/paraphrase/";
pub const DEFAULT_UPSTREAM_HOST: &str = "paraphrase-genius.p.rapidapi.com";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory holding the built UI. Nothing is served besides the API
    /// when unset.
    #[serde(default, alias = "staticdir")]
    pub static_dir: Option<PathBuf>,
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub url: String,
    #[serde(default = "default_upstream_host")]
    pub host: String,
    #[serde(default, alias = "apikey", skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default, alias = "timeoutms")]
    pub timeout_ms: Option<u64>,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_upstream_host() -> String {
    DEFAULT_UPSTREAM_HOST.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            host: default_upstream_host(),
            api_key: None,
            timeout_ms: None,
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl UpstreamConfig {
    /// The credential, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream.host, DEFAULT_UPSTREAM_HOST);
        assert!(config.upstream.api_key().is_none());
        assert!(config.upstream.timeout().is_none());
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let upstream = UpstreamConfig {
            api_key: Some(String::new()),
            ..UpstreamConfig::default()
        };
        assert!(upstream.api_key().is_none());
    }

    #[test]
    fn test_key_is_never_printed() {
        let upstream = UpstreamConfig {
            api_key: Some("super-secret".to_string()),
            ..UpstreamConfig::default()
        };
        assert!(!format!("{upstream:?}").contains("super-secret"));

        let yaml = serde_yaml::to_string(&upstream).expect("Failed to serialize");
        assert!(!yaml.contains("super-secret"));
        assert!(yaml.contains("paraphrase-genius.p.rapidapi.com"));
    }
}
