use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Environment variable error: {0}")]
    EnvVar(String),
}

/// Failure to obtain a usable answer from the upstream API. The message is
/// relayed to the client as the `detail` of a `Request failed` error.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{0}")]
    Transport(String),

    #[error("Invalid JSON in upstream response: {0}")]
    Decode(String),

    #[error("Failed to build upstream client: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, ProxyError>;
