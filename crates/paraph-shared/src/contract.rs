//! Wire types exchanged between the UI, the proxy and the upstream API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const ERR_METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const ERR_PAYLOAD_TOO_LARGE: &str = "Payload Too Large";
pub const ERR_MISSING_API_KEY: &str = "Missing RAPIDAPI_KEY environment variable";
pub const ERR_REQUEST_FAILED: &str = "Request failed";
pub const ERR_UPSTREAM: &str = "Upstream API error";

/// Paraphrase granularity requested from the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Single,
    #[default]
    Multiple,
}

impl ResultType {
    /// Collapses any JSON value onto a result type. Only the exact string
    /// `"single"` selects [`ResultType::Single`].
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("single") => ResultType::Single,
            _ => ResultType::Multiple,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResultType::Single => "single",
            ResultType::Multiple => "multiple",
        }
    }
}

impl std::str::FromStr for ResultType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "single" {
            ResultType::Single
        } else {
            ResultType::Multiple
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("'text' is required in request body")]
    MissingText,
}

/// Body the UI posts to `/api/paraph`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParaphraseRequest {
    pub text: String,
    pub result_type: ResultType,
}

impl ParaphraseRequest {
    pub fn new(text: impl Into<String>, result_type: ResultType) -> Self {
        Self {
            text: text.into(),
            result_type,
        }
    }

    /// Parses a raw request body. An empty body counts as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, RequestError> {
        if body.is_empty() {
            return Self::from_payload(&Value::Object(Map::new()));
        }
        let payload: Value =
            serde_json::from_slice(body).map_err(|_| RequestError::InvalidJson)?;
        Self::from_payload(&payload)
    }

    /// Validates an already decoded payload. `text` is kept as sent; only
    /// its blankness is checked.
    pub fn from_payload(payload: &Value) -> Result<Self, RequestError> {
        let text = payload
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .ok_or(RequestError::MissingText)?;

        Ok(Self {
            text: text.to_string(),
            result_type: ResultType::from_value(payload.get("resultType")),
        })
    }

    pub fn to_upstream(&self) -> UpstreamRequest {
        UpstreamRequest {
            text: self.text.clone(),
            result_type: self.result_type,
        }
    }
}

/// Body forwarded to the upstream paraphrase API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamRequest {
    pub text: String,
    pub result_type: ResultType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxySuccess {
    pub ok: bool,
    pub data: Value,
}

impl ProxySuccess {
    pub fn new(data: Value) -> Self {
        Self { ok: true, data }
    }
}

/// Structured error returned by every failing proxy path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: None,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn upstream(status: u16, detail: Value) -> Self {
        Self {
            error: ERR_UPSTREAM.to_string(),
            status: Some(status),
            detail: Some(detail),
        }
    }
}

impl From<RequestError> for ErrorBody {
    fn from(err: RequestError) -> Self {
        Self::new(err.to_string())
    }
}
