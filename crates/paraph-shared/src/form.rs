//! State machine behind the paraphrase form.
//!
//! Each submission moves the form through idle -> loading -> success|error.
//! Submissions are tagged with a [`RequestToken`]; only the completion of the
//! most recent submission is applied, older ones are dropped.

use crate::contract::{ParaphraseRequest, ResultType};
use crate::normalize::{normalize, NormalizedResult};
use serde_json::Value;

pub const BLANK_INPUT_ERROR: &str = "Please enter some text to paraphrase.";
pub const FALLBACK_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// How a call to the proxy settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The proxy answered. `body` is `None` when it was not valid JSON.
    Response { status: u16, body: Option<Value> },
    /// The proxy could not be reached.
    Transport(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub text: String,
    pub result_type: ResultType,
    pub loading: bool,
    pub error: String,
    pub result: Option<Value>,
    latest: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_result_type(&mut self, result_type: ResultType) {
        self.result_type = result_type;
    }

    /// Starts a submission. Returns the request to send, or `None` when the
    /// input is blank and no call must be made.
    pub fn submit(&mut self) -> Option<(RequestToken, ParaphraseRequest)> {
        self.error.clear();
        self.result = None;

        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            self.error = BLANK_INPUT_ERROR.to_string();
            return None;
        }

        let request = ParaphraseRequest::new(trimmed, self.result_type);
        self.latest += 1;
        self.loading = true;
        Some((RequestToken(self.latest), request))
    }

    /// Applies a settled call. Returns `false` if the token belongs to a
    /// superseded submission and the completion was ignored.
    pub fn complete(&mut self, token: RequestToken, completion: Completion) -> bool {
        if token.0 != self.latest {
            return false;
        }

        match completion {
            Completion::Response { status, body } if (200..300).contains(&status) => {
                self.result = body
                    .and_then(|mut body| body.get_mut("data").map(Value::take))
                    .filter(|data| !data.is_null());
            }
            Completion::Response { status, body } => {
                self.error = body
                    .as_ref()
                    .and_then(|body| body.get("error"))
                    .and_then(Value::as_str)
                    .filter(|message| !message.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Request failed ({status})"));
            }
            Completion::Transport(message) => {
                self.error = if message.is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                };
            }
        }

        self.loading = false;
        true
    }

    pub fn groups(&self) -> Option<NormalizedResult> {
        self.result.as_ref().map(normalize)
    }
}
