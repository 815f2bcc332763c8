//! Paraph Shared Types
//!
//! This crate contains the request/response contract shared by the
//! proxy server and the browser UI, the normalization of upstream
//! paraphrase payloads, and the form controller driving the UI.

pub mod contract;
pub mod form;
pub mod normalize;

pub use contract::{
    ErrorBody, ParaphraseRequest, ProxySuccess, RequestError, ResultType, UpstreamRequest,
};
pub use form::{Completion, FormState, RequestToken};
pub use normalize::{normalize, Group, NormalizedResult, RawResult};
