//! `/api/paraph`: forwards paraphrase requests upstream with the server-side
//! credential and reshapes the answer for the UI.

use super::with_state;
use crate::state::AppState;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use paraph_shared::contract::{
    ERR_METHOD_NOT_ALLOWED, ERR_MISSING_API_KEY, ERR_PAYLOAD_TOO_LARGE, ERR_REQUEST_FAILED,
};
use paraph_shared::{ErrorBody, ParaphraseRequest, ProxySuccess, RequestError};
use serde::Serialize;
use std::sync::Arc;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;
use warp::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, ALLOW,
};
use warp::http::{HeaderMap, HeaderValue, Method, StatusCode};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const DEFAULT_ALLOWED_HEADERS: &str = "Content-Type";

/// Largest request body buffered before answering 413.
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Request body as read off the wire, capped at [`MAX_BODY_BYTES`].
#[derive(Debug)]
enum RequestBody {
    Complete(Bytes),
    TooLarge,
    Unreadable(String),
}

pub fn route(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("api" / "paraph")
        .and(warp::method())
        .and(warp::header::headers_cloned().map(|headers: HeaderMap| {
            headers.get(ACCESS_CONTROL_REQUEST_HEADERS).cloned()
        }))
        .and(warp::body::stream().and_then(read_body))
        .and(with_state(state))
        .and_then(handle)
}

async fn read_body<S, B>(stream: S) -> Result<RequestBody, Rejection>
where
    S: Stream<Item = Result<B, warp::Error>> + Send,
    B: Buf + Send,
{
    tokio::pin!(stream);
    let mut body = BytesMut::new();

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => {
                if body.len() + chunk.remaining() > MAX_BODY_BYTES {
                    return Ok(RequestBody::TooLarge);
                }
                body.put(chunk);
            }
            Err(e) => return Ok(RequestBody::Unreadable(e.to_string())),
        }
    }

    Ok(RequestBody::Complete(body.freeze()))
}

async fn handle(
    method: Method,
    requested_headers: Option<HeaderValue>,
    body: RequestBody,
    state: Arc<AppState>,
) -> Result<Response, Rejection> {
    let response = match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => {
            let span = tracing::info_span!("paraph", request_id = %Uuid::new_v4());
            let response = proxy_paraphrase(&body, &state).instrument(span).await;
            state.metrics.record_response(response.status().as_u16());
            response
        }
        other => {
            debug!(method = %other, "Rejecting unsupported method");
            let mut response =
                json_reply(&ErrorBody::new(ERR_METHOD_NOT_ALLOWED), StatusCode::METHOD_NOT_ALLOWED);
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
            response
        }
    };

    Ok(with_cors(response, requested_headers))
}

async fn proxy_paraphrase(body: &RequestBody, state: &AppState) -> Response {
    state.metrics.requests_total.inc();

    let Some(api_key) = state.config.upstream.api_key() else {
        error!("No upstream API key configured");
        return json_reply(
            &ErrorBody::new(ERR_MISSING_API_KEY),
            StatusCode::INTERNAL_SERVER_ERROR,
        );
    };

    let parsed = match body {
        RequestBody::Complete(bytes) => ParaphraseRequest::from_body(bytes),
        RequestBody::TooLarge => {
            warn!(limit = MAX_BODY_BYTES, "Rejecting oversized request body");
            return json_reply(
                &ErrorBody::new(ERR_PAYLOAD_TOO_LARGE),
                StatusCode::PAYLOAD_TOO_LARGE,
            );
        }
        RequestBody::Unreadable(e) => {
            debug!("Failed to read request body: {}", e);
            Err(RequestError::InvalidJson)
        }
    };

    let request = match parsed {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejecting request: {}", e);
            return json_reply(&ErrorBody::from(e), StatusCode::BAD_REQUEST);
        }
    };

    info!(
        result_type = request.result_type.as_str(),
        chars = request.text.chars().count(),
        "Forwarding paraphrase request"
    );

    let timer = state.metrics.upstream_duration.start_timer();
    let result = state
        .upstream
        .paraphrase(api_key, &request.to_upstream())
        .await;
    timer.observe_duration();

    match result {
        Ok(reply) if reply.is_success() => {
            info!(status = reply.status, "Upstream succeeded");
            json_reply(&ProxySuccess::new(reply.body), StatusCode::OK)
        }
        Ok(reply) => {
            state.metrics.upstream_errors_total.inc();
            warn!(status = reply.status, "Upstream returned an error status");
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
            json_reply(&ErrorBody::upstream(reply.status, reply.body), status)
        }
        Err(e) => {
            state.metrics.upstream_errors_total.inc();
            error!("Upstream request failed: {}", e);
            json_reply(
                &ErrorBody::new(ERR_REQUEST_FAILED).with_detail(e.to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

fn json_reply<T: Serialize>(body: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}

/// Attaches the CORS headers every answer of this route carries.
fn with_cors(mut response: Response, requested_headers: Option<HeaderValue>) -> Response {
    let allow_headers = requested_headers
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOWED_HEADERS));

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
    response
}

#[cfg(test)]
#[path = "paraph_tests.rs"]
mod paraph_tests;
