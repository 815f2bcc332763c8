use super::with_state;
use crate::state::AppState;
use chrono::Utc;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    health_route(state.clone()).or(metrics_route(state))
}

fn health_route(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("health")
        .and(warp::get())
        .and(with_state(state))
        .map(|state: Arc<AppState>| {
            warp::reply::json(&serde_json::json!({
                "status": "healthy",
                "service": "paraph-proxy",
                "upstreamConfigured": state.config.upstream.api_key().is_some(),
                "uptimeSeconds": (Utc::now() - state.started_at).num_seconds(),
                "timestamp": Utc::now().to_rfc3339(),
            }))
        })
}

fn metrics_route(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("metrics")
        .and(warp::get())
        .and(with_state(state))
        .and_then(get_metrics)
}

async fn get_metrics(state: Arc<AppState>) -> Result<warp::reply::Response, Rejection> {
    match state.metrics.render() {
        Ok(text) => Ok(warp::reply::with_header(
            text,
            "content-type",
            "text/plain; version=0.0.4",
        )
        .into_response()),
        Err(e) => {
            tracing::error!("Failed to render metrics: {}", e);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "error": e.to_string()
                })),
                warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response())
        }
    }
}
