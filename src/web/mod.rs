use crate::error::{ConfigError, Result};
use crate::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use warp::filters::BoxedFilter;
use warp::{Filter, Rejection};

pub mod api;
pub mod paraph;

pub async fn start_server(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.bind_address();

    tracing::info!("Starting paraphrase proxy on {}", addr);

    let routes = create_routes(state.clone());

    let addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| ConfigError::Parse(format!("Invalid server address: {}", e)))?;

    // Start server with graceful shutdown
    let mut shutdown_rx = state.shutdown_tx.subscribe();
    let (_, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async move {
        let _ = shutdown_rx.recv().await;
    });

    server.await;

    tracing::info!("Paraphrase proxy stopped");
    Ok(())
}

pub fn create_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl warp::Reply, Error = Rejection> + Clone {
    let static_dir = state.config.server.static_dir.clone();

    paraph::route(state.clone())
        .or(api::routes(state))
        .or(static_routes(static_dir))
        .with(warp::trace::request())
}

/// Serves the built UI when a directory is configured, rejects otherwise.
fn static_routes(static_dir: Option<PathBuf>) -> BoxedFilter<(warp::fs::File,)> {
    match static_dir {
        Some(dir) => {
            let index = warp::path::end()
                .and(warp::get())
                .and(warp::fs::file(dir.join("index.html")));
            index.or(warp::fs::dir(dir)).unify().boxed()
        }
        None => warp::any()
            .and_then(|| async { Err::<warp::fs::File, Rejection>(warp::reject::not_found()) })
            .boxed(),
    }
}

pub(crate) fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}
