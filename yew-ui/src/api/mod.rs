pub mod clipboard;

use gloo_net::http::Request;
use paraph_shared::{Completion, ParaphraseRequest};
use serde_json::Value;

const API_BASE: &str = "/api";

/// Posts the request to the proxy. Never fails: transport problems come
/// back as [`Completion::Transport`].
pub async fn paraphrase(request: &ParaphraseRequest) -> Completion {
    match send(request).await {
        Ok((status, body)) => Completion::Response { status, body },
        Err(e) => Completion::Transport(e.to_string()),
    }
}

async fn send(request: &ParaphraseRequest) -> Result<(u16, Option<Value>), gloo_net::Error> {
    let response = Request::post(&format!("{}/paraph", API_BASE))
        .json(request)?
        .send()
        .await?;

    let status = response.status();
    // Error pages may not be JSON; the status alone is enough then
    let body = response.json::<Value>().await.ok();
    Ok((status, body))
}
