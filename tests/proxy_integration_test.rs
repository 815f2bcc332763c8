use paraph_proxy::config::Config;
use paraph_proxy::state::AppState;
use paraph_proxy::web;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use warp::http::{HeaderMap, StatusCode};
use warp::test::request;
use warp::Filter;

const TEST_KEY: &str = "integration-key";
const TEST_HOST: &str = "paraphrase.test.local";

#[derive(Debug, Clone)]
struct Captured {
    key: Option<String>,
    host: Option<String>,
    body: Value,
}

type Captures = Arc<Mutex<Vec<Captured>>>;

/// Fake upstream answering every call with the given status, content type
/// and body, recording what it received.
fn spawn_upstream(
    status: u16,
    content_type: &'static str,
    body: &'static str,
) -> (SocketAddr, Captures) {
    let captures: Captures = Arc::new(Mutex::new(Vec::new()));
    let sink = captures.clone();

    let route = warp::path!("dev" / "paraphrase")
        .and(warp::post())
        .and(warp::header::headers_cloned())
        .and(warp::body::json())
        .map(move |headers: HeaderMap, received: Value| {
            let header = |name: &str| {
                headers
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string)
            };
            sink.lock().unwrap().push(Captured {
                key: header("x-rapidapi-key"),
                host: header("x-rapidapi-host"),
                body: received,
            });
            warp::reply::with_status(
                warp::reply::with_header(body, "content-type", content_type),
                StatusCode::from_u16(status).unwrap(),
            )
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, captures)
}

fn create_test_config(upstream_url: String) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.upstream.url = upstream_url;
    config.upstream.host = TEST_HOST.to_string();
    config.upstream.api_key = Some(TEST_KEY.to_string());
    config.upstream.timeout_ms = Some(5_000);
    config
}

fn create_test_state(upstream_url: String) -> Arc<AppState> {
    let (state, _) = AppState::new(create_test_config(upstream_url)).unwrap();
    state
}

async fn post_paraph(state: Arc<AppState>, body: Value) -> (u16, Value) {
    let routes = web::create_routes(state);
    let resp = request()
        .method("POST")
        .path("/api/paraph")
        .header("content-type", "application/json")
        .body(body.to_string())
        .reply(&routes)
        .await;
    let parsed = serde_json::from_slice(resp.body()).unwrap();
    (resp.status().as_u16(), parsed)
}

#[tokio::test]
async fn test_json_array_is_passed_through() {
    let (addr, captures) = spawn_upstream(200, "application/json", r#"["a","b"]"#);
    let state = create_test_state(format!("http://{addr}/dev/paraphrase"));

    let (status, body) = post_paraph(
        state,
        json!({ "text": "Hello there.", "resultType": "single" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "ok": true, "data": ["a", "b"] }));

    let captured = captures.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].key.as_deref(), Some(TEST_KEY));
    assert_eq!(captured[0].host.as_deref(), Some(TEST_HOST));
    assert_eq!(
        captured[0].body,
        json!({ "text": "Hello there.", "result_type": "single" })
    );
}

#[tokio::test]
async fn test_unknown_result_type_is_forwarded_as_multiple() {
    let (addr, captures) =
        spawn_upstream(200, "application/json; charset=utf-8", r#"[["x"],["y"]]"#);
    let state = create_test_state(format!("http://{addr}/dev/paraphrase"));

    let (status, body) =
        post_paraph(state, json!({ "text": "One. Two.", "resultType": "bogus" })).await;

    assert_eq!(status, 200);
    assert_eq!(body["data"], json!([["x"], ["y"]]));
    assert_eq!(captures.lock().unwrap()[0].body["result_type"], "multiple");
}

#[tokio::test]
async fn test_rate_limit_is_relayed() {
    let (addr, _) = spawn_upstream(429, "application/json", r#"{"msg":"rate limited"}"#);
    let state = create_test_state(format!("http://{addr}/dev/paraphrase"));

    let (status, body) = post_paraph(state, json!({ "text": "Hello there." })).await;

    assert_eq!(status, 429);
    assert_eq!(
        body,
        json!({
            "error": "Upstream API error",
            "status": 429,
            "detail": { "msg": "rate limited" }
        })
    );
}

#[tokio::test]
async fn test_non_json_upstream_body_is_kept_as_text() {
    let (addr, _) = spawn_upstream(502, "text/html", "<h1>Bad Gateway</h1>");
    let state = create_test_state(format!("http://{addr}/dev/paraphrase"));

    let (status, body) = post_paraph(state, json!({ "text": "Hello there." })).await;

    assert_eq!(status, 502);
    assert_eq!(body["detail"], "<h1>Bad Gateway</h1>");
}

#[tokio::test]
async fn test_undecodable_json_is_request_failed() {
    let (addr, _) = spawn_upstream(200, "application/json", "{not json");
    let state = create_test_state(format!("http://{addr}/dev/paraphrase"));

    let (status, body) = post_paraph(state, json!({ "text": "Hello there." })).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Request failed");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_unreachable_upstream_is_request_failed() {
    // Grab a free port and release it so nothing is listening there
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let state = create_test_state(format!("http://{addr}/dev/paraphrase"));

    let (status, body) = post_paraph(state, json!({ "text": "Hello there." })).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Request failed");
    assert!(!body["detail"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_errors_do_not_reach_upstream() {
    let (addr, captures) = spawn_upstream(200, "application/json", r#""unused""#);
    let state = create_test_state(format!("http://{addr}/dev/paraphrase"));

    let (status, body) = post_paraph(state, json!({})).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "'text' is required in request body" }));
    assert!(captures.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_route_is_mounted() {
    let state = create_test_state("http://127.0.0.1:9/dev/paraphrase".to_string());
    let routes = web::create_routes(state);

    let resp = request().method("GET").path("/health").reply(&routes).await;

    assert_eq!(resp.status(), 200);
}
