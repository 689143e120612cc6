#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Query, State},
    http::{HeaderMap, Request, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

pub const GITLAB_TOKEN: &str = "glpat-test";
pub const OPEN_ROUTER_KEY: &str = "or-key";
pub const CEREBRAS_KEY: &str = "cb-key";

pub fn temp_database_url(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "mrscribe-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    format!("sqlite:{}", temp_path.display())
}

pub async fn serve_stub(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server failed");
    });
    addr
}

/// Fake GitLab REST v4 that accepts only [`GITLAB_TOKEN`].
#[derive(Clone)]
pub struct GitlabStub {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicUsize>,
    pub compare_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

#[derive(Clone)]
struct GitlabStubState {
    hits: Arc<AtomicUsize>,
    compare_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    compare: Arc<Value>,
}

fn token_ok(headers: &HeaderMap) -> bool {
    headers
        .get("private-token")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == GITLAB_TOKEN)
}

async fn gitlab_project(
    State(state): State<GitlabStubState>,
    headers: HeaderMap,
    axum::extract::Path(id): axum::extract::Path<i64>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if !token_ok(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "401 Unauthorized" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": id,
            "name": "shop",
            "path_with_namespace": "acme/shop",
            "web_url": "https://gitlab.example.com/acme/shop"
        })),
    )
}

async fn gitlab_compare(
    State(state): State<GitlabStubState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if !token_ok(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "401 Unauthorized" })),
        );
    }
    state
        .compare_queries
        .lock()
        .expect("compare query lock")
        .push(query);
    (StatusCode::OK, Json(state.compare.as_ref().clone()))
}

pub async fn spawn_gitlab(compare: Value) -> GitlabStub {
    let hits = Arc::new(AtomicUsize::new(0));
    let compare_queries = Arc::new(Mutex::new(Vec::new()));
    let state = GitlabStubState {
        hits: hits.clone(),
        compare_queries: compare_queries.clone(),
        compare: Arc::new(compare),
    };

    let router = Router::new()
        .route("/api/v4/projects/{id}", get(gitlab_project))
        .route(
            "/api/v4/projects/{id}/repository/compare",
            get(gitlab_compare),
        )
        .with_state(state);

    GitlabStub {
        addr: serve_stub(router).await,
        hits,
        compare_queries,
    }
}

/// One modified file with a ten-line patch and a single commit.
pub fn small_compare() -> Value {
    let patch = (1..=10)
        .map(|i| format!("+line {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    json!({
        "commits": [{
            "id": "a1b2c3",
            "message": "fix: bug",
            "author_name": "Dev",
            "created_at": "2024-05-01T10:00:00Z"
        }],
        "diffs": [{
            "old_path": "src/app.rs",
            "new_path": "src/app.rs",
            "new_file": false,
            "renamed_file": false,
            "deleted_file": false,
            "diff": patch
        }],
        "compare_timeout": false,
        "compare_same_ref": false
    })
}

/// Fake OpenAI-compatible chat endpoint mounted at `/v1/chat/completions`.
#[derive(Clone)]
pub struct LlmStub {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicUsize>,
    /// `(authorization header, request body)` per call.
    pub requests: Arc<Mutex<Vec<(String, Value)>>>,
}

#[derive(Clone)]
struct LlmStubState {
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
    /// Replayed in order; the last entry repeats.
    replies: Arc<Vec<(StatusCode, Value)>>,
}

async fn chat_completions(
    State(state): State<LlmStubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let n = state.hits.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state
        .requests
        .lock()
        .expect("llm request lock")
        .push((auth, body));

    let idx = n.min(state.replies.len() - 1);
    let (status, reply) = state.replies[idx].clone();
    (status, Json(reply))
}

pub async fn spawn_llm(replies: Vec<(StatusCode, Value)>) -> LlmStub {
    assert!(!replies.is_empty(), "stub needs at least one reply");
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = LlmStubState {
        hits: hits.clone(),
        requests: requests.clone(),
        replies: Arc::new(replies),
    };

    let router = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(state);

    LlmStub {
        addr: serve_stub(router).await,
        hits,
        requests,
    }
}

pub fn chat_reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "model": "gpt-x",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Config whose GitLab and both LLM backends point at the given stubs.
pub fn stub_config(database_url: &str, gitlab: SocketAddr, llm: SocketAddr) -> mrscribe::config::Config {
    let mut cfg = mrscribe::config::Config::default();
    cfg.basic.database_url = database_url.to_string();
    cfg.gitlab.base_url = Url::parse(&format!("http://{gitlab}")).expect("gitlab stub url");

    let llm_base = Url::parse(&format!("http://{llm}/v1")).expect("llm stub url");
    cfg.providers.open_router.base_url = llm_base.clone();
    cfg.providers.open_router.api_key = OPEN_ROUTER_KEY.to_string();
    cfg.providers.cerebras.base_url = llm_base;
    cfg.providers.cerebras.api_key = CEREBRAS_KEY.to_string();
    cfg.providers.defaults.connect_timeout_secs = 2;
    cfg.providers.defaults.request_timeout_secs = 10;
    cfg
}

pub async fn build_app(cfg: &mrscribe::config::Config) -> (axum::Router, mrscribe::db::DbActorHandle) {
    let db = mrscribe::db::spawn(&cfg.basic.database_url)
        .await
        .expect("failed to spawn DbActor");
    let state =
        mrscribe::server::ScribeState::new(cfg, db.clone()).expect("failed to build state");
    (mrscribe::server::scribe_router(state), db)
}

pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
