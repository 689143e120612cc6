use crate::config::Config;
use crate::db::DbActorHandle;
use crate::error::ScribeError;
use crate::gitlab::GitlabClient;
use crate::merge_request::MergeRequestService;
use crate::providers::LlmGateway;
use crate::server::routes::{merge_request, models, providers, status, templates};

use axum::{
    Json, Router,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use base64::Engine as _;
use rand::RngCore;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Labels reported by `/api/v1/status`.
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub app_name: Arc<str>,
    pub env: Arc<str>,
}

#[derive(Clone)]
pub struct ScribeState {
    pub db: DbActorHandle,
    pub merge_requests: MergeRequestService,
    pub info: AppInfo,
}

impl ScribeState {
    /// Builds the outbound clients from `cfg` and wires them around `db`.
    pub fn new(cfg: &Config, db: DbActorHandle) -> Result<Self, ScribeError> {
        let gateway = Arc::new(LlmGateway::from_config(cfg)?);
        let gitlab = Arc::new(GitlabClient::from_config(cfg)?);
        let merge_requests = MergeRequestService::new(db.clone(), gateway, gitlab, cfg);

        Ok(Self {
            db,
            merge_requests,
            info: AppInfo {
                app_name: Arc::from(cfg.basic.app_name.as_str()),
                env: Arc::from(cfg.basic.env.as_str()),
            },
        })
    }
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Hello worlds" }))
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

pub fn scribe_router(state: ScribeState) -> Router {
    let api_v1 = Router::new()
        .merge(status::router())
        .merge(providers::router())
        .merge(models::router())
        .merge(templates::router())
        .merge(merge_request::router());

    Router::new()
        .route("/", get(root_handler))
        .nest("/api/v1", api_v1)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
