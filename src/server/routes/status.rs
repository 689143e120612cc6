use crate::server::router::ScribeState;
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub app: String,
    pub env: String,
    /// `"ok"` or `"error"`.
    pub database: &'static str,
}

/// GET /api/v1/status
///
/// Always 200; a failing database only flips the `database` field.
pub async fn status_handler(State(state): State<ScribeState>) -> Json<StatusResponse> {
    let database = match state.db.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            warn!(error = %e, "Database ping failed");
            "error"
        }
    };

    Json(StatusResponse {
        app: state.info.app_name.to_string(),
        env: state.info.env.to_string(),
        database,
    })
}

pub fn router() -> Router<ScribeState> {
    Router::new().route("/status", get(status_handler))
}
