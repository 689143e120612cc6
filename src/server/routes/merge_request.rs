use crate::error::ScribeError;
use crate::merge_request::{GeneratedContent, MergeRequestInput};
use crate::server::router::ScribeState;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, extract::State, routing::post};

/// POST /api/v1/merge-request
pub async fn generate_merge_request(
    State(state): State<ScribeState>,
    payload: Result<Json<MergeRequestInput>, JsonRejection>,
) -> Result<Json<GeneratedContent>, ScribeError> {
    let Json(input) = payload?;
    let content = state.merge_requests.generate(&input).await?;
    Ok(Json(content))
}

pub fn router() -> Router<ScribeState> {
    Router::new().route("/merge-request", post(generate_merge_request))
}
