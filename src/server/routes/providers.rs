use crate::db::{DbProvider, ProviderCreate};
use crate::error::ScribeError;
use crate::server::router::ScribeState;
use crate::server::routes::{SuccessResponse, require_non_blank};

use axum::extract::rejection::JsonRejection;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::info;

/// POST /api/v1/ai-provider
pub async fn create_provider(
    State(state): State<ScribeState>,
    payload: Result<Json<ProviderCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<DbProvider>), ScribeError> {
    let Json(create) = payload?;
    require_non_blank("name", &create.name)?;

    let provider = state.db.create_provider(create).await?;
    info!(id = provider.id, name = %provider.name, kind = %provider.kind, "Provider created");
    Ok((StatusCode::CREATED, Json(provider)))
}

/// GET /api/v1/ai-provider
pub async fn list_providers(
    State(state): State<ScribeState>,
) -> Result<Json<Vec<DbProvider>>, ScribeError> {
    Ok(Json(state.db.list_providers().await?))
}

/// GET /api/v1/ai-provider/{id}
pub async fn get_provider(
    State(state): State<ScribeState>,
    Path(id): Path<i64>,
) -> Result<Json<DbProvider>, ScribeError> {
    state
        .db
        .get_provider(id)
        .await?
        .map(Json)
        .ok_or_else(|| ScribeError::NotFound(format!("Provider with id: {id} not found")))
}

/// DELETE /api/v1/ai-provider/{id}
pub async fn delete_provider(
    State(state): State<ScribeState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ScribeError> {
    if !state.db.delete_provider(id).await? {
        return Err(ScribeError::NotFound(format!(
            "Provider with id: {id} not found"
        )));
    }
    info!(id, "Provider deleted");
    Ok(Json(SuccessResponse::new("Provider deleted successfully")))
}

pub fn router() -> Router<ScribeState> {
    Router::new()
        .route("/ai-provider", get(list_providers).post(create_provider))
        .route("/ai-provider/{id}", get(get_provider).delete(delete_provider))
}
