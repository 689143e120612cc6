use crate::db::{DbModel, ModelCreate};
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

/// POST /api/v1/ai-model
///
/// 404 when the provider does not exist, 409 when the name is taken.
pub async fn create_model(
    State(state): State<ScribeState>,
    payload: Result<Json<ModelCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<DbModel>), ScribeError> {
    let Json(create) = payload?;
    require_non_blank("name", &create.name)?;

    let model = state.db.create_model(create).await?;
    info!(id = model.id, name = %model.name, provider_id = model.provider_id, "Model created");
    Ok((StatusCode::CREATED, Json(model)))
}

/// GET /api/v1/ai-model
pub async fn list_models(
    State(state): State<ScribeState>,
) -> Result<Json<Vec<DbModel>>, ScribeError> {
    Ok(Json(state.db.list_models().await?))
}

/// GET /api/v1/ai-model/{id}
pub async fn get_model(
    State(state): State<ScribeState>,
    Path(id): Path<i64>,
) -> Result<Json<DbModel>, ScribeError> {
    state
        .db
        .get_model(id)
        .await?
        .map(Json)
        .ok_or_else(|| ScribeError::NotFound(format!("Model with id: {id} not found")))
}

/// DELETE /api/v1/ai-model/{id}
pub async fn delete_model(
    State(state): State<ScribeState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ScribeError> {
    if !state.db.delete_model(id).await? {
        return Err(ScribeError::NotFound(format!("Model with id: {id} not found")));
    }
    info!(id, "Model deleted");
    Ok(Json(SuccessResponse::new("Model deleted successfully")))
}

pub fn router() -> Router<ScribeState> {
    Router::new()
        .route("/ai-model", get(list_models).post(create_model))
        .route("/ai-model/{id}", get(get_model).delete(delete_model))
}
