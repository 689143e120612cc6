use crate::db::{DbTemplate, TemplateCreate};
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

const MAX_TITLE_CHARS: usize = 255;

fn validate(create: &TemplateCreate) -> Result<(), ScribeError> {
    require_non_blank("title", &create.title)?;
    if create.title.chars().count() > MAX_TITLE_CHARS {
        return Err(ScribeError::BadRequest(format!(
            "title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    require_non_blank("template", &create.template)
}

/// POST /api/v1/templates
pub async fn create_template(
    State(state): State<ScribeState>,
    payload: Result<Json<TemplateCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<DbTemplate>), ScribeError> {
    let Json(create) = payload?;
    validate(&create)?;

    let template = state.db.create_template(create).await?;
    info!(id = template.id, "Template created");
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/v1/templates
pub async fn list_templates(
    State(state): State<ScribeState>,
) -> Result<Json<Vec<DbTemplate>>, ScribeError> {
    Ok(Json(state.db.list_templates().await?))
}

/// GET /api/v1/templates/{id}
pub async fn get_template(
    State(state): State<ScribeState>,
    Path(id): Path<i64>,
) -> Result<Json<DbTemplate>, ScribeError> {
    state
        .db
        .get_template(id)
        .await?
        .map(Json)
        .ok_or_else(|| ScribeError::NotFound(format!("Template with id: {id} not found")))
}

/// DELETE /api/v1/templates/{id}
pub async fn delete_template(
    State(state): State<ScribeState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ScribeError> {
    if !state.db.delete_template(id).await? {
        return Err(ScribeError::NotFound(format!(
            "Template with id: {id} not found"
        )));
    }
    info!(id, "Template deleted");
    Ok(Json(SuccessResponse::new("Template deleted successfully")))
}

pub fn router() -> Router<ScribeState> {
    Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/{id}", get(get_template).delete(delete_template))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str, template: &str) -> TemplateCreate {
        TemplateCreate {
            title: title.to_string(),
            template: template.to_string(),
            description: None,
        }
    }

    #[test]
    fn title_length_is_counted_in_chars() {
        assert!(validate(&create(&"é".repeat(255), "body")).is_ok());
        assert!(validate(&create(&"a".repeat(256), "body")).is_err());
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(matches!(
            validate(&create("", "body")),
            Err(ScribeError::BadRequest(_))
        ));
        assert!(matches!(
            validate(&create("feat: x", "  ")),
            Err(ScribeError::BadRequest(_))
        ));
    }
}
