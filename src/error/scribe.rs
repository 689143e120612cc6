use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

use super::IsRetryable;

#[derive(Debug, ThisError)]
pub enum ScribeError {
    /// A referenced provider, model or template does not exist (or was soft-deleted).
    #[error("{0}")]
    NotFound(String),

    /// Caller input is invalid or inconsistent.
    #[error("{0}")]
    BadRequest(String),

    /// The request body could not be decoded.
    #[error("{0}")]
    InvalidRequest(String),

    /// Unique-name collision on create.
    #[error("{0}")]
    Conflict(String),

    /// The LLM gateway produced no content.
    #[error("LLM call failed, retry later")]
    LlmUnavailable,

    /// The LLM answered but without the expected `[<section>:start]`/`[<section>:end]` pair.
    #[error("LLM output is missing the {section} section")]
    ContractViolation { section: &'static str },

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<JsonRejection> for ScribeError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::BytesRejection(e) => {
                ScribeError::UnexpectedError(format!("Failed to read request body: {e}"))
            }
            other => ScribeError::InvalidRequest(other.body_text()),
        }
    }
}

impl IntoResponse for ScribeError {
    fn into_response(self) -> Response {
        let (status, error_body) = match self {
            ScribeError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ApiErrorObject::new("NOT_FOUND", message),
            ),

            ScribeError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject::new("BAD_REQUEST", message),
            ),

            ScribeError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject::new("INVALID_REQUEST", message),
            ),

            ScribeError::Conflict(message) => (
                StatusCode::CONFLICT,
                ApiErrorObject::new("CONFLICT", message),
            ),

            ScribeError::LlmUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorObject::new("LLM_CALL_FAILED", "LLM call failed, retry later"),
            ),

            ScribeError::ContractViolation { section } => {
                tracing::warn!(section, "LLM output violated the tagged output contract");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorObject::new(
                        "INVALID_LLM_OUTPUT",
                        format!("LLM output did not contain a {section} section, retry later"),
                    ),
                )
            }

            ScribeError::DatabaseError(_)
            | ScribeError::RactorError(_)
            | ScribeError::UnexpectedError(_) => {
                tracing::error!(error = %self, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorObject::new("INTERNAL_ERROR", "An internal server error occurred."),
                )
            }

            ScribeError::JsonError(e) => {
                tracing::warn!(error = %e, "Failed to parse upstream response");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorObject::new(
                        "BAD_UPSTREAM_PAYLOAD",
                        "Failed to parse upstream response.",
                    ),
                )
            }

            ScribeError::ReqwestError(ref e) => {
                tracing::warn!(error = %e, status = ?e.status(), "Upstream reqwest error");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorObject::new("UPSTREAM_ERROR", "Upstream service error."),
                )
            }

            ScribeError::UrlError(e) => {
                tracing::warn!(error = %e, "Upstream URL error");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorObject::new("UPSTREAM_ERROR", "Upstream service error."),
                )
            }

            ScribeError::UpstreamStatus(code) => {
                let (status, err_code, msg) = match code {
                    StatusCode::TOO_MANY_REQUESTS => (
                        code,
                        "RATE_LIMIT",
                        "Upstream rate limit exceeded.",
                    ),
                    StatusCode::UNAUTHORIZED => {
                        (code, "UNAUTHORIZED", "Upstream authentication failed.")
                    }
                    StatusCode::FORBIDDEN => (code, "FORBIDDEN", "Upstream permission denied."),
                    StatusCode::NOT_FOUND => (code, "NOT_FOUND", "Upstream resource not found."),
                    _ => (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "An upstream error occurred.",
                    ),
                };
                (status, ApiErrorObject::new(err_code, msg))
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Debug, Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiErrorObject {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}

impl IsRetryable for ScribeError {
    fn is_retryable(&self) -> bool {
        match self {
            ScribeError::ReqwestError(e) => !e.is_decode() && !e.is_builder(),
            ScribeError::UpstreamStatus(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ScribeError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let json = serde_json::from_slice(&body).expect("error body is JSON");
        (status, json)
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let (status, body) =
            render(ScribeError::NotFound("Template with id: 5 not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Template with id: 5 not found");

        let (status, body) = render(ScribeError::BadRequest("mismatch".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "mismatch");
    }

    #[tokio::test]
    async fn llm_failure_is_an_internal_error() {
        let (status, body) = render(ScribeError::LlmUnavailable).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "LLM_CALL_FAILED");
        assert_eq!(body["error"]["message"], "LLM call failed, retry later");
    }

    #[tokio::test]
    async fn upstream_status_is_mirrored_only_for_known_classes() {
        let (status, body) = render(ScribeError::UpstreamStatus(StatusCode::UNAUTHORIZED)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, body) =
            render(ScribeError::UpstreamStatus(StatusCode::INTERNAL_SERVER_ERROR)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn internal_details_are_not_leaked() {
        let (status, body) =
            render(ScribeError::RactorError("mailbox closed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal server error occurred.");
    }

    #[test]
    fn only_transient_upstream_failures_are_retryable() {
        assert!(ScribeError::UpstreamStatus(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(ScribeError::UpstreamStatus(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!ScribeError::UpstreamStatus(StatusCode::UNAUTHORIZED).is_retryable());
        assert!(!ScribeError::LlmUnavailable.is_retryable());
        assert!(!ScribeError::NotFound("x".into()).is_retryable());
    }
}
