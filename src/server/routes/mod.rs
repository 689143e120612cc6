pub mod merge_request;
pub mod models;
pub mod providers;
pub mod status;
pub mod templates;

use crate::error::ScribeError;
use serde::Serialize;

/// Acknowledgement body for deletes.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: &'static str,
}

impl SuccessResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), ScribeError> {
    if value.trim().is_empty() {
        return Err(ScribeError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}
