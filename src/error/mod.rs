mod scribe;

pub use scribe::{ApiErrorBody, ApiErrorObject, ScribeError};

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
