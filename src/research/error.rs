use thiserror::Error;

/// Reasons an intake payload is rejected before any job exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// Body is not well-formed JSON.
    #[error("Invalid JSON")]
    MalformedPayload,

    /// Body is JSON but not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// `request_id` absent or unusable (see [`Identifier`](super::Identifier)).
    #[error("request_id is required")]
    MissingRequestId,

    /// `chronicles` absent, not a list, or empty.
    #[error("chronicles list is required")]
    MissingItems,

    #[error("invalid chronicle at index {index}: {reason}")]
    InvalidItem { index: usize, reason: String },
}
