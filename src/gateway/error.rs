use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::CHRONICLE_ERROR_HEADER;
use crate::dispatch::DispatchError;
use crate::research::IntakeError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("{0}")]
    Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl GatewayError {
    /// Status code and the machine-readable kind sent in [`CHRONICLE_ERROR_HEADER`].
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::Intake(e) => match e {
                IntakeError::MalformedPayload | IntakeError::NotAnObject => {
                    (StatusCode::BAD_REQUEST, "malformed_payload")
                }
                IntakeError::MissingRequestId => (StatusCode::BAD_REQUEST, "missing_request_id"),
                IntakeError::MissingItems => (StatusCode::BAD_REQUEST, "missing_items"),
                IntakeError::InvalidItem { .. } => (StatusCode::BAD_REQUEST, "invalid_item"),
            },
            GatewayError::Dispatch(_) => (StatusCode::SERVICE_UNAVAILABLE, "queue_unavailable"),
            GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, kind) = self.classify();

        let mut headers = HeaderMap::new();
        headers.insert(CHRONICLE_ERROR_HEADER, HeaderValue::from_static(kind));

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, headers, body).into_response()
    }
}
