//! HTTP gateway (Axum) for research intake.
//!
//! This module is primarily used by the `chronicle` server binary.

pub mod error;
pub mod handler;
pub mod state;


use std::any::Any;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{IntakeAck, intake_handler, stats_handler};
pub use state::HandlerState;

use crate::constants::{HEALTH_PATH, INTAKE_PATH, STATS_PATH};

pub fn create_router_with_state(state: HandlerState) -> Router {
    let intake_with_slash = format!("{}/", INTAKE_PATH);

    Router::new()
        .route(HEALTH_PATH, get(health_handler))
        .route(STATS_PATH, get(stats_handler))
        .route(INTAKE_PATH, post(intake_handler))
        .route(&intake_with_slash, post(intake_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
        .into_response()
}

/// Turns a handler panic into a 500 carrying the panic message.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unexpected internal error".to_string()
    };

    tracing::error!(error = %message, "Request handler panicked");
    GatewayError::Internal(message).into_response()
}
