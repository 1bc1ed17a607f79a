use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::research::{Identifier, ResearchRequest};

#[derive(Debug, Serialize)]
pub struct IntakeAck {
    pub status: &'static str,
    pub message: String,
    pub request_id: Identifier,
    pub chronicles_count: usize,
}

/// Validates a research request and queues it. Never waits for processing.
#[instrument(skip(state, body), fields(request_id = tracing::field::Empty))]
pub async fn intake_handler(
    State(state): State<HandlerState>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let request = ResearchRequest::from_json_bytes(&body).inspect_err(|e| {
        debug!(error = %e, body_len = body.len(), "Rejected research request");
    })?;
    tracing::Span::current().record("request_id", tracing::field::display(&request.request_id));

    let request_id = request.request_id.clone();
    let chronicles_count = request.items.len();
    let job = request.into_job();
    let job_id = job.job_id;

    state.dispatcher.submit(job)?;

    info!(%job_id, chronicles = chronicles_count, "Research request accepted");

    let ack = IntakeAck {
        status: "success",
        message: format!("Processing started for request {}", request_id),
        request_id,
        chronicles_count,
    };
    Ok((StatusCode::OK, Json(ack)).into_response())
}

#[instrument(skip(state))]
pub async fn stats_handler(State(state): State<HandlerState>) -> Response {
    (StatusCode::OK, Json(state.dispatcher.snapshot())).into_response()
}
