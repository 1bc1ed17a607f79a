//! Delivery of result batches to the main service.
//!
//! Delivery is best effort: one attempt, a bounded timeout, and failures are
//! reduced to `false` after being logged. Callers never see an error.

pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::HttpReporter;
pub use config::{DEFAULT_MAIN_SERVICE_URL, ReporterConfig};
pub use error::ReportError;
#[cfg(any(test, feature = "mock"))]
pub use mock::RecordingReporter;

use async_trait::async_trait;

use crate::research::{Identifier, ItemResult};

/// Sink for finished result batches.
#[async_trait]
pub trait ResultReporter: Send + Sync {
    /// Delivers `results` for `request_id`. Returns `true` only on confirmed success.
    async fn report(&self, request_id: &Identifier, results: &[ItemResult]) -> bool;
}
