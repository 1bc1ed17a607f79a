//! Chronicle research library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Intake
//! - [`ResearchRequest`], [`ResearchItem`], [`Identifier`], [`ChronicleId`] - Validated request model
//! - [`IntakeError`] - Why a request was rejected
//! - [`create_router_with_state`], [`HandlerState`] - HTTP gateway
//!
//! ## Background processing
//! - [`WorkerPool`], [`PoolConfig`], [`JobDispatcher`] - Bounded job queue and workers
//! - [`JobProcessor`], [`JobOutcome`] - Score-then-report pipeline for one job
//! - [`Scorer`], [`RandomScorer`] - Per-chronicle accuracy
//! - [`ResultReporter`], [`HttpReporter`] - Delivery to the main service
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - Environment-backed settings
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod gateway;
pub mod processor;
pub mod reporter;
pub mod research;
pub mod scoring;

pub use config::{Config, ConfigError};
pub use constants::round_accuracy;
#[cfg(any(test, feature = "mock"))]
pub use dispatch::RecordingDispatcher;
pub use dispatch::{
    DispatchError, DispatchSnapshot, DispatchStats, JobDispatcher, PoolConfig, WorkerPool,
};
pub use gateway::{GatewayError, HandlerState, IntakeAck, create_router_with_state};
pub use processor::{JobOutcome, JobProcessor};
#[cfg(any(test, feature = "mock"))]
pub use reporter::RecordingReporter;
pub use reporter::{HttpReporter, ReportError, ReporterConfig, ResultReporter};
pub use research::{
    ChronicleId, Identifier, IntakeError, ItemResult, ResearchItem, ResearchJob, ResearchRequest,
    ResultBatch,
};
#[cfg(any(test, feature = "mock"))]
pub use scoring::{FailingScorer, FixedScorer};
pub use scoring::{RandomScorer, Scorer, ScoringError};
