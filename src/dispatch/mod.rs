//! Background job dispatch.
//!
//! The intake path only sees [`JobDispatcher`]: submit a job, get an
//! immediate yes or no. [`WorkerPool`] is the production implementation;
//! tests swap in [`RecordingDispatcher`].

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod pool;
pub mod stats;


pub use error::DispatchError;
#[cfg(any(test, feature = "mock"))]
pub use mock::RecordingDispatcher;
pub use pool::{PoolConfig, WorkerPool};
pub use stats::{DispatchSnapshot, DispatchStats};

use crate::research::ResearchJob;

/// Accepts jobs for background execution.
pub trait JobDispatcher: Send + Sync {
    /// Enqueues `job` without waiting for a worker. Errors mean the job was dropped.
    fn submit(&self, job: ResearchJob) -> Result<(), DispatchError>;

    fn snapshot(&self) -> DispatchSnapshot;
}
