use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Bounded queue has no free slot; the job was not accepted.
    #[error("job queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    /// Pool is shutting down and no longer accepts jobs.
    #[error("job dispatcher is shutting down")]
    Closed,

    #[error("invalid worker pool configuration: {reason}")]
    InvalidConfig { reason: String },
}
