use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid scorer configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },

    /// Scorer produced a value outside `[0.0, 1.0]` (or NaN).
    #[error("accuracy {value} is outside [0.0, 1.0]")]
    OutOfRange { value: f64 },

    /// Scorer panicked or its blocking task was cancelled.
    #[error("scoring task aborted: {reason}")]
    TaskAborted { reason: String },
}
