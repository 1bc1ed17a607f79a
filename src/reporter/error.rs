use thiserror::Error;

/// Errors raised while delivering results to the main service.
///
/// These never leave the reporter: [`ResultReporter::report`](super::ResultReporter::report)
/// logs them and returns `false`.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configured base URL is unusable.
    #[error("invalid main service URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// Offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection, timeout or body encoding failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Target URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// Main service answered with a non-2xx status.
    #[error("main service returned {status} for {url}: {body}")]
    Status {
        /// Target URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },
}
