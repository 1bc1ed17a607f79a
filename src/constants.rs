//! Cross-cutting, shared constants.
//!
//! Wire paths and header names live here so the gateway, the reporter and the
//! integration tests agree on them.

/// Inbound intake route.
pub const INTAKE_PATH: &str = "/api/async/process-chronicle-research";

/// Liveness route.
pub const HEALTH_PATH: &str = "/healthz";

/// Dispatcher counters route.
pub const STATS_PATH: &str = "/stats";

/// Path segments appended to the main service base URL, around the request id.
pub const RESULTS_COLLECTION_SEGMENTS: [&str; 2] = ["api", "ChronicleRequestList"];
pub const RESULTS_UPDATE_SEGMENT: &str = "update-results";

/// Header carrying the shared secret on outbound calls.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Response header naming the error kind on rejected intake requests.
pub const CHRONICLE_ERROR_HEADER: &str = "X-Chronicle-Error";

/// Decimal places kept on reported accuracies.
pub const ACCURACY_DECIMALS: i32 = 4;

pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1_000;
pub const DEFAULT_REPORT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SCORER_MIN_DELAY_MS: u64 = 5_000;
pub const DEFAULT_SCORER_MAX_DELAY_MS: u64 = 10_000;
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

/// Rounds a score to [`ACCURACY_DECIMALS`] places.
#[inline]
pub fn round_accuracy(value: f64) -> f64 {
    let factor = 10f64.powi(ACCURACY_DECIMALS);
    (value * factor).round() / factor
}
