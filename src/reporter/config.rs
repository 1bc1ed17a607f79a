use std::time::Duration;

use crate::constants::DEFAULT_REPORT_TIMEOUT_SECS;

/// Default main service location when `MAIN_SERVICE_URL` is unset.
pub const DEFAULT_MAIN_SERVICE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct ReporterConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MAIN_SERVICE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_REPORT_TIMEOUT_SECS),
        }
    }
}

impl ReporterConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
