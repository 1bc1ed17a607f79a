//! Environment-backed configuration.
//!
//! Every setting has a default. Service settings use `CHRONICLE_*` variables;
//! the main service location and key keep their deployment names
//! (`MAIN_SERVICE_URL`, `API_KEY`).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_QUEUE_CAPACITY, DEFAULT_REPORT_TIMEOUT_SECS, DEFAULT_SCORER_MAX_DELAY_MS,
    DEFAULT_SCORER_MIN_DELAY_MS, DEFAULT_SHUTDOWN_GRACE_SECS, DEFAULT_WORKERS,
};
use crate::dispatch::PoolConfig;
use crate::reporter::{DEFAULT_MAIN_SERVICE_URL, ReporterConfig, client::parse_base_url};
use crate::scoring::{RandomScorer, ScoringError};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read overrides on top of defaults, then
/// [`Config::validate`] before building anything from it.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Base URL of the main service receiving results. Default: `http://localhost:5000`.
    pub main_service_url: String,

    /// Sent as `X-API-Key` on every result delivery. Default: empty.
    pub api_key: String,

    /// Number of concurrent job workers. Default: `10`.
    pub workers: usize,

    /// Jobs that may wait for a worker before intake answers 503. Default: `1000`.
    pub queue_capacity: usize,

    /// Timeout for one result delivery. Default: 30s.
    pub report_timeout: Duration,

    /// Lower bound of the simulated per-item scoring delay. Default: 5s.
    pub scorer_min_delay: Duration,

    /// Upper bound of the simulated per-item scoring delay. Default: 10s.
    pub scorer_max_delay: Duration,

    /// How long shutdown waits for queued and running jobs. Default: 30s.
    pub shutdown_grace: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            main_service_url: DEFAULT_MAIN_SERVICE_URL.to_string(),
            api_key: String::new(),
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            report_timeout: Duration::from_secs(DEFAULT_REPORT_TIMEOUT_SECS),
            scorer_min_delay: Duration::from_millis(DEFAULT_SCORER_MIN_DELAY_MS),
            scorer_max_delay: Duration::from_millis(DEFAULT_SCORER_MAX_DELAY_MS),
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "CHRONICLE_PORT";
    pub const ENV_BIND_ADDR: &'static str = "CHRONICLE_BIND_ADDR";
    pub const ENV_MAIN_SERVICE_URL: &'static str = "MAIN_SERVICE_URL";
    pub const ENV_API_KEY: &'static str = "API_KEY";
    pub const ENV_WORKERS: &'static str = "CHRONICLE_WORKERS";
    pub const ENV_QUEUE_CAPACITY: &'static str = "CHRONICLE_QUEUE_CAPACITY";
    pub const ENV_REPORT_TIMEOUT_SECS: &'static str = "CHRONICLE_REPORT_TIMEOUT_SECS";
    pub const ENV_SCORER_MIN_DELAY_MS: &'static str = "CHRONICLE_SCORER_MIN_DELAY_MS";
    pub const ENV_SCORER_MAX_DELAY_MS: &'static str = "CHRONICLE_SCORER_MAX_DELAY_MS";
    pub const ENV_SHUTDOWN_GRACE_SECS: &'static str = "CHRONICLE_SHUTDOWN_GRACE_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let main_service_url =
            Self::parse_string_from_env(Self::ENV_MAIN_SERVICE_URL, defaults.main_service_url);
        let api_key = Self::parse_string_from_env(Self::ENV_API_KEY, defaults.api_key);
        let workers = Self::parse_number_from_env(Self::ENV_WORKERS, defaults.workers)?;
        let queue_capacity =
            Self::parse_number_from_env(Self::ENV_QUEUE_CAPACITY, defaults.queue_capacity)?;
        let report_timeout = Duration::from_secs(Self::parse_number_from_env(
            Self::ENV_REPORT_TIMEOUT_SECS,
            defaults.report_timeout.as_secs(),
        )?);
        let scorer_min_delay = Duration::from_millis(Self::parse_number_from_env(
            Self::ENV_SCORER_MIN_DELAY_MS,
            defaults.scorer_min_delay.as_millis() as u64,
        )?);
        let scorer_max_delay = Duration::from_millis(Self::parse_number_from_env(
            Self::ENV_SCORER_MAX_DELAY_MS,
            defaults.scorer_max_delay.as_millis() as u64,
        )?);
        let shutdown_grace = Duration::from_secs(Self::parse_number_from_env(
            Self::ENV_SHUTDOWN_GRACE_SECS,
            defaults.shutdown_grace.as_secs(),
        )?);

        Ok(Self {
            port,
            bind_addr,
            main_service_url,
            api_key,
            workers,
            queue_capacity,
            report_timeout,
            scorer_min_delay,
            scorer_max_delay,
            shutdown_grace,
        })
    }

    /// Checks cross-field invariants. Does not contact the main service.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_WORKERS,
            });
        }

        if self.queue_capacity == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_QUEUE_CAPACITY,
            });
        }

        if self.report_timeout.is_zero() {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_REPORT_TIMEOUT_SECS,
            });
        }

        if self.scorer_min_delay > self.scorer_max_delay {
            return Err(ConfigError::InvalidDelayRange {
                min_ms: self.scorer_min_delay.as_millis() as u64,
                max_ms: self.scorer_max_delay.as_millis() as u64,
            });
        }

        parse_base_url(&self.main_service_url).map_err(|e| ConfigError::InvalidMainServiceUrl {
            value: self.main_service_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.workers, self.queue_capacity)
    }

    pub fn reporter_config(&self) -> ReporterConfig {
        ReporterConfig::new(self.main_service_url.clone(), self.api_key.clone())
            .timeout(self.report_timeout)
    }

    pub fn scorer(&self) -> Result<RandomScorer, ScoringError> {
        RandomScorer::new(self.scorer_min_delay, self.scorer_max_delay)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.trim().parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
