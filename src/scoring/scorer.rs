use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::constants::{DEFAULT_SCORER_MAX_DELAY_MS, DEFAULT_SCORER_MIN_DELAY_MS};

use super::error::ScoringError;

/// Accuracy range drawn for quotes with visible content.
pub const QUOTED_ACCURACY: RangeInclusive<f64> = 0.7..=1.0;
/// Accuracy range drawn for empty or blank quotes.
pub const BLANK_ACCURACY: RangeInclusive<f64> = 0.0..=0.3;

/// Computes how accurately a quote reflects its chronicle.
///
/// Implementations may block for a long time; callers run them on the
/// blocking pool. Returned values must lie in `[0.0, 1.0]`.
pub trait Scorer: Send + Sync {
    fn score(&self, quote: &str, reference_text: &str) -> Result<f64, ScoringError>;
}

/// Stand-in scorer: sleeps to simulate analysis, then draws a random accuracy.
///
/// Not deterministic. Non-blank quotes land in [`QUOTED_ACCURACY`], blank ones
/// in [`BLANK_ACCURACY`].
#[derive(Debug, Clone)]
pub struct RandomScorer {
    min_delay: Duration,
    max_delay: Duration,
}

impl Default for RandomScorer {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(DEFAULT_SCORER_MIN_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_SCORER_MAX_DELAY_MS),
        }
    }
}

impl RandomScorer {
    pub fn new(min_delay: Duration, max_delay: Duration) -> Result<Self, ScoringError> {
        if min_delay > max_delay {
            return Err(ScoringError::InvalidConfig {
                reason: format!(
                    "min delay {:?} exceeds max delay {:?}",
                    min_delay, max_delay
                ),
            });
        }
        Ok(Self {
            min_delay,
            max_delay,
        })
    }

    /// No artificial delay. Handy for tests and local runs.
    pub fn instant() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    pub fn delay_range(&self) -> (Duration, Duration) {
        (self.min_delay, self.max_delay)
    }

    fn pick_delay(&self, rng: &mut impl Rng) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }
        rng.gen_range(self.min_delay..=self.max_delay)
    }
}

impl Scorer for RandomScorer {
    fn score(&self, quote: &str, reference_text: &str) -> Result<f64, ScoringError> {
        let mut rng = rand::thread_rng();

        let delay = self.pick_delay(&mut rng);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let range = if quote.trim().is_empty() {
            BLANK_ACCURACY
        } else {
            QUOTED_ACCURACY
        };
        let accuracy = rng.gen_range(range);

        debug!(
            quote_len = quote.len(),
            reference_len = reference_text.len(),
            delay_ms = delay.as_millis() as u64,
            accuracy,
            "Scored quote"
        );

        Ok(accuracy)
    }
}
