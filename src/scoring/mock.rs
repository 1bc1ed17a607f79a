use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::ScoringError;
use super::scorer::Scorer;

/// Returns the same accuracy for every quote and counts calls.
#[derive(Debug, Default)]
pub struct FixedScorer {
    accuracy: f64,
    calls: AtomicUsize,
}

impl FixedScorer {
    pub fn new(accuracy: f64) -> Self {
        Self {
            accuracy,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Scorer for FixedScorer {
    fn score(&self, _quote: &str, _reference_text: &str) -> Result<f64, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accuracy)
    }
}

/// Fails on the quote equal to `poison`, scores everything else at `0.5`.
#[derive(Debug)]
pub struct FailingScorer {
    poison: String,
    panic: bool,
}

impl FailingScorer {
    pub fn on_quote(poison: impl Into<String>) -> Self {
        Self {
            poison: poison.into(),
            panic: false,
        }
    }

    /// Panics instead of returning an error.
    pub fn panicking_on_quote(poison: impl Into<String>) -> Self {
        Self {
            poison: poison.into(),
            panic: true,
        }
    }
}

impl Scorer for FailingScorer {
    fn score(&self, quote: &str, _reference_text: &str) -> Result<f64, ScoringError> {
        if quote != self.poison {
            return Ok(0.5);
        }
        if self.panic {
            panic!("scorer exploded on {:?}", quote);
        }
        Err(ScoringError::ComputationFailed {
            reason: format!("cannot score {:?}", quote),
        })
    }
}
