//! Per-chronicle accuracy scoring.
//!
//! The pipeline only depends on the [`Scorer`] trait. [`RandomScorer`] is the
//! stand-in used until real quote/chronicle comparison exists; swapping it
//! out does not touch the processor or the dispatcher.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod scorer;


pub use error::ScoringError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{FailingScorer, FixedScorer};
pub use scorer::{BLANK_ACCURACY, QUOTED_ACCURACY, RandomScorer, Scorer};
