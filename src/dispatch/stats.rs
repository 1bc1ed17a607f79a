use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::processor::JobOutcome;

/// Lock-free counters shared by the submit path and the workers.
#[derive(Debug, Default)]
pub struct DispatchStats {
    submitted: AtomicU64,
    rejected: AtomicU64,
    in_flight: AtomicU64,
    completed: AtomicU64,
    report_failures: AtomicU64,
    aborted: AtomicU64,
}

impl DispatchStats {
    pub fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_started(&self) {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outcome(&self, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Reported { .. } => {}
            JobOutcome::ReportFailed { .. } => {
                self.report_failures.fetch_add(1, Ordering::Relaxed);
            }
            JobOutcome::Aborted { .. } => {
                self.aborted.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.finish();
    }

    /// Job task died without producing an outcome.
    pub fn record_crashed(&self) {
        self.aborted.fetch_add(1, Ordering::Relaxed);
        self.finish();
    }

    fn finish(&self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, workers: usize, queue_capacity: usize, queued: usize) -> DispatchSnapshot {
        DispatchSnapshot {
            workers,
            queue_capacity,
            queued,
            in_flight: self.in_flight.load(Ordering::Relaxed),
            submitted: self.submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            report_failures: self.report_failures.load(Ordering::Relaxed),
            aborted: self.aborted.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the dispatcher, served on `/stats`.
///
/// `completed` counts every finished job, including aborted ones and those
/// whose report failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSnapshot {
    pub workers: usize,
    pub queue_capacity: usize,
    pub queued: usize,
    pub in_flight: u64,
    pub submitted: u64,
    pub rejected: u64,
    pub completed: u64,
    pub report_failures: u64,
    pub aborted: u64,
}
