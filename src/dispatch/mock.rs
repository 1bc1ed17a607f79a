use parking_lot::Mutex;

use crate::research::ResearchJob;

use super::stats::{DispatchSnapshot, DispatchStats};
use super::{DispatchError, JobDispatcher};

/// Synchronous dispatcher that keeps submitted jobs instead of running them.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    jobs: Mutex<Vec<ResearchJob>>,
    reject_with: Option<DispatchError>,
    stats: DispatchStats,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every submission with `error`.
    pub fn rejecting(error: DispatchError) -> Self {
        Self {
            reject_with: Some(error),
            ..Self::default()
        }
    }

    pub fn job_count(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn take_jobs(&self) -> Vec<ResearchJob> {
        std::mem::take(&mut *self.jobs.lock())
    }
}

impl JobDispatcher for RecordingDispatcher {
    fn submit(&self, job: ResearchJob) -> Result<(), DispatchError> {
        if let Some(error) = &self.reject_with {
            self.stats.record_rejected();
            return Err(error.clone());
        }
        self.stats.record_submitted();
        self.jobs.lock().push(job);
        Ok(())
    }

    fn snapshot(&self) -> DispatchSnapshot {
        let queued = self.job_count();
        self.stats.snapshot(0, usize::MAX, queued)
    }
}
