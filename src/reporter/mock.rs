use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::research::{Identifier, ItemResult, ResultBatch};

use super::ResultReporter;

/// In-memory reporter that records every batch it is handed.
#[derive(Debug)]
pub struct RecordingReporter {
    batches: Mutex<Vec<ResultBatch>>,
    succeed: AtomicBool,
    notify: Notify,
}

impl Default for RecordingReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            succeed: AtomicBool::new(true),
            notify: Notify::new(),
        }
    }

    /// Records batches but reports delivery failure.
    pub fn failing() -> Self {
        let reporter = Self::new();
        reporter.succeed.store(false, Ordering::SeqCst);
        reporter
    }

    pub fn batches(&self) -> Vec<ResultBatch> {
        self.batches.lock().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }

    /// Waits until at least `count` batches were recorded or `timeout` elapses.
    pub async fn wait_for_batches(&self, count: usize, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            loop {
                let notified = self.notify.notified();
                if self.batch_count() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await
        .is_ok()
    }
}

#[async_trait]
impl ResultReporter for RecordingReporter {
    async fn report(&self, request_id: &Identifier, results: &[ItemResult]) -> bool {
        self.batches.lock().push(ResultBatch {
            request_id: request_id.clone(),
            results: results.to_vec(),
        });
        self.notify.notify_waiters();
        self.succeed.load(Ordering::SeqCst)
    }
}
