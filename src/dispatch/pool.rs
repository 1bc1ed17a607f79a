use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::Mutex as AsyncMutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::constants::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS};
use crate::processor::JobProcessor;
use crate::research::ResearchJob;

use super::JobDispatcher;
use super::error::DispatchError;
use super::stats::{DispatchSnapshot, DispatchStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Concurrent jobs (and therefore concurrent scorer calls).
    pub workers: usize,
    /// Jobs waiting for a worker before submissions are rejected.
    pub queue_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl PoolConfig {
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        Self {
            workers,
            queue_capacity,
        }
    }

    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.workers == 0 {
            return Err(DispatchError::InvalidConfig {
                reason: "at least one worker is required".to_string(),
            });
        }
        if self.queue_capacity == 0 {
            return Err(DispatchError::InvalidConfig {
                reason: "queue capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

type SharedQueue = Arc<AsyncMutex<mpsc::Receiver<ResearchJob>>>;

/// Fixed set of worker tasks draining one bounded queue.
///
/// Submission never waits: a full queue rejects immediately. Each job runs to
/// completion on a single worker.
pub struct WorkerPool {
    config: PoolConfig,
    sender: RwLock<Option<mpsc::Sender<ResearchJob>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    stats: Arc<DispatchStats>,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("config", &self.config)
            .field("open", &self.sender.read().is_some())
            .finish()
    }
}

impl WorkerPool {
    /// Spawns the workers on the current Tokio runtime.
    pub fn start(config: PoolConfig, processor: JobProcessor) -> Result<Self, DispatchError> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let queue: SharedQueue = Arc::new(AsyncMutex::new(rx));
        let stats = Arc::new(DispatchStats::default());

        let workers = (0..config.workers)
            .map(|worker_id| {
                tokio::spawn(worker_loop(
                    worker_id,
                    Arc::clone(&queue),
                    processor.clone(),
                    Arc::clone(&stats),
                ))
            })
            .collect();

        info!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "Worker pool started"
        );

        Ok(Self {
            config,
            sender: RwLock::new(Some(tx)),
            workers: Mutex::new(workers),
            stats,
        })
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    pub fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    /// Stops accepting jobs, then waits up to `grace` for queued and running
    /// jobs to finish. Returns `true` if every worker drained in time.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        let Some(sender) = self.sender.write().take() else {
            return true;
        };
        let pending = sender.max_capacity() - sender.capacity();
        drop(sender);

        let handles: Vec<_> = std::mem::take(&mut *self.workers.lock());
        info!(pending, grace_secs = grace.as_secs(), "Draining worker pool");

        let drained = tokio::time::timeout(grace, async {
            for handle in handles {
                if let Err(e) = handle.await {
                    error!(error = %e, "Worker task ended abnormally");
                }
            }
        })
        .await
        .is_ok();

        if drained {
            info!("Worker pool drained");
        } else {
            warn!("Worker pool did not drain before the grace period ended");
        }
        drained
    }

    fn queued(&self) -> usize {
        self.sender
            .read()
            .as_ref()
            .map(|tx| tx.max_capacity() - tx.capacity())
            .unwrap_or(0)
    }
}

impl JobDispatcher for WorkerPool {
    fn submit(&self, job: ResearchJob) -> Result<(), DispatchError> {
        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            self.stats.record_rejected();
            return Err(DispatchError::Closed);
        };

        let job_id = job.job_id;
        match sender.try_send(job) {
            Ok(()) => {
                self.stats.record_submitted();
                debug!(%job_id, "Job queued");
                Ok(())
            }
            Err(TrySendError::Full(job)) => {
                self.stats.record_rejected();
                warn!(
                    job_id = %job.job_id,
                    request_id = %job.request_id,
                    capacity = self.config.queue_capacity,
                    "Job queue full, rejecting request"
                );
                Err(DispatchError::QueueFull {
                    capacity: self.config.queue_capacity,
                })
            }
            Err(TrySendError::Closed(_)) => {
                self.stats.record_rejected();
                Err(DispatchError::Closed)
            }
        }
    }

    fn snapshot(&self) -> DispatchSnapshot {
        self.stats
            .snapshot(self.config.workers, self.config.queue_capacity, self.queued())
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: SharedQueue,
    processor: JobProcessor,
    stats: Arc<DispatchStats>,
) {
    debug!(worker_id, "Worker started");

    loop {
        let next = queue.lock().await.recv().await;
        let Some(job) = next else {
            break;
        };

        let job_id = job.job_id;
        stats.record_started();

        // A panicking job must not take the worker down with it.
        let task_processor = processor.clone();
        match tokio::spawn(async move { task_processor.process(job).await }).await {
            Ok(outcome) => stats.record_outcome(&outcome),
            Err(e) => {
                error!(worker_id, %job_id, error = %e, "Job task crashed");
                stats.record_crashed();
            }
        }
    }

    debug!(worker_id, "Worker stopped");
}
