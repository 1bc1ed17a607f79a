//! Runs one research job: score every chronicle in order, then report once.
//!
//! A job either reports a full batch (one result per chronicle) or reports
//! nothing. Scorer errors, scorer panics and out-of-range scores abort the
//! job and are surfaced as [`JobOutcome::Aborted`].


use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::constants::round_accuracy;
use crate::reporter::ResultReporter;
use crate::research::{ChronicleId, ItemResult, ResearchItem, ResearchJob};
use crate::scoring::{Scorer, ScoringError};

/// How a job ended. Consumed by the worker pool for its counters.
#[derive(Debug)]
pub enum JobOutcome {
    /// Main service accepted the batch.
    Reported { results: usize },
    /// Batch was built but delivery failed.
    ReportFailed { results: usize },
    /// Scoring failed; nothing was sent.
    Aborted {
        item_id: ChronicleId,
        error: ScoringError,
    },
}

impl JobOutcome {
    pub fn is_reported(&self) -> bool {
        matches!(self, JobOutcome::Reported { .. })
    }
}

#[derive(Clone)]
pub struct JobProcessor {
    scorer: Arc<dyn Scorer>,
    reporter: Arc<dyn ResultReporter>,
}

impl std::fmt::Debug for JobProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobProcessor").finish_non_exhaustive()
    }
}

impl JobProcessor {
    pub fn new(scorer: Arc<dyn Scorer>, reporter: Arc<dyn ResultReporter>) -> Self {
        Self { scorer, reporter }
    }

    #[instrument(
        skip(self, job),
        fields(job_id = %job.job_id, request_id = %job.request_id, items = job.items.len())
    )]
    pub async fn process(&self, job: ResearchJob) -> JobOutcome {
        let ResearchJob {
            request_id,
            items,
            accepted_at,
            ..
        } = job;

        info!(
            queued_ms = accepted_at.elapsed().as_millis() as u64,
            "Processing started"
        );

        let total = items.len();
        let mut results = Vec::with_capacity(total);

        for (position, item) in items.into_iter().enumerate() {
            let item_id = item.item_id.clone();
            match self.score_item(item).await {
                Ok(accuracy) => {
                    info!(
                        item_id = %item_id,
                        accuracy,
                        position = position + 1,
                        total,
                        "Chronicle scored"
                    );
                    results.push(ItemResult { item_id, accuracy });
                }
                Err(error) => {
                    error!(
                        item_id = %item_id,
                        error = %error,
                        scored = results.len(),
                        "Scoring failed, aborting job without reporting"
                    );
                    return JobOutcome::Aborted { item_id, error };
                }
            }
        }

        let count = results.len();
        if self.reporter.report(&request_id, &results).await {
            info!(results = count, "Request processed");
            JobOutcome::Reported { results: count }
        } else {
            warn!(results = count, "Request processed but results were not delivered");
            JobOutcome::ReportFailed { results: count }
        }
    }

    /// Scores one chronicle on the blocking pool and rounds the result.
    async fn score_item(&self, item: ResearchItem) -> Result<f64, ScoringError> {
        let scorer = Arc::clone(&self.scorer);
        let raw = tokio::task::spawn_blocking(move || {
            scorer.score(&item.quote, &item.reference_text)
        })
        .await
        .map_err(|e| ScoringError::TaskAborted {
            reason: e.to_string(),
        })??;

        if !(0.0..=1.0).contains(&raw) {
            return Err(ScoringError::OutOfRange { value: raw });
        }

        Ok(round_accuracy(raw))
    }
}
