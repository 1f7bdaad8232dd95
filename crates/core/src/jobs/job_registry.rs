use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, error};

use super::job_model::{JobKey, JobState, JobStatus};
use crate::errors::{Error, Result};

/// In-process registry of background jobs.
///
/// Created once at startup and shared via `Arc`; replaces any notion of a
/// process-wide singleton updater. Statuses are kept for the lifetime of the
/// registry so a completed or failed job stays queryable.
pub struct JobRegistry {
    jobs: DashMap<JobKey, JobStatus>,
    next_key: AtomicU64,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: DashMap::new(),
            next_key: AtomicU64::new(1),
        }
    }

    /// Launches `work` as a background task and returns its key immediately.
    ///
    /// The unit of work receives a [`ProgressReporter`] bound to the new key.
    /// On `Ok` the status is forced to progress 100 / `Completed`; on `Err`
    /// the status becomes `Failed` with the last reported progress, so a
    /// fire-and-forget caller never observes a frozen `Running` status.
    pub fn start<F, Fut>(self: &Arc<Self>, work: F) -> JobKey
    where
        F: FnOnce(ProgressReporter) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed);
        self.jobs.insert(key, JobStatus::running(0));

        let registry = Arc::clone(self);
        let reporter = ProgressReporter {
            registry: Arc::clone(self),
            key,
        };

        tokio::spawn(async move {
            match work(reporter).await {
                Ok(()) => {
                    registry.jobs.insert(
                        key,
                        JobStatus {
                            progress: 100,
                            state: JobState::Completed,
                        },
                    );
                    debug!("Job {} completed", key);
                }
                Err(e) => {
                    error!("Job {} failed: {}", key, e);
                    if let Some(mut status) = registry.jobs.get_mut(&key) {
                        status.state = JobState::Failed;
                    }
                }
            }
        });

        key
    }

    /// Returns the last reported status for `key`.
    ///
    /// An unknown key is an explicit error, never a stale default.
    pub fn status(&self, key: JobKey) -> Result<JobStatus> {
        self.jobs
            .get(&key)
            .map(|entry| *entry)
            .ok_or(Error::UnknownJobKey(key))
    }

    fn report(&self, key: JobKey, progress: u8) {
        if let Some(mut status) = self.jobs.get_mut(&key) {
            // Progress is monotonic within one job, and 100 is reserved for
            // successful completion, so running reports cap at 99.
            if status.state == JobState::Running && progress > status.progress {
                status.progress = progress.min(99);
            }
        }
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress handle passed into a job's unit of work.
///
/// Reports cap at 99 while the job runs (100 comes only from successful
/// completion) and regressions are ignored, so the observed progress of a
/// job is non-decreasing regardless of how the unit of work interleaves its
/// reports.
#[derive(Clone)]
pub struct ProgressReporter {
    registry: Arc<JobRegistry>,
    key: JobKey,
}

impl ProgressReporter {
    pub fn report(&self, progress: u8) {
        self.registry.report(self.key, progress);
    }

    pub fn key(&self) -> JobKey {
        self.key
    }
}
