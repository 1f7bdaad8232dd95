use serde::{Deserialize, Serialize};

/// Opaque handle identifying one background job.
pub type JobKey = u64;

/// Lifecycle state of a background job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// The unit of work is still executing.
    Running,
    /// The unit of work returned Ok; progress is exactly 100.
    Completed,
    /// The unit of work returned Err; progress stays below 100.
    Failed,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Running => write!(f, "running"),
            JobState::Completed => write!(f, "completed"),
            JobState::Failed => write!(f, "failed"),
        }
    }
}

/// Last reported status of a job, queryable by key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    /// Progress percentage, 0..=100. Monotonically non-decreasing within one
    /// job; reaches 100 only on successful completion.
    pub progress: u8,
    pub state: JobState,
}

impl JobStatus {
    pub fn running(progress: u8) -> Self {
        Self {
            progress: progress.min(100),
            state: JobState::Running,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state != JobState::Running
    }
}
