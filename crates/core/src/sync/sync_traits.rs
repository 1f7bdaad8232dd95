use async_trait::async_trait;

use super::sync_model::ReconciliationChangeSet;
use crate::errors::Result;

/// Write surface of a reconciliation run.
#[async_trait]
pub trait SyncRepositoryTrait: Send + Sync {
    /// Applies the whole change set in one transaction: commit-or-abort,
    /// never partial date buckets.
    async fn commit_run(&self, changes: ReconciliationChangeSet) -> Result<()>;
}
