use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use futures::StreamExt;
use log::{debug, info};

use super::feed_model::{DailyAssetBatch, FetchedTransaction};
use super::feed_traits::BankFeedProviderTrait;
use super::sync_model::ReconciliationChangeSet;
use super::sync_traits::SyncRepositoryTrait;
use crate::assets::{
    AssetSnapshot, AssetSnapshotRepositoryTrait, BankTransaction, TransactionRepositoryTrait,
};
use crate::errors::{Error, Result};
use crate::jobs::{JobKey, JobRegistry, JobStatus, ProgressReporter};

// Progress layout: 1 unit for start, 89 proportional units for the asset
// phase, 9 for the transaction phase offset at 90, and 100 on commit.
const ASSET_PHASE_START: i64 = 1;
const ASSET_PHASE_UNITS: i64 = 89;
const TRANSACTION_PHASE_START: i64 = 90;
const TRANSACTION_PHASE_UNITS: i64 = 9;

/// Orchestrates reconciliation runs as background jobs.
#[derive(Clone)]
pub struct SyncService {
    provider: Arc<dyn BankFeedProviderTrait>,
    snapshot_repository: Arc<dyn AssetSnapshotRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    sync_repository: Arc<dyn SyncRepositoryTrait>,
    jobs: Arc<JobRegistry>,
}

impl SyncService {
    pub fn new(
        provider: Arc<dyn BankFeedProviderTrait>,
        snapshot_repository: Arc<dyn AssetSnapshotRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        sync_repository: Arc<dyn SyncRepositoryTrait>,
        jobs: Arc<JobRegistry>,
    ) -> Self {
        Self {
            provider,
            snapshot_repository,
            transaction_repository,
            sync_repository,
            jobs,
        }
    }

    /// Launches a reconciliation run for `[from, to]` and returns its job
    /// key immediately. Progress is polled via [`SyncService::get_sync_status`].
    pub fn start_sync(&self, from: NaiveDate, to: NaiveDate) -> Result<JobKey> {
        if from > to {
            return Err(Error::InvalidDateRange { from, to });
        }

        let provider = Arc::clone(&self.provider);
        let snapshot_repository = Arc::clone(&self.snapshot_repository);
        let transaction_repository = Arc::clone(&self.transaction_repository);
        let sync_repository = Arc::clone(&self.sync_repository);

        let key = self.jobs.start(move |reporter| async move {
            run_reconciliation(
                provider,
                snapshot_repository,
                transaction_repository,
                sync_repository,
                from,
                to,
                reporter,
            )
            .await
        });

        info!("Started sync {} for {} to {}", key, from, to);
        Ok(key)
    }

    /// Last reported status of a run; `UnknownJobKey` for a key never
    /// returned by [`SyncService::start_sync`].
    pub fn get_sync_status(&self, key: JobKey) -> Result<JobStatus> {
        self.jobs.status(key)
    }
}

/// One reconciliation run. Stages every write into a change set and commits
/// it atomically at the end; any failure before the commit leaves the store
/// unchanged and fails the surrounding job.
async fn run_reconciliation(
    provider: Arc<dyn BankFeedProviderTrait>,
    snapshot_repository: Arc<dyn AssetSnapshotRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    sync_repository: Arc<dyn SyncRepositoryTrait>,
    from: NaiveDate,
    to: NaiveDate,
    reporter: ProgressReporter,
) -> Result<()> {
    reporter.report(ASSET_PHASE_START as u8);
    let total_days = (to - from).num_days().max(1);
    let mut changes = ReconciliationChangeSet::default();

    {
        let mut batches = provider.fetch_asset_batches(from, to);
        while let Some(batch) = batches.next().await {
            let batch = batch?;
            stage_asset_batch(&batch, snapshot_repository.as_ref(), &mut changes)?;

            let elapsed = (batch.date - from).num_days().clamp(0, total_days);
            reporter.report((ASSET_PHASE_START + elapsed * ASSET_PHASE_UNITS / total_days) as u8);
        }
    }

    reporter.report(TRANSACTION_PHASE_START as u8);
    let fetched = provider.fetch_transactions(from, to).await?;

    let mut by_date: BTreeMap<NaiveDate, Vec<FetchedTransaction>> = BTreeMap::new();
    for transaction in fetched {
        by_date.entry(transaction.date).or_default().push(transaction);
    }
    for (date, bucket) in by_date {
        stage_transaction_bucket(&bucket, transaction_repository.as_ref(), &mut changes)?;

        let elapsed = (date - from).num_days().clamp(0, total_days);
        reporter.report(
            (TRANSACTION_PHASE_START + elapsed * TRANSACTION_PHASE_UNITS / total_days) as u8,
        );
    }

    debug!(
        "Committing reconciliation: {} asset deletes, {} asset inserts, {} transaction deletes, {} transaction inserts",
        changes.asset_deletes.len(),
        changes.asset_inserts.len(),
        changes.transaction_deletes.len(),
        changes.transaction_inserts.len(),
    );
    sync_repository.commit_run(changes).await
}

/// Stages one asset date bucket.
///
/// Fetched records are aggregated by `(institution, category)`; every
/// existing unlocked row for the date is staged for deletion; candidates
/// whose key is held by a locked row are dropped, so the locked row stands
/// untouched.
fn stage_asset_batch(
    batch: &DailyAssetBatch,
    repository: &dyn AssetSnapshotRepositoryTrait,
    changes: &mut ReconciliationChangeSet,
) -> Result<()> {
    let mut candidates: BTreeMap<(String, String), i64> = BTreeMap::new();
    for record in &batch.records {
        *candidates
            .entry((record.institution.clone(), record.category.clone()))
            .or_insert(0) += record.amount;
    }

    let existing = repository.get_snapshots_for_date(batch.date)?;
    let locked: HashSet<(String, String)> = existing
        .iter()
        .filter(|row| row.locked)
        .map(|row| (row.institution.clone(), row.category.clone()))
        .collect();

    changes.asset_deletes.extend(
        existing
            .iter()
            .filter(|row| !row.locked)
            .map(AssetSnapshot::key),
    );

    for ((institution, category), amount) in candidates {
        if locked.contains(&(institution.clone(), category.clone())) {
            debug!(
                "Keeping locked asset row {} / {} / {}",
                batch.date, institution, category
            );
            continue;
        }
        changes.asset_inserts.push(AssetSnapshot {
            date: batch.date,
            institution,
            category,
            amount,
            locked: false,
        });
    }

    Ok(())
}

/// Stages one date bucket of fetched transactions, keyed by external id.
///
/// Duplicate fetched ids collapse to the first occurrence so re-running an
/// unchanged feed stays idempotent.
fn stage_transaction_bucket(
    bucket: &[FetchedTransaction],
    repository: &dyn TransactionRepositoryTrait,
    changes: &mut ReconciliationChangeSet,
) -> Result<()> {
    let mut fetched: BTreeMap<&str, &FetchedTransaction> = BTreeMap::new();
    for transaction in bucket {
        fetched.entry(transaction.id.as_str()).or_insert(transaction);
    }

    let ids: Vec<String> = fetched.keys().map(|id| id.to_string()).collect();
    let existing = repository.get_transactions_by_ids(&ids)?;
    let locked_ids: HashSet<&str> = existing
        .iter()
        .filter(|row| row.locked)
        .map(|row| row.id.as_str())
        .collect();

    changes.transaction_deletes.extend(
        existing
            .iter()
            .filter(|row| !row.locked)
            .map(|row| row.id.clone()),
    );

    for (id, transaction) in fetched {
        if locked_ids.contains(id) {
            debug!("Keeping locked transaction {}", id);
            continue;
        }
        changes.transaction_inserts.push(BankTransaction {
            id: transaction.id.clone(),
            date: transaction.date,
            amount: transaction.amount,
            is_calculation_target: transaction.is_calculation_target,
            locked: false,
        });
    }

    Ok(())
}
