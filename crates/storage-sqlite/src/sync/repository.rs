use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;

use kakeibo_core::sync::{ReconciliationChangeSet, SyncRepositoryTrait};
use kakeibo_core::Result;

use crate::assets::{AssetSnapshotDB, BankTransactionDB};
use crate::db::WriteHandle;
use crate::errors::IntoCore;
use crate::schema::{asset_snapshots, bank_transactions};
use crate::utils::{chunk_for_sqlite, format_date};

/// Applies a reconciliation change set as one writer-actor job, i.e. one
/// immediate transaction. A failure anywhere rolls back the whole run.
pub struct SyncRepository {
    writer: WriteHandle,
}

impl SyncRepository {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl SyncRepositoryTrait for SyncRepository {
    async fn commit_run(&self, changes: ReconciliationChangeSet) -> Result<()> {
        if changes.is_empty() {
            debug!("Reconciliation produced no changes, skipping commit");
            return Ok(());
        }

        self.writer
            .exec(move |conn| {
                for key in &changes.asset_deletes {
                    diesel::delete(
                        asset_snapshots::table
                            .filter(asset_snapshots::date.eq(format_date(key.date)))
                            .filter(asset_snapshots::institution.eq(&key.institution))
                            .filter(asset_snapshots::category.eq(&key.category)),
                    )
                    .execute(conn)
                    .into_core()?;
                }

                let asset_rows: Vec<AssetSnapshotDB> = changes
                    .asset_inserts
                    .into_iter()
                    .map(AssetSnapshotDB::from)
                    .collect();
                for chunk in asset_rows.chunks(100) {
                    diesel::insert_into(asset_snapshots::table)
                        .values(chunk)
                        .execute(conn)
                        .into_core()?;
                }

                for chunk in chunk_for_sqlite(&changes.transaction_deletes) {
                    diesel::delete(
                        bank_transactions::table.filter(bank_transactions::id.eq_any(chunk)),
                    )
                    .execute(conn)
                    .into_core()?;
                }

                let transaction_rows: Vec<BankTransactionDB> = changes
                    .transaction_inserts
                    .into_iter()
                    .map(BankTransactionDB::from)
                    .collect();
                for chunk in transaction_rows.chunks(100) {
                    diesel::insert_into(bank_transactions::table)
                        .values(chunk)
                        .execute(conn)
                        .into_core()?;
                }

                Ok(())
            })
            .await
    }
}
