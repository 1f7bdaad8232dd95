use std::sync::Arc;

use diesel::prelude::*;

use kakeibo_core::assets::{
    AssetSnapshot, AssetSnapshotRepositoryTrait, BankTransaction, TransactionRepositoryTrait,
};
use kakeibo_core::Result;

use super::model::{AssetSnapshotDB, BankTransactionDB};
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::{asset_snapshots, bank_transactions};
use crate::utils::{chunk_for_sqlite, format_date};

/// Read-side repository for asset snapshot rows. Writes go through the sync
/// repository's change-set commit.
#[derive(Clone)]
pub struct AssetSnapshotRepository {
    pool: Arc<DbPool>,
}

impl AssetSnapshotRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl AssetSnapshotRepositoryTrait for AssetSnapshotRepository {
    fn get_snapshots_in_range(
        &self,
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    ) -> Result<Vec<AssetSnapshot>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = asset_snapshots::table
            .filter(asset_snapshots::date.ge(format_date(from)))
            .filter(asset_snapshots::date.le(format_date(to)))
            .select(AssetSnapshotDB::as_select())
            .load::<AssetSnapshotDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(AssetSnapshot::try_from).collect()
    }

    fn get_snapshots_for_date(&self, date: chrono::NaiveDate) -> Result<Vec<AssetSnapshot>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = asset_snapshots::table
            .filter(asset_snapshots::date.eq(format_date(date)))
            .select(AssetSnapshotDB::as_select())
            .load::<AssetSnapshotDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(AssetSnapshot::try_from).collect()
    }
}

/// Read-side repository for bank transaction rows.
#[derive(Clone)]
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transactions_in_range(
        &self,
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    ) -> Result<Vec<BankTransaction>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = bank_transactions::table
            .filter(bank_transactions::date.ge(format_date(from)))
            .filter(bank_transactions::date.le(format_date(to)))
            .filter(bank_transactions::is_calculation_target.eq(true))
            .order(bank_transactions::date.asc())
            .select(BankTransactionDB::as_select())
            .load::<BankTransactionDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(BankTransaction::try_from).collect()
    }

    fn get_transactions_by_ids(&self, ids: &[String]) -> Result<Vec<BankTransaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut transactions = Vec::with_capacity(ids.len());
        for chunk in chunk_for_sqlite(ids) {
            let rows = bank_transactions::table
                .filter(bank_transactions::id.eq_any(chunk))
                .select(BankTransactionDB::as_select())
                .load::<BankTransactionDB>(&mut conn)
                .into_core()?;
            for row in rows {
                transactions.push(BankTransaction::try_from(row)?);
            }
        }

        Ok(transactions)
    }
}
