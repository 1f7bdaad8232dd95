use chrono::NaiveDate;

use super::assets_model::{AssetSnapshot, BankTransaction};
use crate::errors::Result;

/// Read access to persisted asset snapshot rows.
///
/// Writes go through the sync repository's atomic change set; there is no
/// row-level write surface here.
pub trait AssetSnapshotRepositoryTrait: Send + Sync {
    /// Rows with `from <= date <= to`, unordered.
    fn get_snapshots_in_range(&self, from: NaiveDate, to: NaiveDate)
        -> Result<Vec<AssetSnapshot>>;

    /// All rows for exactly `date`.
    fn get_snapshots_for_date(&self, date: NaiveDate) -> Result<Vec<AssetSnapshot>>;
}

/// Read access to persisted bank transactions.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Calculation-target rows with `from <= date <= to`, ascending by date.
    fn get_transactions_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<BankTransaction>>;

    /// Rows whose external id is in `ids`, unordered.
    fn get_transactions_by_ids(&self, ids: &[String]) -> Result<Vec<BankTransaction>>;
}
