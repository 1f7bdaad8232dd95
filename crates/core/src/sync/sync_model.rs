use crate::assets::{AssetSnapshot, AssetSnapshotKey, BankTransaction};

/// All writes staged by one reconciliation run.
///
/// Applied by the sync repository in a single transaction, so a failure at
/// any point before commit leaves the store untouched. Locked rows never
/// appear in the delete lists and their keys never appear in the inserts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationChangeSet {
    pub asset_deletes: Vec<AssetSnapshotKey>,
    pub asset_inserts: Vec<AssetSnapshot>,
    pub transaction_deletes: Vec<String>,
    pub transaction_inserts: Vec<BankTransaction>,
}

impl ReconciliationChangeSet {
    pub fn is_empty(&self) -> bool {
        self.asset_deletes.is_empty()
            && self.asset_inserts.is_empty()
            && self.transaction_deletes.is_empty()
            && self.transaction_inserts.is_empty()
    }
}
