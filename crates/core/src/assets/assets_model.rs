use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One bank/brokerage balance observation, unique on
/// `(date, institution, category)`.
///
/// `locked` marks a manual correction: reconciliation never deletes or
/// overwrites a locked row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshot {
    pub date: NaiveDate,
    pub institution: String,
    pub category: String,
    /// Integer base-currency units.
    pub amount: i64,
    pub locked: bool,
}

impl AssetSnapshot {
    /// The reconciliation key of this row.
    pub fn key(&self) -> AssetSnapshotKey {
        AssetSnapshotKey {
            date: self.date,
            institution: self.institution.clone(),
            category: self.category.clone(),
        }
    }
}

/// Unique key of an [`AssetSnapshot`] row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshotKey {
    pub date: NaiveDate,
    pub institution: String,
    pub category: String,
}

/// One bank transaction with a stable external id.
///
/// Same lock-preservation contract as [`AssetSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankTransaction {
    /// External, stable identifier.
    pub id: String,
    pub date: NaiveDate,
    /// Integer base-currency units; negative for outflows.
    pub amount: i64,
    /// Whether the row participates in spending calculations.
    pub is_calculation_target: bool,
    pub locked: bool,
}
