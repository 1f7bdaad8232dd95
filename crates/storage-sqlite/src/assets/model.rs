//! Database models for asset snapshots and bank transactions.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use kakeibo_core::assets::{AssetSnapshot, BankTransaction};
use kakeibo_core::errors::Result;

use crate::utils::{format_date, parse_date};

/// Database model for asset snapshot rows.
#[derive(
    Queryable, Insertable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::asset_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetSnapshotDB {
    pub date: String,
    pub institution: String,
    pub category: String,
    pub amount: i64,
    pub locked: bool,
}

impl From<AssetSnapshot> for AssetSnapshotDB {
    fn from(domain: AssetSnapshot) -> Self {
        Self {
            date: format_date(domain.date),
            institution: domain.institution,
            category: domain.category,
            amount: domain.amount,
            locked: domain.locked,
        }
    }
}

impl TryFrom<AssetSnapshotDB> for AssetSnapshot {
    type Error = kakeibo_core::Error;

    fn try_from(db: AssetSnapshotDB) -> Result<Self> {
        Ok(Self {
            date: parse_date(&db.date)?,
            institution: db.institution,
            category: db.category,
            amount: db.amount,
            locked: db.locked,
        })
    }
}

/// Database model for bank transaction rows.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::bank_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BankTransactionDB {
    pub id: String,
    pub date: String,
    pub amount: i64,
    pub is_calculation_target: bool,
    pub locked: bool,
}

impl From<BankTransaction> for BankTransactionDB {
    fn from(domain: BankTransaction) -> Self {
        Self {
            id: domain.id,
            date: format_date(domain.date),
            amount: domain.amount,
            is_calculation_target: domain.is_calculation_target,
            locked: domain.locked,
        }
    }
}

impl TryFrom<BankTransactionDB> for BankTransaction {
    type Error = kakeibo_core::Error;

    fn try_from(db: BankTransactionDB) -> Result<Self> {
        Ok(Self {
            id: db.id,
            date: parse_date(&db.date)?,
            amount: db.amount,
            is_calculation_target: db.is_calculation_target,
            locked: db.locked,
        })
    }
}
