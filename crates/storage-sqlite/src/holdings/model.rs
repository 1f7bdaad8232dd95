//! Database models for products and holding deltas.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use kakeibo_core::errors::Result;
use kakeibo_core::holdings::{HoldingDelta, InvestmentProduct, NewInvestmentProduct};

use crate::utils::{format_date, parse_date, parse_decimal};

/// Database model for investment products.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::investment_products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentProductDB {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub product_type: String,
    pub external_key: String,
    pub currency_unit_id: i32,
    pub enabled: bool,
}

/// Insertable form of a product; the id column is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_products)]
pub struct NewInvestmentProductDB {
    pub name: String,
    pub category: String,
    pub product_type: String,
    pub external_key: String,
    pub currency_unit_id: i32,
    pub enabled: bool,
}

impl From<InvestmentProductDB> for InvestmentProduct {
    fn from(db: InvestmentProductDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            category: db.category,
            product_type: db.product_type,
            external_key: db.external_key,
            currency_unit_id: db.currency_unit_id,
            enabled: db.enabled,
        }
    }
}

impl From<NewInvestmentProduct> for NewInvestmentProductDB {
    fn from(domain: NewInvestmentProduct) -> Self {
        Self {
            name: domain.name,
            category: domain.category,
            product_type: domain.product_type,
            external_key: domain.external_key,
            currency_unit_id: domain.currency_unit_id,
            enabled: true,
        }
    }
}

/// Database model for holding deltas. Quantity and unit price persist as
/// canonical decimal strings.
#[derive(
    Queryable, Insertable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::holding_deltas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDeltaDB {
    pub product_id: i32,
    pub delta_id: i32,
    pub trading_account_id: i32,
    pub account_category_id: i32,
    pub date: String,
    pub quantity: String,
    pub unit_price: String,
}

impl From<HoldingDelta> for HoldingDeltaDB {
    fn from(domain: HoldingDelta) -> Self {
        Self {
            product_id: domain.product_id,
            delta_id: domain.delta_id,
            trading_account_id: domain.trading_account_id,
            account_category_id: domain.account_category_id,
            date: format_date(domain.date),
            quantity: domain.quantity.to_string(),
            unit_price: domain.unit_price.to_string(),
        }
    }
}

impl TryFrom<HoldingDeltaDB> for HoldingDelta {
    type Error = kakeibo_core::Error;

    fn try_from(db: HoldingDeltaDB) -> Result<Self> {
        Ok(Self {
            product_id: db.product_id,
            delta_id: db.delta_id,
            trading_account_id: db.trading_account_id,
            account_category_id: db.account_category_id,
            date: parse_date(&db.date)?,
            quantity: parse_decimal(&db.quantity)?,
            unit_price: parse_decimal(&db.unit_price)?,
        })
    }
}
