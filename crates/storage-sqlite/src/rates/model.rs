//! Database models for rate samples.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use kakeibo_core::errors::Result;
use kakeibo_core::rates::{CurrencyRate, PriceRate};

use crate::utils::{format_date, parse_date, parse_decimal};

#[derive(
    Queryable, Insertable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::price_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceRateDB {
    pub product_id: i32,
    pub date: String,
    pub value: String,
}

impl From<PriceRate> for PriceRateDB {
    fn from(domain: PriceRate) -> Self {
        Self {
            product_id: domain.product_id,
            date: format_date(domain.date),
            value: domain.value.to_string(),
        }
    }
}

impl TryFrom<PriceRateDB> for PriceRate {
    type Error = kakeibo_core::Error;

    fn try_from(db: PriceRateDB) -> Result<Self> {
        Ok(Self {
            product_id: db.product_id,
            date: parse_date(&db.date)?,
            value: parse_decimal(&db.value)?,
        })
    }
}

#[derive(
    Queryable, Insertable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::currency_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CurrencyRateDB {
    pub currency_unit_id: i32,
    pub date: String,
    pub value: String,
}

impl From<CurrencyRate> for CurrencyRateDB {
    fn from(domain: CurrencyRate) -> Self {
        Self {
            currency_unit_id: domain.currency_unit_id,
            date: format_date(domain.date),
            value: domain.value.to_string(),
        }
    }
}

impl TryFrom<CurrencyRateDB> for CurrencyRate {
    type Error = kakeibo_core::Error;

    fn try_from(db: CurrencyRateDB) -> Result<Self> {
        Ok(Self {
            currency_unit_id: db.currency_unit_id,
            date: parse_date(&db.date)?,
            value: parse_decimal(&db.value)?,
        })
    }
}
