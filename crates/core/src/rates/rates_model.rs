use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One price sample for an investment product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRate {
    pub product_id: i32,
    pub date: NaiveDate,
    pub value: Decimal,
}

/// One sample of a foreign currency's value in base currency units.
///
/// The base currency unit itself (id 1) is never stored; it resolves to an
/// identity rate unconditionally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    pub currency_unit_id: i32,
    pub date: NaiveDate,
    pub value: Decimal,
}
