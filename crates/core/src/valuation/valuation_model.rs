use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::CurrencyRate;

/// Derived per-day valuation state for one investment product.
///
/// Never persisted; computed on demand by the valuation engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySnapshot {
    pub date: NaiveDate,
    /// Signed sum of delta quantities dated on or before this day.
    pub cumulative_quantity: Decimal,
    /// Zero when the cumulative quantity is zero.
    pub weighted_average_cost: Decimal,
    /// Carry-forward resolved price; `None` when no sample exists on or
    /// before this day.
    pub resolved_price: Option<Decimal>,
    /// Carry-forward resolved currency rate; identity for the base currency,
    /// `None` when unavailable. Not looked up while the quantity is zero.
    pub resolved_currency_rate: Option<Decimal>,
}

/// One merged asset total, keyed by `(date, category, institution)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub date: NaiveDate,
    pub institution: String,
    pub category: String,
    pub amount: i64,
}

/// Aggregate securities value for one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatedTotal {
    pub date: NaiveDate,
    pub total_amount: i64,
}

/// Time series for one product within a portfolio series response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProductSeries {
    pub product_id: i32,
    pub name: String,
    pub category: String,
    pub currency_unit_id: i32,
    pub daily_rates: Vec<ProductDailyRate>,
}

/// One day of a product series: resolved price plus holding state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDailyRate {
    pub date: NaiveDate,
    pub price: Decimal,
    pub quantity: Decimal,
    pub average_cost: Decimal,
}

/// Response of the portfolio series query: per-product daily series plus the
/// raw currency samples needed to convert them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSeries {
    pub products: Vec<PortfolioProductSeries>,
    pub currency_rates: Vec<CurrencyRate>,
}
