use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::PriceRate;

/// A registered investment product (security, fund, crypto asset).
///
/// Products are never deleted; `enabled = false` deactivates them. Related
/// entities are referenced by id only - any lookup is an explicit repository
/// call, never an implicit dereference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentProduct {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub product_type: String,
    /// Identifier of the product at the external quote source.
    pub external_key: String,
    pub currency_unit_id: i32,
    pub enabled: bool,
}

/// Payload for registering a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestmentProduct {
    pub name: String,
    pub category: String,
    pub product_type: String,
    pub external_key: String,
    pub currency_unit_id: i32,
}

/// One incremental change to a product holding (acquisition or disposal).
///
/// `delta_id` is scoped to the product: assigned as `max(existing) + 1` on
/// insert and never reused across products. Quantity is signed; disposals
/// are negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingDelta {
    pub product_id: i32,
    pub delta_id: i32,
    pub trading_account_id: i32,
    pub account_category_id: i32,
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Payload for registering a holding delta.
///
/// Upserts in place when `delta_id` is supplied and the `(product_id,
/// delta_id)` pair already exists; otherwise appends with the next id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHoldingDelta {
    pub product_id: i32,
    pub delta_id: Option<i32>,
    pub trading_account_id: i32,
    pub account_category_id: i32,
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// One row of the product list view: the product plus its current position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    #[serde(flatten)]
    pub product: InvestmentProduct,
    pub quantity: Decimal,
    pub average_cost: Decimal,
    /// `None` when the product has never been priced.
    pub latest_price: Option<Decimal>,
}

/// Detail view of one product: current position plus the full rate and
/// delta history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: InvestmentProduct,
    /// Total signed quantity over all deltas.
    pub quantity: Decimal,
    /// Weighted-average acquisition cost over all deltas.
    pub average_cost: Decimal,
    /// `None` when the product has never been priced.
    pub latest_price: Option<Decimal>,
    /// Every price sample, ascending by date.
    pub price_rates: Vec<PriceRate>,
    /// Every holding delta, ascending by `(date, delta_id)`.
    pub deltas: Vec<HoldingDelta>,
}

/// Per-product rollup of one trading account's holdings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAccountSummary {
    pub product_id: i32,
    pub name: String,
    pub category: String,
    pub currency_unit_id: i32,
    /// Total signed quantity held in this account.
    pub quantity: Decimal,
    /// Weighted-average acquisition cost over this account's deltas.
    pub average_cost: Decimal,
    /// Most recent price sample for the product.
    pub latest_price: Decimal,
    /// Per account-category subtotals; quantities partition the account
    /// total exactly.
    pub category_details: Vec<CategoryDetail>,
}

/// Per-category subtotal within one account's product summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub account_category_id: i32,
    pub quantity: Decimal,
    pub average_cost: Decimal,
}

/// Detail view of one trading account: product summaries ordered descending
/// by current value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradingAccountDetail {
    pub trading_account_id: i32,
    pub summaries: Vec<ProductAccountSummary>,
}
