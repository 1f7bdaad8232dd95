use async_trait::async_trait;
use chrono::NaiveDate;

use super::rates_model::{CurrencyRate, PriceRate};
use crate::errors::Result;

/// Contract for rate repository operations.
///
/// Rate rows are written by registration calls and read-only to the
/// valuation engine.
#[async_trait]
pub trait RateRepositoryTrait: Send + Sync {
    /// Price samples for one product, ascending by date.
    fn get_price_rates(&self, product_id: i32) -> Result<Vec<PriceRate>>;

    /// Currency samples for one unit, ascending by date. The base currency
    /// unit has no stored samples.
    fn get_currency_rates(&self, currency_unit_id: i32) -> Result<Vec<CurrencyRate>>;

    /// Currency samples for one unit restricted to `[from, to]`.
    fn get_currency_rates_in_range(
        &self,
        currency_unit_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CurrencyRate>>;

    /// Upsert keyed by `(product_id, date)`.
    async fn save_price_rate(&self, rate: PriceRate) -> Result<PriceRate>;

    /// Upsert keyed by `(currency_unit_id, date)`. The base currency unit
    /// carries the implicit identity rate and must never be stored;
    /// [`RateService`](super::RateService) rejects it before this call.
    async fn save_currency_rate(&self, rate: CurrencyRate) -> Result<CurrencyRate>;
}
