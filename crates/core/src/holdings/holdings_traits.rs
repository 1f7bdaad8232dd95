use async_trait::async_trait;

use super::holdings_model::{
    HoldingDelta, InvestmentProduct, NewHoldingDelta, NewInvestmentProduct,
};
use crate::errors::Result;

/// Contract for product and holding-delta repository operations.
#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    /// Appends a product with `enabled = true` and returns it with its
    /// assigned id.
    async fn create_product(&self, new_product: NewInvestmentProduct)
        -> Result<InvestmentProduct>;

    /// Fails with `DatabaseError::NotFound` for an unknown id.
    fn get_product(&self, product_id: i32) -> Result<InvestmentProduct>;

    fn list_products(&self) -> Result<Vec<InvestmentProduct>>;

    /// Deltas for one product, ascending by `(date, delta_id)`.
    fn get_deltas_for_product(&self, product_id: i32) -> Result<Vec<HoldingDelta>>;

    /// Deltas held in one trading account, ascending by `(date, delta_id)`.
    fn get_deltas_for_account(&self, trading_account_id: i32) -> Result<Vec<HoldingDelta>>;

    /// Updates the matching `(product_id, delta_id)` row in place, or inserts
    /// with `delta_id = max(existing for product) + 1`. Runs atomically so
    /// concurrent registrations cannot allocate the same id.
    async fn upsert_delta(&self, new_delta: NewHoldingDelta) -> Result<HoldingDelta>;
}
