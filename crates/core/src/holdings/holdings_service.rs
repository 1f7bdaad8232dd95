use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::holdings_model::{
    CategoryDetail, HoldingDelta, InvestmentProduct, NewHoldingDelta, NewInvestmentProduct,
    ProductAccountSummary, ProductDetail, ProductListItem, TradingAccountDetail,
};
use super::holdings_traits::ProductRepositoryTrait;
use crate::constants::BASE_CURRENCY_UNIT_ID;
use crate::errors::{Error, Result};
use crate::rates::{RateRepositoryTrait, RateSeries};
use crate::valuation::valuation_calculator::{total_quantity, weighted_average_cost};

/// Registration and rollup queries for investment products and their
/// holding deltas.
#[derive(Clone)]
pub struct HoldingsService {
    product_repository: Arc<dyn ProductRepositoryTrait>,
    rate_repository: Arc<dyn RateRepositoryTrait>,
}

impl HoldingsService {
    pub fn new(
        product_repository: Arc<dyn ProductRepositoryTrait>,
        rate_repository: Arc<dyn RateRepositoryTrait>,
    ) -> Self {
        Self {
            product_repository,
            rate_repository,
        }
    }

    /// Registers a product; new products start enabled.
    pub async fn register_product(
        &self,
        new_product: NewInvestmentProduct,
    ) -> Result<InvestmentProduct> {
        if new_product.name.trim().is_empty() {
            return Err(crate::errors::ValidationError::MissingField("name".to_string()).into());
        }
        debug!("Registering product '{}'", new_product.name);
        self.product_repository.create_product(new_product).await
    }

    /// Upserts a holding delta.
    ///
    /// An existing `(product_id, delta_id)` pair is updated in place;
    /// otherwise the delta is appended with `delta_id = max + 1` for the
    /// product.
    pub async fn register_holding_delta(&self, new_delta: NewHoldingDelta) -> Result<HoldingDelta> {
        // The product must exist; deltas hold a foreign key, not a reference.
        self.product_repository.get_product(new_delta.product_id)?;
        self.product_repository.upsert_delta(new_delta).await
    }

    /// All products with their current position, ordered descending by
    /// current base-currency value. Products never priced sort as zero value
    /// and surface a `None` price rather than a fabricated default.
    pub fn list_products(&self) -> Result<Vec<ProductListItem>> {
        let mut items = Vec::new();

        for product in self.product_repository.list_products()? {
            let deltas = self.product_repository.get_deltas_for_product(product.id)?;
            let quantity = total_quantity(&deltas);
            let average_cost = weighted_average_cost(&deltas);
            let latest_price = self.latest_price(product.id)?;
            let latest_fx = self.latest_fx(product.currency_unit_id)?;

            let value = quantity
                * latest_price.unwrap_or(Decimal::ZERO)
                * latest_fx.unwrap_or(Decimal::ZERO);

            items.push((value, ProductListItem {
                product,
                quantity,
                average_cost,
                latest_price,
            }));
        }

        items.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(items.into_iter().map(|(_, item)| item).collect())
    }

    /// Detail view of one product: current position, latest price, and the
    /// complete price and delta history, both ascending.
    pub fn product_detail(&self, product_id: i32) -> Result<ProductDetail> {
        let product = self.product_repository.get_product(product_id)?;
        let deltas = self.product_repository.get_deltas_for_product(product_id)?;
        let price_rates = self.rate_repository.get_price_rates(product_id)?;
        let latest_price =
            RateSeries::from_samples(price_rates.iter().map(|r| (r.date, r.value))).latest();

        Ok(ProductDetail {
            product,
            quantity: total_quantity(&deltas),
            average_cost: weighted_average_cost(&deltas),
            latest_price,
            price_rates,
            deltas,
        })
    }

    /// Per-product summaries for one trading account, with per-category
    /// subtotals.
    ///
    /// Category quantities partition the account total by construction, so
    /// `Σ category subtotal quantity == summary quantity` holds for every
    /// summary. Products with zero net quantity in the account are omitted.
    /// A held product without any price sample (or a foreign-currency
    /// product without fx samples) fails with `RateUnavailable` instead of
    /// defaulting.
    pub fn trading_account_detail(&self, trading_account_id: i32) -> Result<TradingAccountDetail> {
        let deltas = self
            .product_repository
            .get_deltas_for_account(trading_account_id)?;

        let mut by_product: BTreeMap<i32, Vec<HoldingDelta>> = BTreeMap::new();
        for delta in deltas {
            by_product.entry(delta.product_id).or_default().push(delta);
        }

        let mut summaries = Vec::new();

        for (product_id, product_deltas) in by_product {
            let quantity = total_quantity(&product_deltas);
            if quantity.is_zero() {
                continue;
            }

            let product = self.product_repository.get_product(product_id)?;
            let latest_price = self.latest_price(product_id)?.ok_or_else(|| {
                Error::RateUnavailable(format!("product {} has no price samples", product_id))
            })?;
            let latest_fx = match self.latest_fx(product.currency_unit_id)? {
                Some(fx) => fx,
                None => {
                    return Err(Error::RateUnavailable(format!(
                        "currency unit {} has no rate samples",
                        product.currency_unit_id
                    )))
                }
            };

            let mut by_category: BTreeMap<i32, Vec<HoldingDelta>> = BTreeMap::new();
            for delta in &product_deltas {
                by_category
                    .entry(delta.account_category_id)
                    .or_default()
                    .push(delta.clone());
            }

            let category_details = by_category
                .into_iter()
                .map(|(account_category_id, category_deltas)| CategoryDetail {
                    account_category_id,
                    quantity: total_quantity(&category_deltas),
                    average_cost: weighted_average_cost(&category_deltas),
                })
                .collect();

            let value = quantity * latest_price * latest_fx;
            summaries.push((
                value,
                ProductAccountSummary {
                    product_id,
                    name: product.name,
                    category: product.category,
                    currency_unit_id: product.currency_unit_id,
                    quantity,
                    average_cost: weighted_average_cost(&product_deltas),
                    latest_price,
                    category_details,
                },
            ));
        }

        summaries.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(TradingAccountDetail {
            trading_account_id,
            summaries: summaries.into_iter().map(|(_, s)| s).collect(),
        })
    }

    fn latest_price(&self, product_id: i32) -> Result<Option<Decimal>> {
        let rates = self.rate_repository.get_price_rates(product_id)?;
        Ok(RateSeries::from_samples(rates.into_iter().map(|r| (r.date, r.value))).latest())
    }

    /// Latest base-currency rate for a unit; identity for the base currency.
    fn latest_fx(&self, currency_unit_id: i32) -> Result<Option<Decimal>> {
        if currency_unit_id == BASE_CURRENCY_UNIT_ID {
            return Ok(Some(Decimal::ONE));
        }
        let rates = self.rate_repository.get_currency_rates(currency_unit_id)?;
        Ok(RateSeries::from_samples(rates.into_iter().map(|r| (r.date, r.value))).latest())
    }
}
