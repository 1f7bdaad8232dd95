use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use super::valuation_calculator::{build_daily_snapshots, snapshot_value};
use super::valuation_model::{
    AssetBalance, DailySnapshot, DatedTotal, PortfolioProductSeries, PortfolioSeries,
    ProductDailyRate,
};
use crate::assets::AssetSnapshotRepositoryTrait;
use crate::constants::{BASE_CURRENCY_UNIT_ID, SECURITIES_BUCKET};
use crate::errors::{Error, Result};
use crate::holdings::{InvestmentProduct, ProductRepositoryTrait};
use crate::rates::{CurrencyRate, RateRepositoryTrait, RateSeries};

/// Read-only valuation queries over holdings, rates, and persisted asset
/// rows.
///
/// Side-effect free; safe to run concurrently with reconciliation runs. The
/// multi-table reads are not taken under one isolation snapshot - read skew
/// between holdings and rates is an accepted tolerance.
#[derive(Clone)]
pub struct ValuationService {
    product_repository: Arc<dyn ProductRepositoryTrait>,
    rate_repository: Arc<dyn RateRepositoryTrait>,
    snapshot_repository: Arc<dyn AssetSnapshotRepositoryTrait>,
}

impl ValuationService {
    pub fn new(
        product_repository: Arc<dyn ProductRepositoryTrait>,
        rate_repository: Arc<dyn RateRepositoryTrait>,
        snapshot_repository: Arc<dyn AssetSnapshotRepositoryTrait>,
    ) -> Self {
        Self {
            product_repository,
            rate_repository,
            snapshot_repository,
        }
    }

    /// One snapshot per calendar day in `[from, to]` for one product.
    pub fn daily_series(
        &self,
        product_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailySnapshot>> {
        if from > to {
            return Err(Error::InvalidDateRange { from, to });
        }
        let product = self.product_repository.get_product(product_id)?;
        let deltas = self.product_repository.get_deltas_for_product(product_id)?;
        let price_series = self.price_series(product_id)?;
        let currency_series = self.currency_series(product.currency_unit_id)?;

        Ok(build_daily_snapshots(
            &deltas,
            &price_series,
            currency_series.as_ref(),
            from,
            to,
        ))
    }

    /// Merged asset totals: persisted snapshot rows plus the synthetic
    /// securities bucket, grouped and totalled by
    /// `(date, category, institution)`, ascending.
    pub fn get_assets(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<AssetBalance>> {
        if from > to {
            return Err(Error::InvalidDateRange { from, to });
        }
        debug!("Merging asset totals from {} to {}", from, to);

        // (date, category, institution) gives the required sort for free.
        let mut totals: BTreeMap<(NaiveDate, String, String), i64> = BTreeMap::new();

        for row in self.snapshot_repository.get_snapshots_in_range(from, to)? {
            *totals
                .entry((row.date, row.category, row.institution))
                .or_insert(0) += row.amount;
        }

        for total in self.securities_totals(from, to)? {
            *totals
                .entry((
                    total.date,
                    SECURITIES_BUCKET.to_string(),
                    SECURITIES_BUCKET.to_string(),
                ))
                .or_insert(0) += total.total_amount;
        }

        Ok(totals
            .into_iter()
            .map(|((date, category, institution), amount)| AssetBalance {
                date,
                institution,
                category,
                amount,
            })
            .collect())
    }

    /// `get_assets` restricted to the maximum date present in the range.
    pub fn get_latest_assets(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<AssetBalance>> {
        let assets = self.get_assets(from, to)?;
        let Some(max_date) = assets.iter().map(|a| a.date).max() else {
            return Ok(Vec::new());
        };
        Ok(assets.into_iter().filter(|a| a.date == max_date).collect())
    }

    /// Aggregate securities value per date: `Σ products trunc(qty·price·fx)`.
    ///
    /// A product whose price or currency rate is unavailable on a date is
    /// filtered out of that date's total; dates with no contributing product
    /// are omitted entirely.
    pub fn securities_totals(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DatedTotal>> {
        if from > to {
            return Err(Error::InvalidDateRange { from, to });
        }

        let mut totals: BTreeMap<NaiveDate, i64> = BTreeMap::new();

        for product in self.enabled_products()? {
            for snapshot in self.product_snapshots(&product, from, to)? {
                if snapshot.cumulative_quantity.is_zero() {
                    continue;
                }
                if let Some(value) = snapshot_value(&snapshot) {
                    *totals.entry(snapshot.date).or_insert(0) += value;
                }
            }
        }

        Ok(totals
            .into_iter()
            .map(|(date, total_amount)| DatedTotal { date, total_amount })
            .collect())
    }

    /// Per-product daily series plus the raw currency samples in range.
    ///
    /// Daily entries cover the days where the product is held and its price
    /// resolves; currency conversion is left to the caller via the returned
    /// samples.
    pub fn get_portfolio_series(&self, from: NaiveDate, to: NaiveDate) -> Result<PortfolioSeries> {
        if from > to {
            return Err(Error::InvalidDateRange { from, to });
        }

        let products = self.enabled_products()?;
        let mut series = Vec::with_capacity(products.len());
        let mut currency_rates: Vec<CurrencyRate> = Vec::new();
        let mut seen_units: HashSet<i32> = HashSet::new();

        for product in products {
            let daily_rates: Vec<ProductDailyRate> = self
                .product_snapshots(&product, from, to)?
                .into_iter()
                .filter(|s| !s.cumulative_quantity.is_zero())
                .filter_map(|s| {
                    s.resolved_price.map(|price| ProductDailyRate {
                        date: s.date,
                        price,
                        quantity: s.cumulative_quantity,
                        average_cost: s.weighted_average_cost,
                    })
                })
                .collect();

            if product.currency_unit_id != BASE_CURRENCY_UNIT_ID
                && seen_units.insert(product.currency_unit_id)
            {
                currency_rates.extend(self.rate_repository.get_currency_rates_in_range(
                    product.currency_unit_id,
                    from,
                    to,
                )?);
            }

            series.push(PortfolioProductSeries {
                product_id: product.id,
                name: product.name,
                category: product.category,
                currency_unit_id: product.currency_unit_id,
                daily_rates,
            });
        }

        Ok(PortfolioSeries {
            products: series,
            currency_rates,
        })
    }

    fn enabled_products(&self) -> Result<Vec<InvestmentProduct>> {
        Ok(self
            .product_repository
            .list_products()?
            .into_iter()
            .filter(|p| p.enabled)
            .collect())
    }

    fn product_snapshots(
        &self,
        product: &InvestmentProduct,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailySnapshot>> {
        let deltas = self.product_repository.get_deltas_for_product(product.id)?;
        let price_series = self.price_series(product.id)?;
        let currency_series = self.currency_series(product.currency_unit_id)?;
        Ok(build_daily_snapshots(
            &deltas,
            &price_series,
            currency_series.as_ref(),
            from,
            to,
        ))
    }

    fn price_series(&self, product_id: i32) -> Result<RateSeries> {
        let rates = self.rate_repository.get_price_rates(product_id)?;
        Ok(RateSeries::from_samples(
            rates.into_iter().map(|r| (r.date, r.value)),
        ))
    }

    /// `None` for the base currency unit - it resolves to the identity rate
    /// without consulting any series.
    fn currency_series(&self, currency_unit_id: i32) -> Result<Option<RateSeries>> {
        if currency_unit_id == BASE_CURRENCY_UNIT_ID {
            return Ok(None);
        }
        let rates = self.rate_repository.get_currency_rates(currency_unit_id)?;
        Ok(Some(RateSeries::from_samples(
            rates.into_iter().map(|r| (r.date, r.value)),
        )))
    }
}
