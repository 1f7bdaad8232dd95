//! Unit tests for the valuation service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::assets::{AssetSnapshot, AssetSnapshotRepositoryTrait};
use crate::constants::SECURITIES_BUCKET;
use crate::errors::{DatabaseError, Error, Result};
use crate::holdings::{
    HoldingDelta, InvestmentProduct, NewHoldingDelta, NewInvestmentProduct, ProductRepositoryTrait,
};
use crate::rates::{CurrencyRate, PriceRate, RateRepositoryTrait};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockProductRepository {
    products: Vec<InvestmentProduct>,
    deltas: Vec<HoldingDelta>,
}

#[async_trait]
impl ProductRepositoryTrait for MockProductRepository {
    async fn create_product(&self, _new: NewInvestmentProduct) -> Result<InvestmentProduct> {
        unimplemented!()
    }

    fn get_product(&self, product_id: i32) -> Result<InvestmentProduct> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!("product {}", product_id)))
            })
    }

    fn list_products(&self) -> Result<Vec<InvestmentProduct>> {
        Ok(self.products.clone())
    }

    fn get_deltas_for_product(&self, product_id: i32) -> Result<Vec<HoldingDelta>> {
        let mut deltas: Vec<HoldingDelta> = self
            .deltas
            .iter()
            .filter(|d| d.product_id == product_id)
            .cloned()
            .collect();
        deltas.sort_by_key(|d| (d.date, d.delta_id));
        Ok(deltas)
    }

    fn get_deltas_for_account(&self, trading_account_id: i32) -> Result<Vec<HoldingDelta>> {
        let mut deltas: Vec<HoldingDelta> = self
            .deltas
            .iter()
            .filter(|d| d.trading_account_id == trading_account_id)
            .cloned()
            .collect();
        deltas.sort_by_key(|d| (d.date, d.delta_id));
        Ok(deltas)
    }

    async fn upsert_delta(&self, _new: NewHoldingDelta) -> Result<HoldingDelta> {
        unimplemented!()
    }
}

struct MockRateRepository {
    price_rates: Vec<PriceRate>,
    currency_rates: Vec<CurrencyRate>,
}

#[async_trait]
impl RateRepositoryTrait for MockRateRepository {
    fn get_price_rates(&self, product_id: i32) -> Result<Vec<PriceRate>> {
        Ok(self
            .price_rates
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }

    fn get_currency_rates(&self, currency_unit_id: i32) -> Result<Vec<CurrencyRate>> {
        Ok(self
            .currency_rates
            .iter()
            .filter(|r| r.currency_unit_id == currency_unit_id)
            .cloned()
            .collect())
    }

    fn get_currency_rates_in_range(
        &self,
        currency_unit_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CurrencyRate>> {
        Ok(self
            .currency_rates
            .iter()
            .filter(|r| r.currency_unit_id == currency_unit_id && r.date >= from && r.date <= to)
            .cloned()
            .collect())
    }

    async fn save_price_rate(&self, _rate: PriceRate) -> Result<PriceRate> {
        unimplemented!()
    }

    async fn save_currency_rate(&self, _rate: CurrencyRate) -> Result<CurrencyRate> {
        unimplemented!()
    }
}

struct MockSnapshotRepository {
    snapshots: Vec<AssetSnapshot>,
}

impl AssetSnapshotRepositoryTrait for MockSnapshotRepository {
    fn get_snapshots_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AssetSnapshot>> {
        Ok(self
            .snapshots
            .iter()
            .filter(|s| s.date >= from && s.date <= to)
            .cloned()
            .collect())
    }

    fn get_snapshots_for_date(&self, date: NaiveDate) -> Result<Vec<AssetSnapshot>> {
        Ok(self
            .snapshots
            .iter()
            .filter(|s| s.date == date)
            .cloned()
            .collect())
    }
}

fn product(id: i32, currency_unit_id: i32) -> InvestmentProduct {
    InvestmentProduct {
        id,
        name: format!("Product {}", id),
        category: "Fund".to_string(),
        product_type: "investment_trust".to_string(),
        external_key: format!("EXT{}", id),
        currency_unit_id,
        enabled: true,
    }
}

fn holding(product_id: i32, delta_id: i32, date: NaiveDate, qty: &str, price: &str) -> HoldingDelta {
    HoldingDelta {
        product_id,
        delta_id,
        trading_account_id: 1,
        account_category_id: 1,
        date,
        quantity: qty.parse().unwrap(),
        unit_price: price.parse().unwrap(),
    }
}

fn service_with(
    products: Vec<InvestmentProduct>,
    deltas: Vec<HoldingDelta>,
    price_rates: Vec<PriceRate>,
    currency_rates: Vec<CurrencyRate>,
    snapshots: Vec<AssetSnapshot>,
) -> ValuationService {
    ValuationService::new(
        Arc::new(MockProductRepository { products, deltas }),
        Arc::new(MockRateRepository {
            price_rates,
            currency_rates,
        }),
        Arc::new(MockSnapshotRepository { snapshots }),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_daily_series_concrete_scenario() {
    let service = service_with(
        vec![product(1, 1)],
        vec![
            holding(1, 1, d(2024, 1, 1), "10", "100"),
            holding(1, 2, d(2024, 1, 10), "5", "120"),
        ],
        vec![PriceRate {
            product_id: 1,
            date: d(2024, 1, 15),
            value: dec!(150),
        }],
        vec![],
        vec![],
    );

    let series = service.daily_series(1, d(2024, 1, 1), d(2024, 1, 20)).unwrap();
    assert_eq!(series.len(), 20);

    let last = series.last().unwrap();
    assert_eq!(last.cumulative_quantity, dec!(15));
    assert_eq!(last.weighted_average_cost, dec!(1600) / dec!(15));
    assert_eq!(last.resolved_price, Some(dec!(150)));
}

#[test]
fn test_daily_series_unknown_product() {
    let service = service_with(vec![], vec![], vec![], vec![], vec![]);
    let result = service.daily_series(42, d(2024, 1, 1), d(2024, 1, 2));
    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
}

#[test]
fn test_daily_series_inverted_range() {
    let service = service_with(vec![product(1, 1)], vec![], vec![], vec![], vec![]);
    let result = service.daily_series(1, d(2024, 2, 1), d(2024, 1, 1));
    assert!(matches!(result, Err(Error::InvalidDateRange { .. })));
}

#[test]
fn test_get_assets_merges_securities_bucket() {
    let service = service_with(
        vec![product(1, 1)],
        vec![holding(1, 1, d(2024, 2, 1), "10", "100")],
        vec![PriceRate {
            product_id: 1,
            date: d(2024, 2, 1),
            value: dec!(120),
        }],
        vec![],
        vec![
            AssetSnapshot {
                date: d(2024, 2, 1),
                institution: "Bank A".to_string(),
                category: "Cash".to_string(),
                amount: 1000,
                locked: false,
            },
            AssetSnapshot {
                date: d(2024, 2, 2),
                institution: "Bank A".to_string(),
                category: "Cash".to_string(),
                amount: 1100,
                locked: true,
            },
        ],
    );

    let assets = service.get_assets(d(2024, 2, 1), d(2024, 2, 2)).unwrap();

    // Sorted ascending by (date, category, institution); the securities
    // bucket appears on both held days.
    assert_eq!(assets.len(), 4);
    assert_eq!(assets[0].category, "Cash");
    assert_eq!(assets[0].amount, 1000);
    assert_eq!(assets[1].category, SECURITIES_BUCKET);
    assert_eq!(assets[1].institution, SECURITIES_BUCKET);
    assert_eq!(assets[1].amount, 1200);
    assert_eq!(assets[2].date, d(2024, 2, 2));
    assert_eq!(assets[3].amount, 1200);
}

#[test]
fn test_get_assets_filters_unpriced_products() {
    // No price samples at all: the product contributes nothing rather than
    // a fabricated zero-rate row.
    let service = service_with(
        vec![product(1, 1)],
        vec![holding(1, 1, d(2024, 2, 1), "10", "100")],
        vec![],
        vec![],
        vec![],
    );

    let assets = service.get_assets(d(2024, 2, 1), d(2024, 2, 2)).unwrap();
    assert!(assets.is_empty());
}

#[test]
fn test_get_latest_assets_restricts_to_max_date() {
    let service = service_with(
        vec![],
        vec![],
        vec![],
        vec![],
        vec![
            AssetSnapshot {
                date: d(2024, 2, 1),
                institution: "Bank A".to_string(),
                category: "Cash".to_string(),
                amount: 1000,
                locked: false,
            },
            AssetSnapshot {
                date: d(2024, 2, 3),
                institution: "Bank A".to_string(),
                category: "Cash".to_string(),
                amount: 1200,
                locked: false,
            },
            AssetSnapshot {
                date: d(2024, 2, 3),
                institution: "Bank B".to_string(),
                category: "Deposit".to_string(),
                amount: 500,
                locked: false,
            },
        ],
    );

    let latest = service.get_latest_assets(d(2024, 2, 1), d(2024, 2, 5)).unwrap();
    assert_eq!(latest.len(), 2);
    assert!(latest.iter().all(|a| a.date == d(2024, 2, 3)));
}

#[test]
fn test_get_latest_assets_empty_store() {
    let service = service_with(vec![], vec![], vec![], vec![], vec![]);
    let latest = service.get_latest_assets(d(2024, 1, 1), d(2024, 1, 5)).unwrap();
    assert!(latest.is_empty());
}

#[test]
fn test_securities_totals_apply_currency_rate() {
    // 2 units priced 12 in a foreign currency at rate 150 = 3600.
    let service = service_with(
        vec![product(1, 2)],
        vec![holding(1, 1, d(2024, 1, 1), "2", "10")],
        vec![PriceRate {
            product_id: 1,
            date: d(2024, 1, 1),
            value: dec!(12),
        }],
        vec![CurrencyRate {
            currency_unit_id: 2,
            date: d(2024, 1, 1),
            value: dec!(150),
        }],
        vec![],
    );

    let totals = service.securities_totals(d(2024, 1, 1), d(2024, 1, 1)).unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].total_amount, 3600);
}

#[test]
fn test_portfolio_series_skips_unresolved_days_and_collects_fx() {
    let service = service_with(
        vec![product(1, 2)],
        vec![holding(1, 1, d(2024, 1, 1), "2", "10")],
        vec![PriceRate {
            product_id: 1,
            date: d(2024, 1, 2),
            value: dec!(12),
        }],
        vec![CurrencyRate {
            currency_unit_id: 2,
            date: d(2024, 1, 1),
            value: dec!(150),
        }],
        vec![],
    );

    let series = service.get_portfolio_series(d(2024, 1, 1), d(2024, 1, 3)).unwrap();
    assert_eq!(series.products.len(), 1);

    let daily = &series.products[0].daily_rates;
    // Jan 1 has no resolvable price and is skipped; Jan 2-3 resolve.
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0].date, d(2024, 1, 2));
    assert_eq!(daily[0].price, dec!(12));
    assert_eq!(daily[0].quantity, dec!(2));

    assert_eq!(series.currency_rates.len(), 1);
    assert_eq!(series.currency_rates[0].currency_unit_id, 2);
}

#[test]
fn test_portfolio_series_ignores_disabled_products() {
    let mut disabled = product(1, 1);
    disabled.enabled = false;

    let service = service_with(
        vec![disabled],
        vec![holding(1, 1, d(2024, 1, 1), "2", "10")],
        vec![PriceRate {
            product_id: 1,
            date: d(2024, 1, 1),
            value: dec!(12),
        }],
        vec![],
        vec![],
    );

    let series = service.get_portfolio_series(d(2024, 1, 1), d(2024, 1, 3)).unwrap();
    assert!(series.products.is_empty());
}
