//! Unit tests for rate registration.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::errors::{Error, Result, ValidationError};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[derive(Default)]
struct MockRateRepository {
    price_rates: Mutex<Vec<PriceRate>>,
    currency_rates: Mutex<Vec<CurrencyRate>>,
}

#[async_trait]
impl RateRepositoryTrait for MockRateRepository {
    fn get_price_rates(&self, product_id: i32) -> Result<Vec<PriceRate>> {
        Ok(self
            .price_rates
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }

    fn get_currency_rates(&self, currency_unit_id: i32) -> Result<Vec<CurrencyRate>> {
        Ok(self
            .currency_rates
            .lock()
            .unwrap()
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
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.currency_unit_id == currency_unit_id && r.date >= from && r.date <= to)
            .cloned()
            .collect())
    }

    async fn save_price_rate(&self, rate: PriceRate) -> Result<PriceRate> {
        self.price_rates.lock().unwrap().push(rate.clone());
        Ok(rate)
    }

    async fn save_currency_rate(&self, rate: CurrencyRate) -> Result<CurrencyRate> {
        self.currency_rates.lock().unwrap().push(rate.clone());
        Ok(rate)
    }
}

#[tokio::test]
async fn test_register_price_rate_delegates_to_repository() {
    let repo = Arc::new(MockRateRepository::default());
    let service = RateService::new(Arc::clone(&repo) as Arc<dyn RateRepositoryTrait>);

    let saved = service
        .register_price_rate(PriceRate {
            product_id: 1,
            date: d(2024, 3, 1),
            value: dec!(21500),
        })
        .await
        .unwrap();
    assert_eq!(saved.value, dec!(21500));
    assert_eq!(repo.price_rates.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_currency_rate_for_foreign_unit() {
    let repo = Arc::new(MockRateRepository::default());
    let service = RateService::new(Arc::clone(&repo) as Arc<dyn RateRepositoryTrait>);

    service
        .register_currency_rate(CurrencyRate {
            currency_unit_id: 2,
            date: d(2024, 3, 1),
            value: dec!(150),
        })
        .await
        .unwrap();
    assert_eq!(repo.currency_rates.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_currency_rate_rejects_base_unit() {
    let repo = Arc::new(MockRateRepository::default());
    let service = RateService::new(Arc::clone(&repo) as Arc<dyn RateRepositoryTrait>);

    let result = service
        .register_currency_rate(CurrencyRate {
            currency_unit_id: crate::constants::BASE_CURRENCY_UNIT_ID,
            date: d(2024, 3, 1),
            value: dec!(1),
        })
        .await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::InvalidInput(_)))
    ));
    // Nothing reaches the store.
    assert!(repo.currency_rates.lock().unwrap().is_empty());
}
