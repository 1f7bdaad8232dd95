use std::sync::Arc;

use log::debug;

use super::rates_model::{CurrencyRate, PriceRate};
use super::rates_traits::RateRepositoryTrait;
use crate::constants::BASE_CURRENCY_UNIT_ID;
use crate::errors::{Result, ValidationError};

/// Registration of rate samples.
#[derive(Clone)]
pub struct RateService {
    rate_repository: Arc<dyn RateRepositoryTrait>,
}

impl RateService {
    pub fn new(rate_repository: Arc<dyn RateRepositoryTrait>) -> Self {
        Self { rate_repository }
    }

    /// Upserts a price sample keyed by `(product_id, date)`.
    pub async fn register_price_rate(&self, rate: PriceRate) -> Result<PriceRate> {
        debug!(
            "Registering price rate for product {} on {}",
            rate.product_id, rate.date
        );
        self.rate_repository.save_price_rate(rate).await
    }

    /// Upserts a currency sample keyed by `(currency_unit_id, date)`.
    ///
    /// The base currency unit resolves to the identity rate and is never
    /// stored; registering a sample for it is rejected.
    pub async fn register_currency_rate(&self, rate: CurrencyRate) -> Result<CurrencyRate> {
        if rate.currency_unit_id == BASE_CURRENCY_UNIT_ID {
            return Err(ValidationError::InvalidInput(format!(
                "currency unit {} is the base currency and carries the implicit rate 1",
                rate.currency_unit_id
            ))
            .into());
        }
        debug!(
            "Registering currency rate for unit {} on {}",
            rate.currency_unit_id, rate.date
        );
        self.rate_repository.save_currency_rate(rate).await
    }
}
