use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use kakeibo_core::rates::{CurrencyRate, PriceRate, RateRepositoryTrait};
use kakeibo_core::Result;

use super::model::{CurrencyRateDB, PriceRateDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{currency_rates, price_rates};
use crate::utils::format_date;

/// Repository for rate samples. Saves are upserts on the sample's natural
/// key, replacing the value on conflict.
pub struct RateRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RateRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RateRepositoryTrait for RateRepository {
    fn get_price_rates(&self, product_id: i32) -> Result<Vec<PriceRate>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = price_rates::table
            .filter(price_rates::product_id.eq(product_id))
            .order(price_rates::date.asc())
            .select(PriceRateDB::as_select())
            .load::<PriceRateDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(PriceRate::try_from).collect()
    }

    fn get_currency_rates(&self, currency_unit_id: i32) -> Result<Vec<CurrencyRate>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = currency_rates::table
            .filter(currency_rates::currency_unit_id.eq(currency_unit_id))
            .order(currency_rates::date.asc())
            .select(CurrencyRateDB::as_select())
            .load::<CurrencyRateDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(CurrencyRate::try_from).collect()
    }

    fn get_currency_rates_in_range(
        &self,
        currency_unit_id: i32,
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    ) -> Result<Vec<CurrencyRate>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = currency_rates::table
            .filter(currency_rates::currency_unit_id.eq(currency_unit_id))
            .filter(currency_rates::date.ge(format_date(from)))
            .filter(currency_rates::date.le(format_date(to)))
            .order(currency_rates::date.asc())
            .select(CurrencyRateDB::as_select())
            .load::<CurrencyRateDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(CurrencyRate::try_from).collect()
    }

    async fn save_price_rate(&self, rate: PriceRate) -> Result<PriceRate> {
        let row = PriceRateDB::from(rate);
        self.writer
            .exec(move |conn| {
                let saved = diesel::insert_into(price_rates::table)
                    .values(&row)
                    .on_conflict((price_rates::product_id, price_rates::date))
                    .do_update()
                    .set(price_rates::value.eq(&row.value))
                    .returning(PriceRateDB::as_returning())
                    .get_result::<PriceRateDB>(conn)
                    .into_core()?;
                PriceRate::try_from(saved)
            })
            .await
    }

    async fn save_currency_rate(&self, rate: CurrencyRate) -> Result<CurrencyRate> {
        let row = CurrencyRateDB::from(rate);
        self.writer
            .exec(move |conn| {
                let saved = diesel::insert_into(currency_rates::table)
                    .values(&row)
                    .on_conflict((currency_rates::currency_unit_id, currency_rates::date))
                    .do_update()
                    .set(currency_rates::value.eq(&row.value))
                    .returning(CurrencyRateDB::as_returning())
                    .get_result::<CurrencyRateDB>(conn)
                    .into_core()?;
                CurrencyRate::try_from(saved)
            })
            .await
    }
}
