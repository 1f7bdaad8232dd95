use std::sync::Arc;

use async_trait::async_trait;
use diesel::dsl::max;
use diesel::prelude::*;

use kakeibo_core::errors::{DatabaseError, Error};
use kakeibo_core::holdings::{
    HoldingDelta, InvestmentProduct, NewHoldingDelta, NewInvestmentProduct, ProductRepositoryTrait,
};
use kakeibo_core::Result;

use super::model::{HoldingDeltaDB, InvestmentProductDB, NewInvestmentProductDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{holding_deltas, investment_products};
use crate::utils::format_date;

/// Repository for products and holding deltas. Reads hit the pool directly;
/// writes run on the writer actor so id allocation stays transactional.
pub struct ProductRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProductRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    async fn create_product(
        &self,
        new_product: NewInvestmentProduct,
    ) -> Result<InvestmentProduct> {
        let row = NewInvestmentProductDB::from(new_product);
        self.writer
            .exec(move |conn| {
                let inserted = diesel::insert_into(investment_products::table)
                    .values(&row)
                    .returning(InvestmentProductDB::as_returning())
                    .get_result::<InvestmentProductDB>(conn)
                    .into_core()?;
                Ok(InvestmentProduct::from(inserted))
            })
            .await
    }

    fn get_product(&self, product_id: i32) -> Result<InvestmentProduct> {
        let mut conn = get_connection(&self.pool)?;

        let row = investment_products::table
            .find(product_id)
            .select(InvestmentProductDB::as_select())
            .first::<InvestmentProductDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!("product {}", product_id)))
            })?;

        Ok(InvestmentProduct::from(row))
    }

    fn list_products(&self) -> Result<Vec<InvestmentProduct>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = investment_products::table
            .order(investment_products::id.asc())
            .select(InvestmentProductDB::as_select())
            .load::<InvestmentProductDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(InvestmentProduct::from).collect())
    }

    fn get_deltas_for_product(&self, product_id: i32) -> Result<Vec<HoldingDelta>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = holding_deltas::table
            .filter(holding_deltas::product_id.eq(product_id))
            .order((holding_deltas::date.asc(), holding_deltas::delta_id.asc()))
            .select(HoldingDeltaDB::as_select())
            .load::<HoldingDeltaDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(HoldingDelta::try_from).collect()
    }

    fn get_deltas_for_account(&self, trading_account_id: i32) -> Result<Vec<HoldingDelta>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = holding_deltas::table
            .filter(holding_deltas::trading_account_id.eq(trading_account_id))
            .order((holding_deltas::date.asc(), holding_deltas::delta_id.asc()))
            .select(HoldingDeltaDB::as_select())
            .load::<HoldingDeltaDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(HoldingDelta::try_from).collect()
    }

    async fn upsert_delta(&self, new_delta: NewHoldingDelta) -> Result<HoldingDelta> {
        self.writer
            .exec(move |conn| {
                // Inside the writer's transaction, so the max+1 read cannot
                // race another insert for the same product.
                if let Some(delta_id) = new_delta.delta_id {
                    let updated = diesel::update(
                        holding_deltas::table.find((new_delta.product_id, delta_id)),
                    )
                    .set((
                        holding_deltas::trading_account_id.eq(new_delta.trading_account_id),
                        holding_deltas::account_category_id.eq(new_delta.account_category_id),
                        holding_deltas::date.eq(format_date(new_delta.date)),
                        holding_deltas::quantity.eq(new_delta.quantity.to_string()),
                        holding_deltas::unit_price.eq(new_delta.unit_price.to_string()),
                    ))
                    .returning(HoldingDeltaDB::as_returning())
                    .get_result::<HoldingDeltaDB>(conn)
                    .optional()
                    .into_core()?;

                    if let Some(row) = updated {
                        return HoldingDelta::try_from(row);
                    }
                }

                let next_id = holding_deltas::table
                    .filter(holding_deltas::product_id.eq(new_delta.product_id))
                    .select(max(holding_deltas::delta_id))
                    .first::<Option<i32>>(conn)
                    .into_core()?
                    .unwrap_or(0)
                    + 1;

                let row = HoldingDeltaDB {
                    product_id: new_delta.product_id,
                    delta_id: next_id,
                    trading_account_id: new_delta.trading_account_id,
                    account_category_id: new_delta.account_category_id,
                    date: format_date(new_delta.date),
                    quantity: new_delta.quantity.to_string(),
                    unit_price: new_delta.unit_price.to_string(),
                };

                let inserted = diesel::insert_into(holding_deltas::table)
                    .values(&row)
                    .returning(HoldingDeltaDB::as_returning())
                    .get_result::<HoldingDeltaDB>(conn)
                    .into_core()?;

                HoldingDelta::try_from(inserted)
            })
            .await
    }
}
