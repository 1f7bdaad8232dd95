use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use super::assets_model::BankTransaction;
use super::assets_traits::TransactionRepositoryTrait;
use crate::errors::{Error, Result};

/// Read-side queries over persisted bank transactions.
#[derive(Clone)]
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Calculation-target transactions in `[from, to]`, ascending by date.
    pub fn get_transactions(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<BankTransaction>> {
        if from > to {
            return Err(Error::InvalidDateRange { from, to });
        }
        debug!("Loading transactions from {} to {}", from, to);
        self.repository.get_transactions_in_range(from, to)
    }
}
