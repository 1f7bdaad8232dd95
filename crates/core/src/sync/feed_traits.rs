use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::BoxStream;

use super::feed_model::{DailyAssetBatch, FetchedTransaction};
use crate::errors::Result;

/// External collaborator supplying raw bank records for a date range.
///
/// Implementations wrap the scraping/API client. Errors surface as
/// `Error::ExternalFetch` and abort the reconciliation run that observes
/// them. The stream is restartable: a retried run fetches from scratch.
#[async_trait]
pub trait BankFeedProviderTrait: Send + Sync {
    /// Per-date asset batches for `[from, to]`, ascending by date.
    fn fetch_asset_batches(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BoxStream<'_, Result<DailyAssetBatch>>;

    /// All transactions dated within `[from, to]`.
    async fn fetch_transactions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FetchedTransaction>>;
}
