use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw balance record fetched from the external source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FetchedAssetRecord {
    pub institution: String,
    pub category: String,
    pub amount: i64,
}

/// All asset records the external source reports for one date.
///
/// Batches arrive ascending by date; a batch boundary may fail mid-stream,
/// and nothing staged from earlier batches is durable until the run commits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyAssetBatch {
    pub date: NaiveDate,
    pub records: Vec<FetchedAssetRecord>,
}

/// One raw transaction record fetched from the external source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FetchedTransaction {
    /// External, stable identifier.
    pub id: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub is_calculation_target: bool,
}
