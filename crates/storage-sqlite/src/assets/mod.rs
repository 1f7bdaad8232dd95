//! Storage for asset snapshots and bank transactions.

pub mod model;
pub mod repository;

pub use model::{AssetSnapshotDB, BankTransactionDB};
pub use repository::{AssetSnapshotRepository, TransactionRepository};
