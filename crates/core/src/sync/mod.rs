//! Reconciliation of externally fetched bank data into the persisted store.

mod feed_model;
mod feed_traits;
mod sync_model;
mod sync_service;
mod sync_traits;

pub use feed_model::*;
pub use feed_traits::*;
pub use sync_model::*;
pub use sync_service::*;
pub use sync_traits::*;
