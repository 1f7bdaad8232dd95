//! Persisted bank asset snapshots and transactions.

mod assets_model;
mod assets_service;
mod assets_traits;

pub use assets_model::*;
pub use assets_service::*;
pub use assets_traits::*;
