//! Kakeibo Core - domain entities, services, and traits.
//!
//! This crate contains the synchronization and valuation logic for the
//! household ledger. It is database-agnostic and defines repository traits
//! that are implemented by the `storage-sqlite` crate; the external bank
//! feed is likewise consumed through a trait.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod jobs;
pub mod rates;
pub mod sync;
pub mod utils;
pub mod valuation;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
