//! Atomic application of reconciliation change sets.

pub mod repository;

pub use repository::SyncRepository;
