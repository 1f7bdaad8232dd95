//! SQLite storage implementation for Kakeibo.
//!
//! Implements the repository traits defined in `kakeibo-core` with Diesel
//! over SQLite:
//! - Connection pooling and migrations
//! - A single-writer actor serializing all writes
//! - Repository implementations for every domain entity
//!
//! This crate is the only place where Diesel appears; `core` is
//! database-agnostic and works against traits.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod assets;
pub mod holdings;
pub mod rates;
pub mod sync;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from kakeibo-core for convenience
pub use kakeibo_core::errors::{DatabaseError, Error, Result};
