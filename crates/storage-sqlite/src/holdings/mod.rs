//! Storage for investment products and holding deltas.

pub mod model;
pub mod repository;

pub use model::{HoldingDeltaDB, InvestmentProductDB, NewInvestmentProductDB};
pub use repository::ProductRepository;
