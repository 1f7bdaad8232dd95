//! Storage for price and currency rate samples.

pub mod model;
pub mod repository;

pub use model::{CurrencyRateDB, PriceRateDB};
pub use repository::RateRepository;
