//! Price and currency rate series with carry-forward resolution.

mod rate_resolver;
mod rates_model;
mod rates_service;
mod rates_traits;

pub use rate_resolver::*;
pub use rates_model::*;
pub use rates_service::*;
pub use rates_traits::*;

#[cfg(test)]
mod rates_service_tests;
