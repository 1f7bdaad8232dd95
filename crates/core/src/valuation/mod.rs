//! Valuation engine - daily snapshots, portfolio series, merged asset totals.

pub mod valuation_calculator;
mod valuation_model;
mod valuation_service;

pub use valuation_calculator::*;
pub use valuation_model::*;
pub use valuation_service::*;

#[cfg(test)]
mod valuation_calculator_tests;

#[cfg(test)]
mod valuation_service_tests;
