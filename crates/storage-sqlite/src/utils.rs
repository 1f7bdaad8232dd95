//! Text-column codecs shared by the storage models.
//!
//! Dates persist as `%Y-%m-%d` TEXT and decimals as their canonical string
//! form, so SQLite's default BINARY collation orders both correctly.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use kakeibo_core::errors::Result;

/// SQLite caps the parameters of one statement (SQLITE_MAX_VARIABLE_NUMBER,
/// usually 999). `IN (...)` queries over caller-supplied id lists chunk at
/// 500 to stay under it with headroom.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value, DATE_FORMAT)?)
}

pub fn parse_decimal(value: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(value)?)
}
