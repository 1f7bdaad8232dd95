//! Shared constants for the kakeibo domain.

/// Currency unit id of the base (ledger) currency. It is never stored in the
/// `currency_rates` series and always resolves to an identity rate.
pub const BASE_CURRENCY_UNIT_ID: i32 = 1;

/// Institution and category label for the synthetic securities bucket that
/// the valuation engine merges into the persisted asset rows.
pub const SECURITIES_BUCKET: &str = "Securities";
