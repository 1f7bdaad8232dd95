//! Pure holding arithmetic: cumulative quantities, weighted-average cost,
//! and per-day snapshot construction.

use chrono::NaiveDate;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::valuation_model::DailySnapshot;
use crate::holdings::HoldingDelta;
use crate::rates::RateSeries;
use crate::utils::time_utils::get_days_between;

/// Signed total quantity over `deltas`.
pub fn total_quantity(deltas: &[HoldingDelta]) -> Decimal {
    deltas.iter().map(|d| d.quantity).sum()
}

/// Weighted-average acquisition cost over `deltas`:
/// `sum(quantity * unit_price) / sum(quantity)`, zero when the quantity sum
/// is zero.
pub fn weighted_average_cost(deltas: &[HoldingDelta]) -> Decimal {
    let quantity = total_quantity(deltas);
    if quantity.is_zero() {
        return Decimal::ZERO;
    }
    let cost: Decimal = deltas.iter().map(|d| d.quantity * d.unit_price).sum();
    cost / quantity
}

/// Signed quantity held as of `date` (deltas dated `<= date`).
pub fn cumulative_quantity(deltas: &[HoldingDelta], date: NaiveDate) -> Decimal {
    deltas
        .iter()
        .filter(|d| d.date <= date)
        .map(|d| d.quantity)
        .sum()
}

/// Builds one snapshot per calendar day in `[from, to]` inclusive.
///
/// `deltas` must be ascending by date. `currency_series` is `None` for
/// base-currency products, which resolve to the identity rate. A day with
/// zero cumulative quantity short-circuits: zero average cost and no rate
/// lookups.
pub fn build_daily_snapshots(
    deltas: &[HoldingDelta],
    price_series: &RateSeries,
    currency_series: Option<&RateSeries>,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<DailySnapshot> {
    let days = get_days_between(from, to);
    let mut snapshots = Vec::with_capacity(days.len());

    let mut next_delta = 0usize;
    let mut quantity = Decimal::ZERO;
    let mut cost = Decimal::ZERO;

    // Deltas dated before the range contribute to the opening position.
    while next_delta < deltas.len() && deltas[next_delta].date < from {
        quantity += deltas[next_delta].quantity;
        cost += deltas[next_delta].quantity * deltas[next_delta].unit_price;
        next_delta += 1;
    }

    for day in days {
        while next_delta < deltas.len() && deltas[next_delta].date <= day {
            quantity += deltas[next_delta].quantity;
            cost += deltas[next_delta].quantity * deltas[next_delta].unit_price;
            next_delta += 1;
        }

        if quantity.is_zero() {
            snapshots.push(DailySnapshot {
                date: day,
                cumulative_quantity: Decimal::ZERO,
                weighted_average_cost: Decimal::ZERO,
                resolved_price: None,
                resolved_currency_rate: None,
            });
            continue;
        }

        let resolved_currency_rate = match currency_series {
            None => Some(Decimal::ONE),
            Some(series) => series.resolve_as_of(day),
        };

        snapshots.push(DailySnapshot {
            date: day,
            cumulative_quantity: quantity,
            weighted_average_cost: cost / quantity,
            resolved_price: price_series.resolve_as_of(day),
            resolved_currency_rate,
        });
    }

    snapshots
}

/// Base-currency value of one snapshot, truncated to integer currency units.
///
/// `None` when the price or currency rate is unavailable for the day - the
/// caller decides whether that filters the product out or surfaces an error.
pub fn snapshot_value(snapshot: &DailySnapshot) -> Option<i64> {
    let price = snapshot.resolved_price?;
    let rate = snapshot.resolved_currency_rate?;
    let value = snapshot.cumulative_quantity * price * rate;
    value.trunc().to_i64()
}
