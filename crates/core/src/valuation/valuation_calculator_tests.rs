//! Unit tests for the valuation calculator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::valuation_calculator::*;
use crate::holdings::HoldingDelta;
use crate::rates::RateSeries;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn delta(delta_id: i32, date: NaiveDate, quantity: Decimal, unit_price: Decimal) -> HoldingDelta {
    HoldingDelta {
        product_id: 1,
        delta_id,
        trading_account_id: 1,
        account_category_id: 1,
        date,
        quantity,
        unit_price,
    }
}

#[test]
fn test_weighted_average_cost() {
    let deltas = vec![
        delta(1, d(2024, 1, 1), dec!(10), dec!(100)),
        delta(2, d(2024, 1, 10), dec!(5), dec!(120)),
    ];
    assert_eq!(total_quantity(&deltas), dec!(15));
    assert_eq!(weighted_average_cost(&deltas), dec!(1600) / dec!(15));
}

#[test]
fn test_weighted_average_cost_of_flat_position_is_zero() {
    let deltas = vec![
        delta(1, d(2024, 1, 1), dec!(10), dec!(100)),
        delta(2, d(2024, 1, 10), dec!(-10), dec!(110)),
    ];
    assert_eq!(weighted_average_cost(&deltas), Decimal::ZERO);
}

#[test]
fn test_cumulative_quantity_ignores_later_deltas() {
    let deltas = vec![
        delta(1, d(2024, 1, 1), dec!(10), dec!(100)),
        delta(2, d(2024, 1, 10), dec!(5), dec!(120)),
    ];
    assert_eq!(cumulative_quantity(&deltas, d(2024, 1, 5)), dec!(10));
    assert_eq!(cumulative_quantity(&deltas, d(2024, 1, 10)), dec!(15));
    assert_eq!(cumulative_quantity(&deltas, d(2023, 12, 31)), Decimal::ZERO);
}

#[test]
fn test_daily_series_acquisition_then_price_sample() {
    // Acquire 10@100, then 5@120, price sampled at 150 on the 15th.
    let deltas = vec![
        delta(1, d(2024, 1, 1), dec!(10), dec!(100)),
        delta(2, d(2024, 1, 10), dec!(5), dec!(120)),
    ];
    let prices = RateSeries::from_samples([(d(2024, 1, 15), dec!(150))]);

    let snapshots = build_daily_snapshots(&deltas, &prices, None, d(2024, 1, 1), d(2024, 1, 20));
    assert_eq!(snapshots.len(), 20);

    let last = &snapshots[19];
    assert_eq!(last.date, d(2024, 1, 20));
    assert_eq!(last.cumulative_quantity, dec!(15));
    assert_eq!(last.weighted_average_cost, dec!(1600) / dec!(15));
    assert_eq!(last.resolved_price, Some(dec!(150)));
    assert_eq!(last.resolved_currency_rate, Some(Decimal::ONE));

    // Before the first price sample the price is unavailable, not carried
    // backward from the 15th.
    let before_sample = &snapshots[13];
    assert_eq!(before_sample.date, d(2024, 1, 14));
    assert_eq!(before_sample.cumulative_quantity, dec!(15));
    assert_eq!(before_sample.resolved_price, None);
}

#[test]
fn test_daily_series_zero_quantity_short_circuits() {
    let deltas = vec![delta(1, d(2024, 1, 10), dec!(10), dec!(100))];
    let prices = RateSeries::from_samples([(d(2024, 1, 1), dec!(50))]);

    let snapshots = build_daily_snapshots(&deltas, &prices, None, d(2024, 1, 8), d(2024, 1, 10));

    // Nothing held yet: zero fields, no rate resolution even though a
    // sample exists.
    assert_eq!(snapshots[0].cumulative_quantity, Decimal::ZERO);
    assert_eq!(snapshots[0].weighted_average_cost, Decimal::ZERO);
    assert_eq!(snapshots[0].resolved_price, None);
    assert_eq!(snapshots[0].resolved_currency_rate, None);

    assert_eq!(snapshots[2].cumulative_quantity, dec!(10));
    assert_eq!(snapshots[2].resolved_price, Some(dec!(50)));
}

#[test]
fn test_daily_series_opening_position_before_range() {
    let deltas = vec![delta(1, d(2023, 6, 1), dec!(4), dec!(25))];
    let prices = RateSeries::from_samples([(d(2023, 6, 1), dec!(30))]);

    let snapshots = build_daily_snapshots(&deltas, &prices, None, d(2024, 1, 1), d(2024, 1, 2));
    assert_eq!(snapshots[0].cumulative_quantity, dec!(4));
    assert_eq!(snapshots[0].weighted_average_cost, dec!(25));
}

#[test]
fn test_daily_series_foreign_currency_rate() {
    let deltas = vec![delta(1, d(2024, 1, 1), dec!(2), dec!(10))];
    let prices = RateSeries::from_samples([(d(2024, 1, 1), dec!(12))]);
    let fx = RateSeries::from_samples([(d(2024, 1, 2), dec!(150))]);

    let snapshots =
        build_daily_snapshots(&deltas, &prices, Some(&fx), d(2024, 1, 1), d(2024, 1, 3));

    assert_eq!(snapshots[0].resolved_currency_rate, None);
    assert_eq!(snapshots[1].resolved_currency_rate, Some(dec!(150)));
    assert_eq!(snapshots[2].resolved_currency_rate, Some(dec!(150)));
}

#[test]
fn test_snapshot_value_truncates_toward_zero() {
    let deltas = vec![delta(1, d(2024, 1, 1), dec!(3), dec!(10))];
    let prices = RateSeries::from_samples([(d(2024, 1, 1), dec!(10.5))]);

    let snapshots = build_daily_snapshots(&deltas, &prices, None, d(2024, 1, 1), d(2024, 1, 1));
    // 3 * 10.5 = 31.5 -> 31
    assert_eq!(snapshot_value(&snapshots[0]), Some(31));
}

#[test]
fn test_snapshot_value_unavailable_rate_is_none() {
    let deltas = vec![delta(1, d(2024, 1, 1), dec!(3), dec!(10))];
    let prices = RateSeries::new();

    let snapshots = build_daily_snapshots(&deltas, &prices, None, d(2024, 1, 1), d(2024, 1, 1));
    assert_eq!(snapshot_value(&snapshots[0]), None);
}
