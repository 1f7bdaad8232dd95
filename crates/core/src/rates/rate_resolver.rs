use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// An ordered series of dated samples supporting carry-forward resolution:
/// "value as of date" picks the sample with the greatest date not after the
/// target.
///
/// Duplicate sample dates collapse deterministically: the first sample seen
/// for a date wins, so resolution is stable regardless of how callers obtain
/// the raw rows.
#[derive(Debug, Clone, Default)]
pub struct RateSeries {
    samples: BTreeMap<NaiveDate, Decimal>,
}

impl RateSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from `(date, value)` pairs in caller order.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Decimal)>,
    {
        let mut series = Self::new();
        for (date, value) in samples {
            series.samples.entry(date).or_insert(value);
        }
        series
    }

    /// Resolves the effective value as of `date`.
    ///
    /// Returns `None` when no sample exists on or before `date` - an explicit
    /// "unavailable" signal, never a sentinel and never the earliest later
    /// sample. Callers decide whether unavailable is filtered, collapses to
    /// zero, or propagates as an error.
    pub fn resolve_as_of(&self, date: NaiveDate) -> Option<Decimal> {
        self.samples
            .range(..=date)
            .next_back()
            .map(|(_, value)| *value)
    }

    /// The most recent sample in the series, if any.
    pub fn latest(&self) -> Option<Decimal> {
        self.samples.iter().next_back().map(|(_, value)| *value)
    }
}
