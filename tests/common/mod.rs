#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;

use daily_rate_converter::error::RateLookupError;
use daily_rate_converter::models::{ConvertedRow, RateEntry, RateMap, Record};
use daily_rate_converter::rate_source::{RateSource, StubRateSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Input of the reference scenario: one date with a rate, one without
pub const SCENARIO_INPUT: &str = "2024-12-01 150.50\n2024-12-05; 99,30";

/// Source answering 3.20 for 2024-12-01 and failing every other date
pub fn scenario_source() -> Arc<StubRateSource> {
    Arc::new(StubRateSource::new("USD").with_rate("2024-12-01", dec!(3.20)))
}

/// Source whose lookup task dies for one date and defers to a stub otherwise
pub struct CrashingSource {
    pub inner: StubRateSource,
    pub crash_on: String,
}

impl CrashingSource {
    pub fn new(inner: StubRateSource, crash_on: &str) -> Arc<Self> {
        Arc::new(Self {
            inner,
            crash_on: crash_on.to_string(),
        })
    }
}

impl RateSource for CrashingSource {
    fn fetch_rate(
        &self,
        date: &str,
    ) -> impl Future<Output = Result<Decimal, RateLookupError>> + Send {
        async move {
            if date == self.crash_on {
                panic!("rate lookup for {} crashed", date);
            }
            self.inner.fetch_rate(date).await
        }
    }

    fn currency(&self) -> &str {
        self.inner.currency()
    }
}

/// Helper to create a record
pub fn make_record(date: &str, amount: Decimal) -> Record {
    Record::new(date, amount)
}

/// Helper to build a rate map from (date, rate) pairs; `None` marks the date unavailable
pub fn make_rates(entries: &[(&str, Option<Decimal>)]) -> RateMap {
    entries
        .iter()
        .map(|(date, rate)| {
            let entry = match rate {
                Some(rate) => RateEntry::Available(*rate),
                None => RateEntry::Unavailable,
            };
            (date.to_string(), entry)
        })
        .collect()
}

/// Assert that a row converted with the given rate and result
pub fn assert_converted(row: &ConvertedRow, date: &str, rate: Decimal, converted: Decimal) {
    assert_eq!(row.date, date);
    assert_eq!(row.rate(), Some(rate), "unexpected rate for row {:?}", row);
    assert_eq!(
        row.converted_amount(),
        Some(converted),
        "unexpected converted amount for row {:?}",
        row
    );
    assert_eq!(row.error_reason(), None);
}

/// Assert that a row failed with the given reason
pub fn assert_failed(row: &ConvertedRow, date: &str, reason: &str) {
    assert_eq!(row.date, date);
    assert_eq!(row.error_reason(), Some(reason), "row {:?} should have failed", row);
    assert_eq!(row.converted_amount(), None);
    assert_eq!(row.rate(), None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_rates() {
        let rates = make_rates(&[("2024-12-01", Some(dec!(4))), ("2024-12-02", None)]);
        assert_eq!(rates.len(), 2);
        assert_eq!(rates["2024-12-01"], RateEntry::Available(dec!(4)));
        assert_eq!(rates["2024-12-02"], RateEntry::Unavailable);
    }

    #[test]
    fn test_make_record() {
        let record = make_record("2024-12-01", dec!(10.5));
        assert_eq!(record.date, "2024-12-01");
        assert_eq!(record.amount, dec!(10.5));
    }
}
