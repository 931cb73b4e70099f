use crate::models::{ConvertedRow, RateMap, Record, NO_RATE_REASON};

/// Convert every record with the rate of its date
///
/// Produces exactly one row per record, in the same order. Records whose
/// date has no entry, an `Unavailable` entry, or a non-positive rate get a
/// failed row instead of a converted amount, as do records whose quotient
/// does not fit a `Decimal`.
pub fn convert(records: &[Record], rates: &RateMap) -> Vec<ConvertedRow> {
    records
        .iter()
        .map(|record| convert_record(record, rates))
        .collect()
}

/// Convert a single record
pub fn convert_record(record: &Record, rates: &RateMap) -> ConvertedRow {
    match rates.get(&record.date).and_then(|entry| entry.usable_rate()) {
        Some(rate) => ConvertedRow::converted(record, rate),
        None => ConvertedRow::failed(record, NO_RATE_REASON),
    }
}
