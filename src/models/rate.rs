use std::collections::HashMap;

use rust_decimal::Decimal;

/// Outcome of resolving the rate for one date
///
/// A rate is the price of one target-currency unit in source-currency units,
/// so a source amount converts as `amount / rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateEntry {
    Available(Decimal),
    Unavailable,
}

impl RateEntry {
    /// The rate, if it is present and usable for division
    pub fn usable_rate(&self) -> Option<Decimal> {
        match self {
            RateEntry::Available(rate) if *rate > Decimal::ZERO => Some(*rate),
            _ => None,
        }
    }
}

/// Rates for the distinct dates of one run
pub type RateMap = HashMap<String, RateEntry>;
