use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::record::Record;

/// Reason attached to rows whose date has no usable rate
pub const NO_RATE_REASON: &str = "no rate for date";

/// Reason attached to rows whose converted amount does not fit a `Decimal`
pub const OVERFLOW_REASON: &str = "conversion overflow";

/// Result of converting one record
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Converted {
        rate: Decimal,
        converted_amount: Decimal,
    },
    Failed {
        reason: String,
    },
}

/// A record enriched with either its conversion or a failure reason
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedRow {
    pub date: String,
    pub amount: Decimal,
    pub outcome: RowOutcome,
}

impl ConvertedRow {
    /// Convert `record` at `rate`, or fail the row when the quotient overflows
    pub fn converted(record: &Record, rate: Decimal) -> Self {
        let Some(converted_amount) = record.amount.checked_div(rate) else {
            return Self::failed(record, OVERFLOW_REASON);
        };

        Self {
            date: record.date.clone(),
            amount: record.amount,
            outcome: RowOutcome::Converted {
                rate,
                converted_amount,
            },
        }
    }

    pub fn failed(record: &Record, reason: impl Into<String>) -> Self {
        Self {
            date: record.date.clone(),
            amount: record.amount,
            outcome: RowOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn rate(&self) -> Option<Decimal> {
        match &self.outcome {
            RowOutcome::Converted { rate, .. } => Some(*rate),
            RowOutcome::Failed { .. } => None,
        }
    }

    pub fn converted_amount(&self) -> Option<Decimal> {
        match &self.outcome {
            RowOutcome::Converted {
                converted_amount, ..
            } => Some(*converted_amount),
            RowOutcome::Failed { .. } => None,
        }
    }

    pub fn error_reason(&self) -> Option<&str> {
        match &self.outcome {
            RowOutcome::Converted { .. } => None,
            RowOutcome::Failed { reason } => Some(reason),
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self.outcome, RowOutcome::Converted { .. })
    }
}

// Flattened shape for CSV output, one column per optional field
#[derive(Serialize)]
struct ConvertedRowSerialized<'a> {
    date: &'a str,
    amount: Decimal,
    rate: Option<Decimal>,
    converted: Option<Decimal>,
    status: &'a str,
}

impl Serialize for ConvertedRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wrapper = ConvertedRowSerialized {
            date: &self.date,
            amount: self.amount,
            rate: self.rate(),
            converted: self.converted_amount(),
            status: self.error_reason().unwrap_or("ok"),
        };
        wrapper.serialize(serializer)
    }
}
