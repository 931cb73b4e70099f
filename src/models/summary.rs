use rust_decimal::Decimal;
use serde::Serialize;

/// Totals over the successfully converted rows of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    #[serde(rename = "valid")]
    pub valid_count: usize,
    #[serde(rename = "total")]
    pub total_converted: Decimal,
}
