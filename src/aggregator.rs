use rust_decimal::Decimal;

use crate::models::{ConvertedRow, Summary};

/// Count and total the converted rows
///
/// Failed rows are skipped. A converted amount of zero still counts as a
/// valid row. A total beyond the `Decimal` range saturates at
/// `Decimal::MAX` or `Decimal::MIN`.
pub fn summarize(rows: &[ConvertedRow]) -> Summary {
    rows.iter()
        .filter_map(ConvertedRow::converted_amount)
        .fold(Summary::default(), |mut summary, converted| {
            summary.valid_count += 1;
            summary.total_converted = summary
                .total_converted
                .checked_add(converted)
                .unwrap_or_else(|| {
                    log::warn!("Total of converted amounts overflowed, saturating");
                    if converted.is_sign_negative() {
                        Decimal::MIN
                    } else {
                        Decimal::MAX
                    }
                });
            summary
        })
}
