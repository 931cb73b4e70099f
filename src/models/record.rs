use rust_decimal::Decimal;

/// One dated amount parsed from a line of input, in source-currency units
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: String,
    pub amount: Decimal,
}

impl Record {
    pub fn new(date: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date: date.into(),
            amount,
        }
    }
}
