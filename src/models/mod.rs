pub mod converted_row;
pub mod rate;
pub mod record;
pub mod summary;

pub use converted_row::{ConvertedRow, RowOutcome, NO_RATE_REASON, OVERFLOW_REASON};
pub use rate::{RateEntry, RateMap};
pub use record::Record;
pub use summary::Summary;
