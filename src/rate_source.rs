use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rust_decimal::Decimal;

use crate::error::RateLookupError;

/// External source of official daily exchange rates
///
/// One source serves one fixed target currency. Each call asks for the rate
/// published for a single calendar date (`YYYY-MM-DD`), expressed as the
/// number of source-currency units per one target-currency unit.
///
/// Implementations must be shareable across tasks: the resolver issues
/// lookups for distinct dates concurrently against the same source.
pub trait RateSource: Send + Sync {
    /// Look up the rate for one date
    ///
    /// A single attempt; callers do not retry.
    fn fetch_rate(
        &self,
        date: &str,
    ) -> impl Future<Output = Result<Decimal, RateLookupError>> + Send;

    /// ISO 4217 code of the target currency
    fn currency(&self) -> &str;
}

/// In-memory rate source
///
/// Serves rates from a fixed table, which makes runs reproducible without
/// network access. Dates missing from the table fail with
/// `RateLookupError::Unavailable`. Every lookup is counted per date, so
/// callers can check how many requests a run actually issued.
///
/// # Example
///
/// ```
/// use daily_rate_converter::rate_source::StubRateSource;
/// use rust_decimal_macros::dec;
///
/// let source = StubRateSource::new("USD")
///     .with_rate("2024-12-01", dec!(3.20))
///     .with_rate("2024-12-02", dec!(3.25));
///
/// assert_eq!(source.total_lookups(), 0);
/// ```
pub struct StubRateSource {
    currency: String,
    rates: HashMap<String, Decimal>,
    total_lookups: AtomicUsize,
    lookups: Mutex<HashMap<String, usize>>,
}

impl StubRateSource {
    /// Create an empty source for the given currency
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            rates: HashMap::new(),
            total_lookups: AtomicUsize::new(0),
            lookups: Mutex::new(HashMap::new()),
        }
    }

    /// Serve `rate` for `date`
    pub fn with_rate(mut self, date: impl Into<String>, rate: Decimal) -> Self {
        self.rates.insert(date.into(), rate);
        self
    }

    /// Number of lookups issued for `date` so far
    pub fn lookups_for(&self, date: &str) -> usize {
        self.lookups
            .lock()
            .map(|lookups| lookups.get(date).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Number of lookups issued across all dates
    pub fn total_lookups(&self) -> usize {
        self.total_lookups.load(Ordering::Relaxed)
    }

    fn record_lookup(&self, date: &str) {
        self.total_lookups.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut lookups) = self.lookups.lock() {
            *lookups.entry(date.to_string()).or_insert(0) += 1;
        }
    }
}

impl RateSource for StubRateSource {
    fn fetch_rate(
        &self,
        date: &str,
    ) -> impl Future<Output = Result<Decimal, RateLookupError>> + Send {
        async move {
            self.record_lookup(date);

            // Let sibling lookups interleave with this one
            tokio::task::yield_now().await;

            self.rates
                .get(date)
                .copied()
                .ok_or_else(|| RateLookupError::Unavailable(format!("no rate stored for {}", date)))
        }
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}
