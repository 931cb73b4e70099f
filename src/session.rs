use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{ConverterError, Result};
use crate::rate_source::RateSource;
use crate::{convert_text, ConversionReport};

/// What a session shows after its latest run
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing has run yet
    Idle,
    /// A run is in flight
    Busy,
    /// The latest run failed as a whole; carries the message to display
    Failed(String),
    /// The latest run produced rows
    Completed(ConversionReport),
}

/// Caller-side state around the conversion pipeline
///
/// Holds the rate source, a busy flag that keeps runs from overlapping, and
/// the outcome of the latest run. Each run replaces the previous outcome.
///
/// # Example
///
/// ```
/// # use std::sync::Arc;
/// # use daily_rate_converter::rate_source::StubRateSource;
/// # use daily_rate_converter::session::ConversionSession;
/// # use rust_decimal_macros::dec;
/// # #[tokio::main]
/// # async fn main() {
/// let source = StubRateSource::new("USD").with_rate("2024-12-01", dec!(4));
/// let session = ConversionSession::new(Arc::new(source));
///
/// let report = session.run("2024-12-01 100").await.unwrap();
/// assert_eq!(report.summary.total_converted, dec!(25));
/// # }
/// ```
pub struct ConversionSession<S: RateSource> {
    source: Arc<S>,
    busy: AtomicBool,
    last: RwLock<Option<std::result::Result<ConversionReport, String>>>,
}

/// Clears the busy flag when a run ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: RateSource + 'static> ConversionSession<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            busy: AtomicBool::new(false),
            last: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run the pipeline over `text` and remember the outcome
    ///
    /// Returns `ConverterError::Busy` without touching the stored outcome
    /// when another run of this session has not finished yet.
    pub async fn run(&self, text: &str) -> Result<ConversionReport> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("Rejecting run while another one is in progress");
            return Err(ConverterError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        let outcome = convert_text(Arc::clone(&self.source), text).await;

        *self.last.write().await = Some(match &outcome {
            Ok(report) => Ok(report.clone()),
            Err(e) => Err(e.to_string()),
        });

        outcome
    }

    /// Current state of the session
    pub async fn state(&self) -> SessionState {
        if self.is_busy() {
            return SessionState::Busy;
        }

        match &*self.last.read().await {
            None => SessionState::Idle,
            Some(Ok(report)) => SessionState::Completed(report.clone()),
            Some(Err(message)) => SessionState::Failed(message.clone()),
        }
    }

    /// Report of the latest run, if it succeeded
    pub async fn last_report(&self) -> Option<ConversionReport> {
        match &*self.last.read().await {
            Some(Ok(report)) => Some(report.clone()),
            _ => None,
        }
    }
}
