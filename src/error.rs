use rust_decimal::Decimal;
use thiserror::Error;

/// Run-level errors of a conversion run
/// Per-line and per-date problems never show up here; they are encoded in the rows
#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("no valid records found in input")]
    EmptyInput,

    #[error("could not fetch rates: {0}")]
    ResolverFailure(String),

    #[error("a conversion run is already in progress")]
    Busy,

    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ConverterError>;

/// Why a single date's rate lookup failed
/// Always absorbed by the resolver and turned into an unavailable entry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateLookupError {
    #[error("rate source answered with status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("response carried no rate")]
    MissingRate,

    #[error("rate {0} is not positive")]
    NonPositive(Decimal),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("rate unavailable: {0}")]
    Unavailable(String),
}
