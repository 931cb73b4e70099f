//! Rate source backed by the National Bank of Poland public API
//!
//! Rates come from the average-rate table (`A` by default), one request per
//! date: `GET {base_url}/exchangerates/rates/{table}/{code}/{date}/?format=json`.
//! The API quotes the price of one unit of the foreign currency in PLN, which
//! matches the `amount / rate` convention for converting PLN amounts.

use std::future::Future;
use std::str::FromStr;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ConverterError, RateLookupError, Result};
use crate::rate_source::RateSource;

pub const NBP_BASE_URL: &str = "https://api.nbp.pl/api";
pub const DEFAULT_TABLE: &str = "A";
pub const DEFAULT_CURRENCY: &str = "USD";

/// Where and what to ask the rate service for
#[derive(Debug, Clone, PartialEq)]
pub struct RateSourceConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Rate table letter
    pub table: String,
    /// Target currency code
    pub currency: String,
}

impl Default for RateSourceConfig {
    fn default() -> Self {
        Self {
            base_url: NBP_BASE_URL.to_string(),
            table: DEFAULT_TABLE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl RateSourceConfig {
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into().to_uppercase();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of the rate for one date
    pub fn rate_url(&self, date: &str) -> String {
        format!(
            "{}/exchangerates/rates/{}/{}/{}/?format=json",
            self.base_url,
            self.table.to_lowercase(),
            self.currency.to_lowercase(),
            date
        )
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    rates: Vec<RateItem>,
}

#[derive(Debug, Deserialize)]
struct RateItem {
    mid: Option<serde_json::Value>,
}

/// HTTP client for the rate service
pub struct HttpRateSource {
    config: RateSourceConfig,
    client: Client,
}

impl HttpRateSource {
    /// Build a source with the transport's default timeouts
    pub fn new(config: RateSourceConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ConverterError::HttpClient(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Build a source around an already configured client
    pub fn with_client(config: RateSourceConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &RateSourceConfig {
        &self.config
    }

    async fn request_rate(&self, date: &str) -> std::result::Result<Decimal, RateLookupError> {
        let url = self.config.rate_url(date);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RateLookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateLookupError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RateLookupError::Transport(e.to_string()))?;

        parse_rate_body(&body)
    }
}

impl RateSource for HttpRateSource {
    fn fetch_rate(
        &self,
        date: &str,
    ) -> impl Future<Output = std::result::Result<Decimal, RateLookupError>> + Send {
        self.request_rate(date)
    }

    fn currency(&self) -> &str {
        &self.config.currency
    }
}

/// Extract the first `rates[].mid` from a response body
///
/// The field must be a JSON number; strings, nulls and non-positive values
/// are rejected.
pub fn parse_rate_body(body: &str) -> std::result::Result<Decimal, RateLookupError> {
    let response: RatesResponse =
        serde_json::from_str(body).map_err(|e| RateLookupError::MalformedBody(e.to_string()))?;

    let mid = response
        .rates
        .into_iter()
        .next()
        .and_then(|item| item.mid)
        .ok_or(RateLookupError::MissingRate)?;

    let number = match mid {
        serde_json::Value::Number(number) => number,
        other => {
            return Err(RateLookupError::MalformedBody(format!(
                "rate is not a number: {}",
                other
            )))
        }
    };

    let rate = Decimal::from_str(&number.to_string())
        .or_else(|_| Decimal::from_scientific(&number.to_string()))
        .map_err(|e| RateLookupError::MalformedBody(e.to_string()))?;

    if rate <= Decimal::ZERO {
        return Err(RateLookupError::NonPositive(rate));
    }

    Ok(rate)
}
