//! Open Exchange Rates provider.
//!
//! Fetches full rate tables (every supported currency, relative to USD on the
//! free plan) from two endpoints:
//! - `/latest.json` for the most recent rates
//! - `/historical/YYYY-MM-DD.json` for end-of-day rates of a past date
//!
//! The API key is passed as the `app_id` query parameter. The free plan allows
//! 1000 calls per month; exhaustion is reported as HTTP 429 and surfaced as
//! [`MarketDataError::RateLimited`].
//!
//! API documentation: https://docs.openexchangerates.org

mod models;

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::RateSnapshot;
use crate::provider::RateProvider;

use models::{ErrorResponse, RatesResponse};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://openexchangerates.org/api";

const PROVIDER_ID: &str = "OPEN_EXCHANGE_RATES";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Open Exchange Rates provider.
///
/// # Example
///
/// ```ignore
/// use fxconv_market_data::OpenExchangeRatesProvider;
///
/// let provider = OpenExchangeRatesProvider::new(Some("your_app_id".to_string()));
/// let snapshot = provider.fetch_latest().await?;
/// ```
pub struct OpenExchangeRatesProvider {
    client: Client,
    app_id: Option<String>,
    base_url: String,
}

impl OpenExchangeRatesProvider {
    /// Create a provider against the production API.
    pub fn new(app_id: Option<String>) -> Self {
        Self::with_options(app_id, DEFAULT_BASE_URL, REQUEST_TIMEOUT)
    }

    /// Create a provider with a custom API root and request timeout.
    pub fn with_options(app_id: Option<String>, base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            app_id: app_id.filter(|id| !id.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fixed explanation for statuses the API documents.
    fn status_explanation(status: StatusCode) -> &'static str {
        match status.as_u16() {
            400 => "Client requested rates for an unsupported base currency",
            401 => "Client did not provide a valid App ID",
            403 => "Access restricted for repeated over-use or other reason",
            404 => "Client requested a non-existent resource or date",
            429 => "Client exceeded the monthly request quota",
            _ => "Unexpected response from the API",
        }
    }

    /// GET an endpoint and decode the rate payload.
    async fn request(&self, path: &str) -> Result<RatesResponse, MarketDataError> {
        let app_id = self
            .app_id
            .as_deref()
            .ok_or_else(|| MarketDataError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;

        let url = self.endpoint_url(path);
        debug!("Open Exchange Rates request: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("app_id", app_id)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Open Exchange Rates quota exhausted");
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(ErrorResponse::into_message)
                .unwrap_or_else(|| Self::status_explanation(status).to_string());

            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse rates payload: {}", e),
        })
    }

    /// Turn an API payload into a snapshot.
    ///
    /// `date` pins the snapshot to a requested calendar date; when `None` the
    /// date is the UTC day of the payload timestamp.
    fn into_snapshot(
        response: RatesResponse,
        date: Option<NaiveDate>,
    ) -> Result<RateSnapshot, MarketDataError> {
        let invalid = |message: String| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message,
        };

        let timestamp = Utc
            .timestamp_opt(response.timestamp, 0)
            .single()
            .ok_or_else(|| invalid(format!("Invalid timestamp {}", response.timestamp)))?;

        if response.rates.is_empty() {
            return Err(invalid("Payload contains no rates".to_string()));
        }

        let mut rates = BTreeMap::new();
        for (code, rate) in response.rates {
            let decimal = Decimal::try_from(rate)
                .ok()
                .filter(|d| d.is_sign_positive() && !d.is_zero())
                .ok_or_else(|| invalid(format!("Invalid rate {} for {}", rate, code)))?;
            rates.insert(code.to_uppercase(), decimal);
        }

        Ok(RateSnapshot {
            date: date.unwrap_or_else(|| timestamp.date_naive()),
            timestamp,
            base: response.base.to_uppercase(),
            rates,
            source: PROVIDER_ID.into(),
        })
    }
}

#[async_trait]
impl RateProvider for OpenExchangeRatesProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_latest(&self) -> Result<RateSnapshot, MarketDataError> {
        let response = self.request("latest.json").await?;
        let snapshot = Self::into_snapshot(response, None)?;
        debug!(
            "Fetched latest rates for {} ({} currencies)",
            snapshot.date,
            snapshot.rates.len()
        );
        Ok(snapshot)
    }

    async fn fetch_historical(&self, date: NaiveDate) -> Result<RateSnapshot, MarketDataError> {
        let path = format!("historical/{}.json", date.format("%Y-%m-%d"));
        let response = self.request(&path).await?;
        let snapshot = Self::into_snapshot(response, Some(date))?;
        debug!(
            "Fetched historical rates for {} ({} currencies)",
            snapshot.date,
            snapshot.rates.len()
        );
        Ok(snapshot)
    }
}
