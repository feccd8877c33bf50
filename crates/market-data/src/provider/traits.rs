//! Rate provider trait definitions.
//!
//! This module defines the core `RateProvider` trait that all
//! exchange rate providers must implement.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::{RateQuery, RateSnapshot};

/// Trait for exchange rate providers.
///
/// Implement this trait to add support for a new rate source. Providers map
/// the "latest" and "historical" requests onto their own endpoints and resolve
/// the calendar date of the returned table.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use fxconv_market_data::provider::RateProvider;
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl RateProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     // ... implement fetch_latest and fetch_historical
/// }
/// ```
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "OPEN_EXCHANGE_RATES".
    /// Used for logging and error messages.
    fn id(&self) -> &'static str;

    /// Fetch the most recent rate table.
    ///
    /// The returned snapshot is dated with the calendar date the provider
    /// reports for it, never with the word "latest".
    async fn fetch_latest(&self) -> Result<RateSnapshot, MarketDataError>;

    /// Fetch the end-of-day rate table for `date`.
    async fn fetch_historical(&self, date: NaiveDate) -> Result<RateSnapshot, MarketDataError>;

    /// Fetch the rate table a query asks for.
    async fn fetch(&self, query: RateQuery) -> Result<RateSnapshot, MarketDataError> {
        match query {
            RateQuery::Latest => self.fetch_latest().await,
            RateQuery::On(date) => self.fetch_historical(date).await,
        }
    }
}
