//! fxconv Market Data Crate
//!
//! This crate provides provider-agnostic exchange rate fetching for the
//! fxconv converter.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |    FxService     | --> |    RateQuery     |  (latest or a calendar date)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   RateProvider   |  (Open Exchange Rates, ...)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   RateSnapshot   |  (dated rate table)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RateQuery`] - Latest rates or rates for a specific date
//! - [`RateSnapshot`] - A provider's rate table for one calendar date
//! - [`RateProvider`] - Trait implemented by every rate source
//! - [`MarketDataError`] - Provider failures

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{Currency, ProviderId, RateQuery, RateSnapshot};
pub use provider::open_exchange_rates::{OpenExchangeRatesProvider, DEFAULT_BASE_URL};
pub use provider::RateProvider;
