//! Exchange rate provider abstractions and implementations.
//!
//! This module contains:
//! - The `RateProvider` trait that all providers implement
//! - Concrete provider implementations (Open Exchange Rates)
//!
//! Providers are stateless request builders: they do not cache, retry, or
//! track quotas. Caching lives in the core crate's rate archive.

mod traits;

pub mod open_exchange_rates;

// Re-exports
pub use traits::RateProvider;
