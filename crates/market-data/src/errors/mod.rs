//! Error types for the market data crate.
//!
//! This module provides [`MarketDataError`], the error enum for all rate
//! provider operations. Providers never retry; every variant is surfaced to
//! the caller, which decides whether to abort.

use thiserror::Error;

/// Errors that can occur while fetching rate tables from a provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// No API key was configured for a provider that requires one.
    #[error("Missing API key for {provider}")]
    MissingApiKey {
        /// The provider that needs the key
        provider: String,
    },

    /// The provider rejected the call because the quota is exhausted (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success status.
    #[error("Provider error: {provider} - HTTP {status}: {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// HTTP status code of the response
        status: u16,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered 2xx but the payload could not be used.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the payload
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the error comes from the remote quota being exhausted.
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
