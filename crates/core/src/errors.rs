//! Core error types for fxconv.
//!
//! Provider failures arrive as [`MarketDataError`] and are wrapped unchanged
//! so the caller can still tell a quota problem from a network outage.

use thiserror::Error;

use crate::fx::FxError;
use fxconv_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for conversion runs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
