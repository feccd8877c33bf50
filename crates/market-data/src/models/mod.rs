//! Market data models
//!
//! This module contains the core data types for rate fetching:
//! - `types` - Type aliases for common identifiers (ProviderId, Currency)
//! - `rate_snapshot` - A provider's rate table for one calendar date (RateSnapshot, RateQuery)

mod rate_snapshot;
mod types;

pub use rate_snapshot::{RateQuery, RateSnapshot};
pub use types::{Currency, ProviderId};
