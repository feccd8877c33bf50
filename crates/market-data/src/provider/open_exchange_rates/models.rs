//! Open Exchange Rates API response structures.

use std::collections::HashMap;

use serde::Deserialize;

/// Payload of `/latest.json` and `/historical/{date}.json`.
#[derive(Debug, Deserialize)]
pub struct RatesResponse {
    /// Unix timestamp (seconds) the rates were published at
    pub timestamp: i64,
    /// Base currency of every rate
    pub base: String,
    /// Currency code -> units per one unit of base
    pub rates: HashMap<String, f64>,
}

/// Error payload returned with non-2xx statuses.
///
/// ```json
/// { "error": true, "status": 401, "message": "invalid_app_id",
///   "description": "Invalid App ID provided. ..." }
/// ```
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ErrorResponse {
    /// Human readable text, preferring the long description.
    pub fn into_message(self) -> Option<String> {
        self.description
            .filter(|d| !d.trim().is_empty())
            .or(self.message.filter(|m| !m.trim().is_empty()))
    }
}
