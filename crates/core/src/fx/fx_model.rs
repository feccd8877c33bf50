use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use fxconv_market_data::RateSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange rates for every known currency on one calendar date.
///
/// All rates are expressed per one unit of `base`, so the rate of `base`
/// itself is 1. A table is never modified once fetched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub date: NaiveDate,
    pub base: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub source: String,
    pub rates: BTreeMap<String, Decimal>,
}

impl RateTable {
    /// Rate of `code` relative to the base currency.
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Currency codes in alphabetical order.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }
}

impl From<RateSnapshot> for RateTable {
    fn from(snapshot: RateSnapshot) -> Self {
        Self {
            date: snapshot.date,
            base: snapshot.base,
            timestamp: snapshot.timestamp,
            source: snapshot.source.into_owned(),
            rates: snapshot.rates,
        }
    }
}

/// Whether a table archived under today's date may answer a "latest" request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LatestPolicy {
    /// Latest rates are fetched on every run; only a table fetched as latest
    /// earlier in the same process is reused.
    #[default]
    AlwaysFetch,
    /// A table already archived for today's UTC date is reused.
    SameDay,
}

impl std::str::FromStr for LatestPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "always-fetch" | "always" => Ok(Self::AlwaysFetch),
            "same-day" => Ok(Self::SameDay),
            other => Err(format!(
                "unknown latest policy '{}', expected 'always-fetch' or 'same-day'",
                other
            )),
        }
    }
}
