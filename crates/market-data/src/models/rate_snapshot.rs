use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::types::{Currency, ProviderId};

/// Which rate table a caller wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RateQuery {
    /// The most recent rates the provider has.
    Latest,
    /// End-of-day rates for a calendar date.
    On(NaiveDate),
}

impl RateQuery {
    /// Returns the requested date, or `None` for latest.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Latest => None,
            Self::On(date) => Some(*date),
        }
    }
}

impl From<Option<NaiveDate>> for RateQuery {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(Self::Latest, Self::On)
    }
}

impl fmt::Display for RateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Rate table as returned by a provider.
///
/// Every rate is expressed per one unit of `base`.
#[derive(Clone, Debug)]
pub struct RateSnapshot {
    /// Calendar date the rates belong to
    pub date: NaiveDate,

    /// Moment the provider published the rates
    pub timestamp: DateTime<Utc>,

    /// Currency every rate is relative to
    pub base: Currency,

    /// Currency code -> units of that currency per one unit of base
    pub rates: BTreeMap<Currency, Decimal>,

    /// Provider that produced the snapshot
    pub source: ProviderId,
}
