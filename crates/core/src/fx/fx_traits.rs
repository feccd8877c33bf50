use super::fx_errors::FxError;
use super::fx_model::RateTable;
use crate::conversion::{ConversionRequest, ConversionResult, OutputCodes, OutputTarget};
use crate::errors::Result;
use async_trait::async_trait;
use fxconv_market_data::RateQuery;

/// Trait defining the contract for the local rate archive.
pub trait RateArchiveTrait: Send + Sync {
    /// Returns the archived table answering `query`, if any.
    fn lookup(&self, query: RateQuery) -> std::result::Result<Option<RateTable>, FxError>;

    /// Archives a table fetched for `query` under the table's own date.
    ///
    /// Storing a date that is already archived leaves the archive untouched.
    fn store(&self, query: RateQuery, table: &RateTable) -> std::result::Result<(), FxError>;
}

/// Trait defining the contract for FX service operations.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    /// Returns the rate table for `query`, from the archive or the provider.
    async fn resolve_rate_table(&self, query: RateQuery) -> Result<RateTable>;

    /// Expands an output target into the currency codes to convert into.
    fn resolve_output_codes(&self, target: &OutputTarget) -> Result<OutputCodes>;

    /// Runs a complete conversion: codes, rate table, amounts.
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult>;
}
