use super::currency_converter::{CurrencyConverter, MissingCodePolicy};
use super::fx_model::RateTable;
use super::fx_traits::{FxServiceTrait, RateArchiveTrait};
use super::symbol_table::SymbolTable;
use crate::conversion::{
    ConversionInput, ConversionRequest, ConversionResult, OutputCodes, OutputTarget,
};
use crate::errors::Result;
use async_trait::async_trait;
use fxconv_market_data::{RateProvider, RateQuery};
use std::sync::Arc;

/// Resolves rate tables (archive first, provider on a miss) and runs
/// conversions against them.
#[derive(Clone)]
pub struct FxService {
    archive: Arc<dyn RateArchiveTrait>,
    provider: Arc<dyn RateProvider>,
    symbols: Arc<SymbolTable>,
}

impl FxService {
    pub fn new(
        archive: Arc<dyn RateArchiveTrait>,
        provider: Arc<dyn RateProvider>,
        symbols: Arc<SymbolTable>,
    ) -> Self {
        Self {
            archive,
            provider,
            symbols,
        }
    }

    /// Archive lookup failures are not fatal; the provider is asked instead.
    fn archived_table(&self, query: RateQuery) -> Option<RateTable> {
        match self.archive.lookup(query) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("Rate archive lookup for {} failed: {}", query, e);
                None
            }
        }
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    async fn resolve_rate_table(&self, query: RateQuery) -> Result<RateTable> {
        if let Some(table) = self.archived_table(query) {
            log::info!("Using archived rates for {} ({})", query, table.date);
            return Ok(table);
        }

        log::info!("Fetching {} rates from {}", query, self.provider.id());
        let table = RateTable::from(self.provider.fetch(query).await?);

        if let Err(e) = self.archive.store(query, &table) {
            log::warn!("Saving rates for {} failed: {}", table.date, e);
        }

        Ok(table)
    }

    fn resolve_output_codes(&self, target: &OutputTarget) -> Result<OutputCodes> {
        let codes = match target {
            OutputTarget::Code(code) => OutputCodes::Explicit(code.clone()),
            OutputTarget::Symbol(symbol) => {
                let codes = self.symbols.codes_for_symbol(symbol)?;
                log::debug!("Symbol {} resolves to {:?}", symbol, codes);
                OutputCodes::FanOut(codes.iter().cloned().collect())
            }
            OutputTarget::All => OutputCodes::All,
        };
        Ok(codes)
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        // Symbols are resolved before any fetch so a typo never spends API quota.
        let output_codes = self.resolve_output_codes(&request.output_target)?;
        let table = self.resolve_rate_table(request.query()).await?;

        let (codes, policy) = match output_codes {
            OutputCodes::Explicit(code) => (vec![code], MissingCodePolicy::Fail),
            OutputCodes::FanOut(codes) => (codes, MissingCodePolicy::Skip),
            OutputCodes::All => (
                table.currencies().map(str::to_string).collect(),
                MissingCodePolicy::Skip,
            ),
        };

        let conversion = CurrencyConverter::new(&table).convert(
            request.amount,
            &request.input_code,
            &codes,
            policy,
        )?;

        Ok(ConversionResult {
            input: ConversionInput {
                amount: request.amount,
                currency: request.input_code.clone(),
            },
            date: table.date,
            base: table.base.clone(),
            output: conversion.amounts,
            skipped: conversion.skipped,
        })
    }
}
