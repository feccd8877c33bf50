use std::sync::Arc;

use anyhow::Context;
use fxconv_core::conversion::{JsonResultWriter, ResultWriterTrait};
use fxconv_core::fx::{FxService, FxServiceTrait, JsonRateArchive, SymbolTable};
use fxconv_market_data::OpenExchangeRatesProvider;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};

/// Services used by a single conversion run.
pub struct AppContext {
    pub symbols: Arc<SymbolTable>,
    pub fx_service: Arc<dyn FxServiceTrait>,
    pub result_writer: Arc<dyn ResultWriterTrait>,
}

/// Installs the global subscriber. Logs go to stderr; stdout carries results.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_context(config: &Config) -> anyhow::Result<AppContext> {
    let symbols = match &config.symbol_table {
        Some(path) => SymbolTable::load(path)
            .with_context(|| format!("Loading symbol table {}", path.display()))?,
        None => SymbolTable::bundled().context("Loading bundled symbol table")?,
    };
    let symbols = Arc::new(symbols);
    tracing::debug!("Symbol table has {} entries", symbols.len());

    let archive = Arc::new(JsonRateArchive::open(
        &config.archive_file,
        config.latest_policy,
    ));
    tracing::info!(
        "Rate archive in use: {} ({} dates)",
        archive.path().display(),
        archive.dates().len()
    );

    let provider = Arc::new(OpenExchangeRatesProvider::with_options(
        config.app_id.clone(),
        &config.api_url,
        config.request_timeout,
    ));

    let fx_service: Arc<dyn FxServiceTrait> =
        Arc::new(FxService::new(archive, provider, symbols.clone()));
    let result_writer: Arc<dyn ResultWriterTrait> =
        Arc::new(JsonResultWriter::new(&config.output_file));

    Ok(AppContext {
        symbols,
        fx_service,
        result_writer,
    })
}
