//! FX (Foreign Exchange) module - rate tables, archive, symbols and conversion.

pub mod currency_converter;
mod fx_errors;
mod fx_model;
mod fx_service;
mod fx_traits;
mod rate_archive;
mod symbol_table;

pub use currency_converter::{round_amount, Conversion, CurrencyConverter, MissingCodePolicy};
pub use fx_errors::FxError;
pub use fx_model::{LatestPolicy, RateTable};
pub use fx_service::FxService;
pub use fx_traits::{FxServiceTrait, RateArchiveTrait};
pub use rate_archive::JsonRateArchive;
pub use symbol_table::{SymbolTable, BUNDLED_SYMBOL_TABLE};
