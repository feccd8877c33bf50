//! fxconv Core - Domain entities, services, and traits.
//!
//! This crate contains the conversion logic for fxconv: dated rate tables,
//! the local rate archive, the currency symbol table, the converter and the
//! result writer. Remote fetching is delegated to `fxconv-market-data`.

pub mod constants;
pub mod conversion;
pub mod errors;
pub mod fx;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
