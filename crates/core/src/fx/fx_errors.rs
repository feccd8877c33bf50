use thiserror::Error;

/// Errors raised while resolving rates and converting amounts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Currency '{0}' is not present in the rate table")]
    UnknownCurrency(String),

    #[error("Currency symbol '{0}' is not known")]
    UnknownSymbol(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Rate archive is corrupt: {0}")]
    ArchiveCorruption(String),

    #[error("Rate archive error: {0}")]
    Archive(String),

    #[error("Symbol table error: {0}")]
    SymbolTable(String),
}
