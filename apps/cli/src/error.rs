use fxconv_core::errors::Error as CoreError;
use fxconv_core::fx::FxError;
use fxconv_market_data::MarketDataError;
use thiserror::Error;

/// Terminal failure of a run. Each variant has its own exit code.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("Could not obtain exchange rates: {0}")]
    ProviderFailure(MarketDataError),
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("Unknown currency symbol: {0}")]
    UnknownSymbol(String),
    #[error("{0}")]
    Core(CoreError),
    #[error("{0:#}")]
    Startup(#[from] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgs(_) => 2,
            CliError::ProviderFailure(_) => 3,
            CliError::UnknownCurrency(_) => 4,
            CliError::UnknownSymbol(_) => 5,
            CliError::Core(_) | CliError::Startup(_) => 1,
        }
    }

    /// Extra advice printed after the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::ProviderFailure(e) if e.is_quota_exhausted() => Some(
                "The monthly API quota is used up; dates already in the rate archive still convert.",
            ),
            CliError::ProviderFailure(MarketDataError::MissingApiKey { .. }) => {
                Some("Set FXCONV_APP_ID to fetch rates that are not archived yet.")
            }
            _ => None,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Fx(FxError::InvalidArgument(reason)) => CliError::InvalidArgs(reason),
            CoreError::Fx(FxError::UnknownCurrency(code)) => CliError::UnknownCurrency(code),
            CoreError::Fx(FxError::UnknownSymbol(symbol)) => CliError::UnknownSymbol(symbol),
            CoreError::MarketData(e) => CliError::ProviderFailure(e),
            other => CliError::Core(other),
        }
    }
}

impl From<FxError> for CliError {
    fn from(err: FxError) -> Self {
        CoreError::from(err).into()
    }
}

pub type CliResult<T> = Result<T, CliError>;
