use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use fxconv_market_data::RateQuery;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{CURRENCY_CODE_LEN, MIN_RATE_DATE, USER_DATE_FORMAT};
use crate::fx::{FxError, SymbolTable};

/// What the user asked to convert into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A single ISO 4217 code, uppercase.
    Code(String),
    /// A currency symbol, expanded through the symbol table.
    Symbol(String),
    /// Every currency of the rate table.
    All,
}

impl OutputTarget {
    /// Classifies raw user input.
    ///
    /// Known symbols win over codes so entries such as "lei" stay symbols.
    /// Any other three-letter alphabetic input is a code; everything else is
    /// treated as a symbol and fails later if the table does not know it.
    pub fn classify(raw: Option<&str>, symbols: &SymbolTable) -> Self {
        let raw = match raw.map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => return Self::All,
        };

        if symbols.contains(raw) {
            Self::Symbol(raw.to_string())
        } else if is_currency_code(raw) {
            Self::Code(raw.to_ascii_uppercase())
        } else {
            Self::Symbol(raw.to_string())
        }
    }
}

/// Output codes after symbol expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputCodes {
    /// One code; a missing rate is an error.
    Explicit(String),
    /// Codes sharing a symbol; missing rates are skipped.
    FanOut(Vec<String>),
    /// Whatever the rate table holds.
    All,
}

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub input_code: String,
    pub output_target: OutputTarget,
    /// `None` means latest rates.
    pub date: Option<NaiveDate>,
}

impl ConversionRequest {
    /// Validates raw command line values.
    ///
    /// `today` bounds the accepted date range from above.
    pub fn parse(
        amount: &str,
        input_currency: &str,
        output_currency: Option<&str>,
        date: Option<&str>,
        symbols: &SymbolTable,
        today: NaiveDate,
    ) -> Result<Self, FxError> {
        Ok(Self {
            amount: parse_amount(amount)?,
            input_code: parse_currency_code(input_currency)?,
            output_target: OutputTarget::classify(output_currency, symbols),
            date: date.map(|raw| parse_rate_date(raw, today)).transpose()?,
        })
    }

    pub fn query(&self) -> RateQuery {
        RateQuery::from(self.date)
    }
}

fn is_currency_code(raw: &str) -> bool {
    raw.len() == CURRENCY_CODE_LEN && raw.chars().all(|c| c.is_ascii_alphabetic())
}

/// Parses a strictly positive amount ("200", "12.5", "1e3").
pub fn parse_amount(raw: &str) -> Result<Decimal, FxError> {
    let trimmed = raw.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| FxError::InvalidArgument(format!("Amount '{}' is not a number", raw)))?;

    if amount <= Decimal::ZERO {
        return Err(FxError::InvalidArgument(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }
    Ok(amount)
}

/// Parses a three-letter currency code, case-insensitively.
pub fn parse_currency_code(raw: &str) -> Result<String, FxError> {
    let trimmed = raw.trim();
    if !is_currency_code(trimmed) {
        return Err(FxError::InvalidArgument(format!(
            "Input currency must be a 3-letter code such as EUR, got '{}'",
            raw
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Parses a DD/MM/YYYY date between 01/01/2000 and `today`.
pub fn parse_rate_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FxError> {
    let date = NaiveDate::parse_from_str(raw.trim(), USER_DATE_FORMAT).map_err(|_| {
        FxError::InvalidArgument(format!(
            "Date '{}' is not a valid date in DD/MM/YYYY format",
            raw
        ))
    })?;

    if date < MIN_RATE_DATE {
        return Err(FxError::InvalidArgument(format!(
            "Date {} is before {}",
            date.format(USER_DATE_FORMAT),
            MIN_RATE_DATE.format(USER_DATE_FORMAT)
        )));
    }
    if date > today {
        return Err(FxError::InvalidArgument(format!(
            "Date {} is in the future",
            date.format(USER_DATE_FORMAT)
        )));
    }
    Ok(date)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConversionInput {
    pub amount: Decimal,
    pub currency: String,
}

/// Outcome of a conversion, as written to the result file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub input: ConversionInput,
    /// Date of the rate table used
    pub date: NaiveDate,
    /// Base currency of the rate table used
    pub base: String,
    pub output: BTreeMap<String, Decimal>,
    /// Codes the rate table had no rate for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}
