use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::fx::fx_errors::FxError;
use crate::fx::fx_model::RateTable;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// What to do when an output currency is missing from the rate table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingCodePolicy {
    /// Abort the whole conversion with `UnknownCurrency`.
    Fail,
    /// Leave the code out and report it in [`Conversion::skipped`].
    Skip,
}

/// Amounts produced by one conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    /// Output code -> converted amount, rounded for display
    pub amounts: BTreeMap<String, Decimal>,
    /// Requested codes the table had no rate for
    pub skipped: Vec<String>,
}

/// Rounds an amount to display precision, halves away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Converts amounts between currencies of a single rate table.
///
/// Rates are quoted against one base currency, so a cross rate is
/// `rate[to] / rate[from]` and no path search is needed.
pub struct CurrencyConverter<'a> {
    table: &'a RateTable,
}

impl<'a> CurrencyConverter<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    fn rate_of(&self, code: &str) -> Result<Decimal, FxError> {
        let rate = self
            .table
            .rate(code)
            .ok_or_else(|| FxError::UnknownCurrency(code.to_string()))?;
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!(
                "{} has non-positive rate {} on {}",
                code, rate, self.table.date
            )));
        }
        Ok(rate)
    }

    /// Unrounded amount in `to` for `amount` in `from`.
    fn convert_exact(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, FxError> {
        let from_rate = self.rate_of(from)?;
        let to_rate = self.rate_of(to)?;

        amount
            .checked_mul(to_rate)
            .and_then(|scaled| scaled.checked_div(from_rate))
            .ok_or_else(|| {
                FxError::InvalidArgument(format!(
                    "Amount {} is too large to convert from {} to {}",
                    amount, from, to
                ))
            })
    }

    /// Converts a single amount, rounded to display precision.
    pub fn convert_amount(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, FxError> {
        self.convert_exact(amount, from, to).map(round_amount)
    }

    /// Converts `amount` from `input_code` into every code of `output_codes`.
    ///
    /// A missing input code always fails. Missing output codes follow
    /// `policy`; with [`MissingCodePolicy::Skip`] the conversion still fails
    /// when no output code could be converted at all.
    pub fn convert(
        &self,
        amount: Decimal,
        input_code: &str,
        output_codes: &[String],
        policy: MissingCodePolicy,
    ) -> Result<Conversion, FxError> {
        self.rate_of(input_code)?;

        let mut conversion = Conversion::default();
        for code in output_codes {
            if !self.table.contains(code) {
                match policy {
                    MissingCodePolicy::Fail => {
                        return Err(FxError::UnknownCurrency(code.clone()));
                    }
                    MissingCodePolicy::Skip => {
                        log::warn!(
                            "Currency {} has no rate on {}, skipping",
                            code,
                            self.table.date
                        );
                        conversion.skipped.push(code.clone());
                        continue;
                    }
                }
            }

            let converted = self.convert_amount(amount, input_code, code)?;
            conversion.amounts.insert(code.clone(), converted);
        }

        if conversion.amounts.is_empty() {
            return Err(FxError::UnknownCurrency(output_codes.join(", ")));
        }

        Ok(conversion)
    }
}
