//! One conversion run: validate, resolve rates, convert, write, report.

use chrono::{NaiveDate, Utc};
use fxconv_core::conversion::{ConversionRequest, ConversionResult, ResultWriterTrait};
use fxconv_core::fx::FxServiceTrait;

use crate::cli::Args;
use crate::error::CliResult;
use crate::main_lib::AppContext;

/// Runs a conversion against today's UTC date.
pub async fn run(args: &Args, context: &AppContext) -> CliResult<ConversionResult> {
    run_at(args, context, Utc::now().date_naive()).await
}

pub async fn run_at(
    args: &Args,
    context: &AppContext,
    today: NaiveDate,
) -> CliResult<ConversionResult> {
    let request = ConversionRequest::parse(
        &args.amount,
        &args.input_currency,
        args.output_currency.as_deref(),
        args.date.as_deref(),
        &context.symbols,
        today,
    )?;
    tracing::info!(
        "Converting {} {} to {:?} ({})",
        request.amount,
        request.input_code,
        request.output_target,
        request.query()
    );

    let result = context.fx_service.convert(&request).await?;
    if !result.skipped.is_empty() {
        tracing::warn!("No rates on {} for {}", result.date, result.skipped.join(", "));
    }

    context.result_writer.write(&result)?;
    tracing::info!("Result written to {}", context.result_writer.location());

    Ok(result)
}

/// Lines printed on stdout, one per output currency.
pub fn render(result: &ConversionResult) -> Vec<String> {
    result
        .output
        .iter()
        .map(|(code, amount)| format!("{:.2} {}", amount, code))
        .collect()
}
