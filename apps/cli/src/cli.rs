use clap::Parser;

/// Convert an amount between currencies using dated exchange rates.
///
/// Rates are taken from the local archive when available and fetched from
/// Open Exchange Rates otherwise.
#[derive(Parser, Debug, Clone)]
#[command(name = "fxconv")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Amount to convert, greater than zero
    #[arg(short = 'a', long, allow_hyphen_values = true)]
    pub amount: String,

    /// Three-letter code of the input currency (e.g. EUR)
    #[arg(short = 'i', long = "input_currency", visible_alias = "input-currency")]
    pub input_currency: String,

    /// Output currency code or symbol (e.g. CZK or $); all currencies when omitted
    #[arg(short = 'o', long = "output_currency", visible_alias = "output-currency")]
    pub output_currency: Option<String>,

    /// Rate date as DD/MM/YYYY; latest rates when omitted
    #[arg(short = 'd', long)]
    pub date: Option<String>,
}
