//! Conversion requests, results and where results are written.

mod conversion_model;
mod result_writer;

pub use conversion_model::{
    parse_amount, parse_currency_code, parse_rate_date, ConversionInput, ConversionRequest,
    ConversionResult, OutputCodes, OutputTarget,
};
pub use result_writer::{JsonResultWriter, ResultWriterTrait};
