use chrono::NaiveDate;

/// Decimal precision for converted amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Earliest date rates can be requested for
pub const MIN_RATE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(date) => date,
    None => panic!("invalid minimum rate date"),
};

/// Input format for user supplied dates
pub const USER_DATE_FORMAT: &str = "%d/%m/%Y";

/// Length of an ISO 4217 currency code
pub const CURRENCY_CODE_LEN: usize = 3;
