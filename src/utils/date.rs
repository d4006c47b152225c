use chrono::{Datelike, Local, NaiveDate};

/// Earliest investment year the prompts accept.
pub const MIN_INVESTMENT_YEAR: i32 = 1970;

/// Current calendar year on the local clock.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Unix timestamp of midnight UTC at the start of `date`.
pub fn date_to_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}
