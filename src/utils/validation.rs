use crate::error::InputError;

use super::date::MIN_INVESTMENT_YEAR;

/// Accepts an integer year with `1970 <= year < current_year`.
pub fn validate_year(input: &str, current_year: i32) -> Result<i32, InputError> {
    let year: i32 = input.trim().parse().map_err(|_| InputError::InvalidYear)?;

    if (MIN_INVESTMENT_YEAR..current_year).contains(&year) {
        Ok(year)
    } else {
        Err(InputError::YearOutOfRange {
            min: MIN_INVESTMENT_YEAR,
            max: current_year - 1,
        })
    }
}

/// Accepts a strictly positive, finite amount.
pub fn validate_amount(input: &str) -> Result<f64, InputError> {
    let amount: f64 = input.trim().parse().map_err(|_| InputError::InvalidAmount)?;

    if !amount.is_finite() {
        return Err(InputError::InvalidAmount);
    }
    if amount > 0.0 {
        Ok(amount)
    } else {
        Err(InputError::NonPositiveAmount)
    }
}

/// Accepts a non-empty ticker, trimmed and upper-cased.
pub fn validate_ticker(input: &str) -> Result<String, InputError> {
    let ticker = input.trim();
    if ticker.is_empty() {
        Err(InputError::EmptyTicker)
    } else {
        Ok(ticker.to_uppercase())
    }
}
