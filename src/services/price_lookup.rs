use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ProviderError;
use crate::models::{PriceSeries, PriceSummary};
use crate::utils::{log_fetch, parse_date, Timer};

/// Market-data provider seam: daily closes for `[start, end)`.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// An unknown ticker or an empty range yields an empty series, not an error.
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError>;
}

/// Look up the first and last close from `start_date` (`YYYY-MM-DD`) up to `today`.
///
/// Returns `Ok(None)` when the provider has no usable data for the range, so
/// the caller can ask the operator for a different ticker or year.
pub async fn get_stock_data(
    source: &dyn PriceSource,
    ticker: &str,
    start_date: &str,
    today: NaiveDate,
) -> Result<Option<PriceSummary>, ProviderError> {
    let start = parse_date(start_date)
        .map_err(|e| ProviderError::InvalidDateRange(format!("{}: {}", start_date, e)))?;
    let ticker = ticker.trim().to_uppercase();

    let timer = Timer::start(&format!("Price lookup for {}", ticker));
    let series = source.fetch_daily_closes(&ticker, start, today).await?;
    timer.log_elapsed();

    let summary = PriceSummary::from_series(&series);
    match &summary {
        Some(s) => log_fetch(&format!(
            "{}: {} points, {:.4} -> {:.4} ({:.2}%)",
            ticker,
            series.len(),
            s.initial_price,
            s.current_price,
            s.percent_change
        )),
        None => log_fetch(&format!("{}: no usable data since {}", ticker, start)),
    }

    Ok(summary)
}
