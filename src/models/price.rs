use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closing prices for one ticker, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting the points so dates are non-decreasing.
    pub fn new(ticker: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            ticker: ticker.into(),
            points,
        }
    }

    pub fn empty(ticker: impl Into<String>) -> Self {
        Self::new(ticker, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// First and last close of a series and the percent change between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub initial_price: f64,
    pub current_price: f64,
    pub percent_change: f64,
}

impl PriceSummary {
    /// Summarize a series. Returns `None` for an empty series or when the
    /// first close cannot anchor a percent change (zero or not finite).
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let initial_price = series.first()?.close;
        let current_price = series.last()?.close;

        if initial_price == 0.0 || !initial_price.is_finite() || !current_price.is_finite() {
            return None;
        }

        Some(Self {
            initial_price,
            current_price,
            percent_change: calculate_percent_change(initial_price, current_price),
        })
    }
}

/// `(current - initial) / initial * 100`
pub fn calculate_percent_change(initial_price: f64, current_price: f64) -> f64 {
    ((current_price - initial_price) / initial_price) * 100.0
}
