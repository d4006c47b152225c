use serde::{Deserialize, Serialize};

use super::price::PriceSummary;

/// Validated operator answers for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub company: String,
    pub ticker: String,
    pub year: i32,
    pub initial_investment: f64,
}

impl InvestmentInput {
    /// First day of the investment year, `YYYY-01-01`.
    pub fn start_date(&self) -> String {
        format!("{}-01-01", self.year)
    }
}

/// Outcome of holding `initial_investment` from the first to the last close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub initial_price: f64,
    pub current_price: f64,
    pub percent_change: f64,
    pub initial_investment: f64,
    pub current_value: f64,
}

impl InvestmentResult {
    pub fn new(summary: PriceSummary, initial_investment: f64) -> Self {
        Self {
            initial_price: summary.initial_price,
            current_price: summary.current_price,
            percent_change: summary.percent_change,
            initial_investment,
            current_value: calculate_investment_return(initial_investment, summary.percent_change),
        }
    }

    /// Positive for a profit, negative for a loss.
    pub fn profit_loss(&self) -> f64 {
        self.current_value - self.initial_investment
    }

    pub fn is_profit(&self) -> bool {
        self.profit_loss() >= 0.0
    }
}

/// Scale an investment by a percent change. No rounding is applied.
pub fn calculate_investment_return(initial_investment: f64, percent_change: f64) -> f64 {
    initial_investment * (1.0 + (percent_change / 100.0))
}
