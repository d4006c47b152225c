use serde::{Deserialize, Serialize};

use crate::models::{InvestmentInput, InvestmentResult};

/// Figures handed to the analysis step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub company: String,
    pub ticker: String,
    pub year: i32,
    pub initial_investment: f64,
    pub current_value: f64,
    pub percent_change: f64,
}

impl AnalysisRequest {
    pub fn new(input: &InvestmentInput, result: &InvestmentResult) -> Self {
        Self {
            company: input.company.clone(),
            ticker: input.ticker.clone(),
            year: input.year,
            initial_investment: result.initial_investment,
            current_value: result.current_value,
            percent_change: result.percent_change,
        }
    }

    pub fn years_held(&self, current_year: i32) -> i32 {
        current_year - self.year
    }

    pub fn profit_loss(&self) -> f64 {
        self.current_value - self.initial_investment
    }
}

/// Prompt text sent to the model once and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPrompt(String);

impl AnalysisPrompt {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnalysisPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
