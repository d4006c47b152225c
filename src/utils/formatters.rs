use crate::models::{InvestmentInput, InvestmentResult};

pub const RULE_WIDTH: usize = 80;

/// Horizontal rule used between report sections.
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Format a dollar amount with two decimals, e.g. `$1500.00`.
pub fn format_dollars(value: f64) -> String {
    format!("${:.2}", value)
}

/// Opening banner shown before the prompts.
pub fn format_banner(model_name: &str) -> String {
    [
        rule(),
        "INVESTMENT TIME MACHINE".to_string(),
        rule(),
        "This program calculates how much money you would have today if you had invested in a company in the past.".to_string(),
        format!("It uses the {} AI model to provide an analysis of your investment.", model_name),
        rule(),
    ]
    .join("\n")
}

/// The numeric results block.
pub fn format_results_block(input: &InvestmentInput, result: &InvestmentResult) -> String {
    let profit_loss = result.profit_loss();
    let profit_line = if result.is_profit() {
        format!("Total profit: {}", format_dollars(profit_loss))
    } else {
        format!("Total loss: {}", format_dollars(-profit_loss))
    };

    [
        rule(),
        format!(
            "INVESTMENT RESULTS FOR {} ({})",
            input.company.to_uppercase(),
            input.ticker
        ),
        rule(),
        format!(
            "Initial investment in {}: {}",
            input.year,
            format_dollars(result.initial_investment)
        ),
        format!("Initial stock price: {}", format_dollars(result.initial_price)),
        format!("Current stock price: {}", format_dollars(result.current_price)),
        format!("Price change: {:.2}%", result.percent_change),
        format!(
            "Current value of your investment: {}",
            format_dollars(result.current_value)
        ),
        profit_line,
    ]
    .join("\n")
}

pub fn format_analysis_block(analysis: &str) -> String {
    [rule(), "AI ANALYSIS".to_string(), rule(), analysis.to_string()].join("\n")
}
