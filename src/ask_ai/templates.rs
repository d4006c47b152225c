use super::types::{AnalysisPrompt, AnalysisRequest};

const ANALYSIS_INSTRUCTION: &str = "Provide a brief analysis of this investment, including whether it was a good decision, how it compares to market averages, and what factors might have influenced the company's performance during this period.";

/// Fill the fixed investment-analysis template.
pub fn build_investment_prompt(request: &AnalysisRequest, current_year: i32) -> AnalysisPrompt {
    let lines = [
        "Analyze this investment:".to_string(),
        format!("- Company: {} ({})", request.company, request.ticker),
        format!(
            "- Investment year: {} ({} years ago)",
            request.year,
            request.years_held(current_year)
        ),
        format!("- Initial investment: ${:.2}", request.initial_investment),
        format!("- Current value: ${:.2}", request.current_value),
        format!(
            "- Total profit/loss: ${:.2} ({:.2}%)",
            request.profit_loss(),
            request.percent_change
        ),
        String::new(),
        ANALYSIS_INSTRUCTION.to_string(),
    ];

    AnalysisPrompt::new(lines.join("\n"))
}
