use crate::error::GenerationError;
use crate::services::TextGenerator;
use crate::utils::{Logger, Timer};

use super::templates::build_investment_prompt;
use super::types::AnalysisRequest;

/// Builds the analysis prompt and asks the model to narrate it.
pub struct AnalysisGenerator<'a> {
    generator: &'a dyn TextGenerator,
    current_year: i32,
    logger: Logger,
}

impl<'a> AnalysisGenerator<'a> {
    pub fn new(generator: &'a dyn TextGenerator, current_year: i32) -> Self {
        Self {
            generator,
            current_year,
            logger: Logger::new("ANALYSIS"),
        }
    }

    pub async fn generate_investment_analysis(
        &self,
        request: &AnalysisRequest,
    ) -> Result<String, GenerationError> {
        let prompt = build_investment_prompt(request, self.current_year);
        self.logger.debug(&format!("Prompt:\n{}", prompt));

        let timer = Timer::start(&format!("Analysis for {}", request.ticker));
        let generated = self.generator.generate(prompt.as_str()).await?;
        timer.log_elapsed();

        let analysis = strip_prompt_echo(&generated, prompt.as_str());
        if analysis.is_empty() {
            self.logger.warn("Model output was empty after removing the prompt echo");
        }
        self.logger.info_with_data("Generated analysis", analysis.len());
        Ok(analysis)
    }
}

/// Remove an echoed prompt from the front of the model output and trim.
pub fn strip_prompt_echo(generated: &str, prompt: &str) -> String {
    let trimmed = generated.trim_start();
    trimmed
        .strip_prefix(prompt.trim())
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
