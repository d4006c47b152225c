pub mod context;
pub mod states;

pub use context::*;
pub use states::*;

use chrono::NaiveDate;

use crate::{
    ask_ai::{AnalysisGenerator, AnalysisRequest},
    console::{prompt_amount, prompt_until_valid, prompt_year, Console},
    error::ConsoleError,
    models::{InvestmentInput, InvestmentResult, StateTransitionLog},
    services::{get_stock_data, PriceSource, TextGenerator},
    utils::{
        format_analysis_block, format_banner, format_results_block, log_state_transition, rule,
        validate_ticker, Logger,
    },
};

/// Drives one interactive run from the first prompt to a terminal state.
pub struct InvestmentSession<'a> {
    prices: &'a dyn PriceSource,
    generator: &'a dyn TextGenerator,
    model_name: String,
    current_year: i32,
    today: NaiveDate,
    current_state: StateName,
    context: StateContext,
    transition_history: Vec<StateTransitionLog>,
    logger: Logger,
}

impl<'a> InvestmentSession<'a> {
    pub fn new(
        prices: &'a dyn PriceSource,
        generator: &'a dyn TextGenerator,
        model_name: impl Into<String>,
        current_year: i32,
        today: NaiveDate,
    ) -> Self {
        Self {
            prices,
            generator,
            model_name: model_name.into(),
            current_year,
            today,
            current_state: StateName::CollectingInput,
            context: StateContext::default(),
            transition_history: Vec::new(),
            logger: Logger::new("SESSION"),
        }
    }

    /// Run to completion. Only console failures (such as closed stdin) are errors;
    /// provider and model failures end in a terminal state with a message.
    pub async fn run<C: Console + ?Sized>(mut self, console: &mut C) -> Result<SessionReport, ConsoleError> {
        console.print(&format_banner(&self.model_name))?;

        while !self.current_state.is_terminal() {
            let next = match self.current_state {
                StateName::CollectingInput => self.collect_input(console)?,
                StateName::LookupPending => self.lookup_prices(console).await?,
                StateName::ResultsComputed => self.show_results(console)?,
                StateName::AnalysisPending => self.generate_analysis(console).await?,
                terminal => terminal,
            };
            self.transition_to(next);
        }

        if self.current_state != StateName::NoDataTerminal {
            console.print(&format!("\n{}", rule()))?;
        }

        self.logger.info(&format!("Run finished in {}", self.current_state));
        Ok(SessionReport {
            final_state: self.current_state,
            input: self.context.input,
            result: self.context.result,
            analysis: self.context.analysis,
            transitions: self.transition_history,
        })
    }

    fn transition_to(&mut self, next: StateName) {
        if next == self.current_state {
            return;
        }
        debug_assert!(
            self.current_state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.current_state,
            next
        );

        let from = self.current_state.to_string();
        let to = next.to_string();
        let reason = format!("{} completed", from);
        log_state_transition(&from, &to, &reason);
        self.transition_history.push(StateTransitionLog::new(from, to, reason));
        self.current_state = next;
    }

    fn collect_input<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<StateName, ConsoleError> {
        let company = console.read_line("Enter the company name (e.g., Apple): ")?;
        let ticker = prompt_until_valid(
            console,
            "Enter the stock ticker symbol (e.g., AAPL): ",
            validate_ticker,
        )?;
        let year = prompt_year(console, self.current_year)?;
        let initial_investment = prompt_amount(console)?;

        let input = InvestmentInput {
            company: company.trim().to_string(),
            ticker,
            year,
            initial_investment,
        };
        self.logger.info_with_data("Collected input", &input);
        self.context.input = Some(input);

        Ok(StateName::LookupPending)
    }

    async fn lookup_prices<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<StateName, ConsoleError> {
        let Some(input) = self.context.input.as_ref() else {
            return Ok(StateName::NoDataTerminal);
        };

        console.print("\nFetching historical stock data...")?;
        let lookup = get_stock_data(self.prices, &input.ticker, &input.start_date(), self.today).await;

        let summary = match lookup {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                print_no_data(console, input)?;
                return Ok(StateName::NoDataTerminal);
            }
            Err(e) => {
                self.logger.warn_with_error("Price lookup failed", &e);
                console.print(&format!("Error fetching stock data: {}", e))?;
                print_no_data(console, input)?;
                return Ok(StateName::NoDataTerminal);
            }
        };

        self.context.result = Some(InvestmentResult::new(summary, input.initial_investment));
        Ok(StateName::ResultsComputed)
    }

    fn show_results<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<StateName, ConsoleError> {
        if let (Some(input), Some(result)) = (&self.context.input, &self.context.result) {
            console.print(&format!("\n{}", format_results_block(input, result)))?;
        }
        Ok(StateName::AnalysisPending)
    }

    async fn generate_analysis<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<StateName, ConsoleError> {
        let (Some(input), Some(result)) = (&self.context.input, &self.context.result) else {
            return Ok(StateName::AnalysisFailedShown);
        };
        let request = AnalysisRequest::new(input, result);

        console.print(&format!("\nGenerating investment analysis using {}...", self.model_name))?;
        console.print("(This may take a moment depending on your system)")?;

        let generator = AnalysisGenerator::new(self.generator, self.current_year);
        match generator.generate_investment_analysis(&request).await {
            Ok(analysis) => {
                console.print(&format!("\n{}", format_analysis_block(&analysis)))?;
                self.context.analysis = Some(analysis);
                Ok(StateName::AnalysisShown)
            }
            Err(e) => {
                self.logger.error_with_error("Analysis generation failed", &e);
                console.print(&format!("\nError generating analysis: {}", e))?;
                if e.is_model_unavailable() {
                    console.print("The model could not be loaded. It may be unavailable, still loading, or out of memory.")?;
                    console.print("Check the model endpoint configuration or try again later.")?;
                } else {
                    console.print("The model was reached but did not return a usable analysis.")?;
                    console.print("The investment figures above are unaffected.")?;
                }
                Ok(StateName::AnalysisFailedShown)
            }
        }
    }
}

fn print_no_data<C: Console + ?Sized>(console: &mut C, input: &InvestmentInput) -> Result<(), ConsoleError> {
    console.print(&format!(
        "Could not find historical data for {} starting from {}.",
        input.ticker, input.year
    ))?;
    console.print("Please check the ticker symbol and try a more recent year.")
}
