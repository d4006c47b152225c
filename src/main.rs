use std::path::PathBuf;

use clap::Parser;
use investment_time_machine::{
    config::AppConfig,
    console::StdConsole,
    error::ConsoleError,
    services::{HuggingFaceClient, YahooClient},
    state_machine::InvestmentSession,
    utils::{current_year, init_logger, today},
};

#[derive(Parser)]
#[command(name = "investment-time-machine")]
#[command(about = "See what a past stock investment would be worth today, with an AI-written analysis")]
pub struct Cli {
    /// YAML config file (overrides CONFIG_FILE)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (app_config, ignored) = AppConfig::load(cli.config.as_deref())?;
    let log_level = cli.log_level.as_deref().unwrap_or(&app_config.log_level);
    init_logger(log_level)?;

    if let Some(reason) = ignored {
        tracing::warn!("Ignoring generation settings from environment: {}", reason);
    }

    tracing::info!(
        price_source = %app_config.price_source.base_url,
        model = %app_config.model.endpoint,
        "Loaded configuration"
    );

    let prices = YahooClient::new(&app_config.price_source, app_config.request_timeout)?;
    let model = HuggingFaceClient::new(&app_config.model, app_config.request_timeout)?;

    let stdin = std::io::stdin();
    let mut console = StdConsole::new(stdin.lock(), std::io::stdout());

    let session = InvestmentSession::new(
        &prices,
        &model,
        app_config.model.name.clone(),
        current_year(),
        today(),
    );

    match session.run(&mut console).await {
        Ok(report) => {
            tracing::info!(final_state = %report.final_state, "Session complete");
            Ok(())
        }
        Err(ConsoleError::InputClosed) => {
            println!("\nInput closed. Exiting.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
