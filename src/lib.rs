//! # Investment Time Machine
//!
//! Interactive "what if I had invested" calculator:
//! - Daily close history from a Yahoo-style chart endpoint
//! - Percent change and current value of a historical investment
//! - A short narrative analysis from a hosted text-generation model
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use investment_time_machine::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let (config, _) = AppConfig::from_env();
//!     let prices = YahooClient::new(&config.price_source, config.request_timeout)?;
//!     let model = HuggingFaceClient::new(&config.model, config.request_timeout)?;
//!
//!     let stdin = std::io::stdin();
//!     let mut console = StdConsole::new(stdin.lock(), std::io::stdout());
//!     let session = InvestmentSession::new(&prices, &model, config.model.name.clone(), current_year(), today());
//!     let report = session.run(&mut console).await?;
//!     println!("Finished in {}", report.final_state);
//!     Ok(())
//! }
//! ```

pub mod ask_ai;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod services;
pub mod state_machine;
pub mod utils;

#[cfg(test)]
mod testing;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use investment_time_machine::prelude::*;
    //! ```

    pub use crate::config::AppConfig;
    pub use crate::console::{Console, StdConsole};
    pub use crate::error::{ConsoleError, GenerationError, ProviderError};
    pub use crate::models::{InvestmentInput, InvestmentResult, PriceSeries, PriceSummary};
    pub use crate::services::{get_stock_data, HuggingFaceClient, PriceSource, TextGenerator, YahooClient};
    pub use crate::state_machine::{InvestmentSession, SessionReport, StateName};
    pub use crate::utils::{current_year, today};
}

pub use utils::{init_logger, Logger, Timer};
