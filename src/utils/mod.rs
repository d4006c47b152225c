pub mod date;
pub mod formatters;
pub mod logger;
pub mod validation;

pub use date::*;
pub use formatters::*;
pub use logger::*;
pub use validation::*;
