pub mod generator;
pub mod templates;
pub mod types;

pub use generator::*;
pub use templates::*;
pub use types::*;
