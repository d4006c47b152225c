pub mod price_lookup;
pub mod text_generation;
pub mod yahoo_service;

pub use price_lookup::*;
pub use text_generation::*;
pub use yahoo_service::*;
