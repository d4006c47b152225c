pub mod investment;
pub mod price;
pub mod session;

pub use investment::*;
pub use price::*;
pub use session::*;
