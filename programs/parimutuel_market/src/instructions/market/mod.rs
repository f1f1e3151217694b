pub mod create_market;
pub mod lifecycle;

pub use create_market::*;
pub use lifecycle::*;
