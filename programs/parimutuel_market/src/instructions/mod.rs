//! Instruction handlers for the parimutuel market program
//!
//! - `initialize` - Record collateral mint and value collaborator (once)
//! - `market` - Create markets and drive their lifecycle
//! - `stake` - Add stake (direct or notified) and exit early
//! - `settle` - Withdraw rewards, refund, collect fees
//! - `views` - Read-only queries

pub mod initialize;
pub mod market;
pub mod settle;
pub mod stake;
pub mod vault;
pub mod views;

pub use initialize::*;
pub use market::*;
pub use settle::*;
pub use stake::*;
pub use views::*;
