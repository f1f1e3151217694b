//! # Payout Engine
//!
//! Pure integer arithmetic behind every value that leaves a market vault.
//! Nothing in here touches accounts; callers pass in the ledger figures and
//! decide what to persist.
//!
//! ```text
//!   ┌──────────────┬─────────────────────────────────────────┐
//!   │ early exit   │ net = amount − ⌊amount × 10%⌋            │
//!   │ refund       │ same fee policy as early exit            │
//!   │ winner       │ stake + ⌊stake × losing ÷ winning⌋       │
//!   └──────────────┴─────────────────────────────────────────┘
//! ```

pub mod parimutuel;

pub use parimutuel::*;
