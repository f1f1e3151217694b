//! Fixed protocol parameters.
//!
//! Fee rate and dispute window are not governable; changing them means
//! redeploying the program.

pub const CONFIG_SEED: &[u8] = b"config";
pub const MARKET_SEED: &[u8] = b"market";
pub const STAKE_SEED: &[u8] = b"stake";

/// Fee skimmed from stake leaving the pool early (removal or refund): 10%
pub const FEE_BPS: u64 = 1_000;
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Seconds after resolution during which stakers may dispute (24h)
pub const DISPUTE_WINDOW: i64 = 86_400;

pub const MIN_OUTCOMES: u8 = 2;
/// Bounds the per-outcome totals stored inline on the market account
pub const MAX_OUTCOMES: u8 = 32;
