//! Global Program Configuration
//!
//! Deployment-time settings shared by every market. Market state itself never
//! lives here.

use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::error::MarketError;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Account that initialized the program
    pub admin: Pubkey,

    /// Collateral every market is staked in (e.g. USDC)
    pub collateral_mint: Pubkey,

    /// Authority allowed to notify deposits made through the
    /// transfer-and-notify path. Only this signer's `from` is trusted.
    pub value_collaborator: Pubkey,

    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const SEED: &'static [u8] = CONFIG_SEED;

    /// Gate for transfer-and-notify deposits: the notification must come
    /// from the configured collaborator and name a real depositor.
    pub fn check_notifier(&self, caller: Pubkey, from: Pubkey) -> Result<()> {
        require_keys_eq!(caller, self.value_collaborator, MarketError::InvalidSender);
        require!(from != Pubkey::default(), MarketError::InvalidSender);
        Ok(())
    }
}
