//! Stake Ledger Cells
//!
//! One account per (market, outcome, owner). Cells are created on the first
//! stake and never closed; an amount of zero means "no stake".

use anchor_lang::prelude::*;

use crate::constants::STAKE_SEED;

/// Stake an account holds on one outcome of one market
///
/// Seeds: ["stake", market_id, [outcome], owner]
#[account]
#[derive(InitSpace, Default)]
pub struct StakePosition {
    /// Market the stake belongs to
    pub market_id: [u8; 32],

    /// Outcome index the stake backs
    pub outcome: u8,

    /// Owning account; the only principal whose actions move this cell
    pub owner: Pubkey,

    /// Amount currently staked
    pub amount: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl StakePosition {
    pub const SEED: &'static [u8] = STAKE_SEED;

    /// Whether this cell was freshly allocated by `init_if_needed`
    pub fn is_unbound(&self) -> bool {
        self.owner == Pubkey::default()
    }

    /// Stamp a fresh cell with its coordinates
    pub fn bind(&mut self, market_id: [u8; 32], outcome: u8, owner: Pubkey, bump: u8) {
        self.market_id = market_id;
        self.outcome = outcome;
        self.owner = owner;
        self.amount = 0;
        self.bump = bump;
    }
}
