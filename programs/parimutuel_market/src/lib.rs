//! # Parimutuel Market
//!
//! Oracle-resolved parimutuel prediction markets on Solana.
//!
//! ## Overview
//!
//! A creator opens a market with N mutually exclusive outcomes. Participants
//! stake collateral on one outcome; once staking closes the market's oracle
//! reports the winner. All losing stake is pooled and shared among winners
//! in proportion to their slice of the winning pool.
//!
//! ## How it works
//! - Stakes can be withdrawn early while the market is open, minus a 10% fee.
//! - After resolution any staker may dispute within 24 hours; the oracle then
//!   closes the market with a final outcome or cancels it.
//! - Cancelled markets refund stakes minus the same fee.
//! - Fees go to the creator once the market is terminal.
//!

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod payout;
pub mod state;


pub use instructions::*;
pub use payout::*;
pub use state::{MarketPhase, MarketView};

declare_id!("ErKr2Czst39rSJguakYfgHZ6B4FAixvnJL6bPNq8BvMC");

/// Main parimutuel market program
#[program]
pub mod parimutuel_market {
    use super::*;

    /// Initialize the program with its collateral mint and value collaborator
    pub fn initialize(ctx: Context<Initialize>, value_collaborator: Pubkey) -> Result<()> {
        ctx.accounts.initialize(value_collaborator, &ctx.bumps)
    }

    /// Open a new market
    pub fn create_market(
        ctx: Context<CreateMarket>,
        id: [u8; 32],
        oracle: Pubkey,
        closing_time: i64,
        num_outcomes: u8,
    ) -> Result<()> {
        ctx.accounts
            .create_market(id, oracle, closing_time, num_outcomes, &ctx.bumps)
    }

    /// Stake collateral on an outcome
    pub fn add_stake(
        ctx: Context<AddStake>,
        _market_id: [u8; 32],
        outcome: u8,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts.add_stake(outcome, amount, &ctx.bumps)
    }

    /// Deposit notification from the value collaborator
    pub fn on_token_transfer(
        ctx: Context<OnTokenTransfer>,
        from: Pubkey,
        amount: u64,
        ticket: StakeTicket,
    ) -> Result<()> {
        ctx.accounts.on_token_transfer(from, amount, ticket, &ctx.bumps)
    }

    /// Withdraw stake before closing, minus the fee
    pub fn remove_stake(
        ctx: Context<RemoveStake>,
        _market_id: [u8; 32],
        outcome: u8,
        amount: u64,
    ) -> Result<u64> {
        ctx.accounts.remove_stake(outcome, amount)
    }

    /// Report the winning outcome (oracle only)
    pub fn resolve_market(
        ctx: Context<ResolveMarket>,
        _market_id: [u8; 32],
        outcome: u8,
    ) -> Result<()> {
        ctx.accounts.resolve_market(outcome)
    }

    /// Contest a resolution inside the dispute window (stakers only)
    pub fn dispute_market(
        ctx: Context<DisputeMarket>,
        _market_id: [u8; 32],
        outcome: u8,
    ) -> Result<()> {
        ctx.accounts.dispute_market(outcome)
    }

    /// Settle a dispute with the final outcome (oracle only)
    pub fn close_market(
        ctx: Context<CloseMarket>,
        _market_id: [u8; 32],
        final_outcome: u8,
    ) -> Result<()> {
        ctx.accounts.close_market(final_outcome)
    }

    /// Void the market
    pub fn cancel_market(ctx: Context<CancelMarket>, _market_id: [u8; 32]) -> Result<()> {
        ctx.accounts.cancel_market()
    }

    /// Claim principal plus reward on the winning outcome
    pub fn withdraw_reward(
        ctx: Context<ClaimStake>,
        _market_id: [u8; 32],
        outcome: u8,
    ) -> Result<u64> {
        ctx.accounts.withdraw_reward(outcome)
    }

    /// Reclaim stake from a cancelled market
    pub fn refund(ctx: Context<ClaimStake>, _market_id: [u8; 32], outcome: u8) -> Result<u64> {
        ctx.accounts.refund(outcome)
    }

    /// Sweep captured fees to the creator
    pub fn collect_fees(ctx: Context<CollectFees>, _market_id: [u8; 32]) -> Result<u64> {
        ctx.accounts.collect_fees()
    }

    pub fn get_market(ctx: Context<GetMarket>, _market_id: [u8; 32]) -> Result<MarketView> {
        ctx.accounts.get_market()
    }

    pub fn get_stake(
        ctx: Context<GetStake>,
        _market_id: [u8; 32],
        _outcome: u8,
        _account: Pubkey,
    ) -> Result<u64> {
        ctx.accounts.get_stake()
    }

    /// Net gain (excluding principal) an account would receive
    pub fn calculate_reward(
        ctx: Context<GetStake>,
        _market_id: [u8; 32],
        outcome: u8,
        _account: Pubkey,
    ) -> Result<u64> {
        ctx.accounts.calculate_reward(outcome)
    }

    /// Collateral currently held in a market's vault
    pub fn token_balance(ctx: Context<TokenBalance>, _market_id: [u8; 32]) -> Result<u64> {
        ctx.accounts.token_balance()
    }
}
