//! Read-only queries, answered through instruction return data.
//!
//! A stake cell that was never created reads as zero.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{TokenAccount, TokenInterface};

use crate::state::{Market, MarketView, StakePosition};

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])]
pub struct GetMarket<'info> {
    #[account(
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,
}

impl<'info> GetMarket<'info> {
    pub fn get_market(&self) -> Result<MarketView> {
        let clock = Clock::get()?;
        Ok(self.market.view(clock.unix_timestamp))
    }
}

#[derive(Accounts)]
#[instruction(market_id: [u8; 32], outcome: u8, account: Pubkey)]
pub struct GetStake<'info> {
    #[account(
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        seeds = [StakePosition::SEED, market_id.as_ref(), outcome.to_le_bytes().as_ref(), account.as_ref()],
        bump = position.bump,
    )]
    pub position: Option<Account<'info, StakePosition>>,
}

/// Amount held in a cell; zero when the cell was never created
pub fn stake_amount(position: Option<&StakePosition>) -> u64 {
    position.map_or(0, |position| position.amount)
}

/// Reward preview or settled reward for a cell, see [`Market::reward_for`]
pub fn reward_preview(market: &Market, position: Option<&StakePosition>, outcome: u8) -> Result<u64> {
    match position {
        Some(position) => market.reward_for(position, outcome),
        None => Ok(0),
    }
}

impl<'info> GetStake<'info> {
    pub fn get_stake(&self) -> Result<u64> {
        Ok(stake_amount(self.position.as_deref()))
    }

    pub fn calculate_reward(&self, outcome: u8) -> Result<u64> {
        reward_preview(&self.market, self.position.as_deref(), outcome)
    }
}

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])]
pub struct TokenBalance<'info> {
    #[account(
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        associated_token::mint = market.collateral_mint,
        associated_token::authority = market,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> TokenBalance<'info> {
    pub fn token_balance(&self) -> Result<u64> {
        Ok(self.vault.amount)
    }
}
