//! Settlement
//!
//! Pull-based payouts once a market is terminal:
//!
//! - `withdraw_reward`: winners take back principal plus their share of the
//!   losing pool
//! - `refund`: stakers of a cancelled market take back their stake minus
//!   the early-exit fee
//! - `collect_fees`: the creator sweeps the fees captured along the way
//!
//! Each step settles the ledger first and hands the vault release the
//! final market state last.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::instructions::vault::VaultRelease;
use crate::state::{Market, StakePosition};

#[event]
#[derive(Debug)]
pub struct RewardWithdrawn {
    pub market_id: [u8; 32],
    pub winner: Pubkey,
    pub outcome: u8,
    pub principal: u64,
    pub reward: u64,
    pub payout: u64,
}

#[event]
#[derive(Debug)]
pub struct StakeRefunded {
    pub market_id: [u8; 32],
    pub staker: Pubkey,
    pub outcome: u8,
    pub refunded: u64,
    pub fee: u64,
}

#[event]
#[derive(Debug)]
pub struct FeesCollected {
    pub market_id: [u8; 32],
    pub creator: Pubkey,
    pub amount: u64,
}

// =============================================================================
// LEDGER STEPS
// =============================================================================

/// Settle a winning cell, then pay principal plus reward with `release`
pub fn apply_withdraw_reward(
    market: &mut Market,
    position: &mut StakePosition,
    winner: Pubkey,
    outcome: u8,
    now: i64,
    release: impl FnOnce(&Market, u64) -> Result<()>,
) -> Result<RewardWithdrawn> {
    let principal = position.amount;
    let payout = market.settle_reward(position, winner, outcome, now)?;
    release(market, payout)?;

    Ok(RewardWithdrawn {
        market_id: market.id,
        winner,
        outcome,
        principal,
        reward: payout - principal,
        payout,
    })
}

/// Empty a cancelled market's cell, then pay the net refund with `release`
pub fn apply_refund(
    market: &mut Market,
    position: &mut StakePosition,
    staker: Pubkey,
    outcome: u8,
    release: impl FnOnce(&Market, u64) -> Result<()>,
) -> Result<StakeRefunded> {
    let split = market.settle_refund(position, staker, outcome)?;
    release(market, split.net)?;

    Ok(StakeRefunded {
        market_id: market.id,
        staker,
        outcome,
        refunded: split.net,
        fee: split.fee,
    })
}

/// Zero the captured fees, then send them to the creator with `release`
pub fn apply_collect_fees(
    market: &mut Market,
    creator: Pubkey,
    now: i64,
    release: impl FnOnce(&Market, u64) -> Result<()>,
) -> Result<FeesCollected> {
    let fees = market.take_fees(creator, now)?;
    release(market, fees)?;

    Ok(FeesCollected {
        market_id: market.id,
        creator,
        amount: fees,
    })
}

/// Accounts shared by withdraw and refund: a stake cell and its owner's
/// collateral account
#[derive(Accounts)]
#[instruction(market_id: [u8; 32], outcome: u8)]
pub struct ClaimStake<'info> {
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [StakePosition::SEED, market_id.as_ref(), outcome.to_le_bytes().as_ref(), staker.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, StakePosition>>,

    #[account(address = market.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = staker,
        associated_token::mint = collateral_mint,
        associated_token::authority = staker,
        associated_token::token_program = token_program,
    )]
    pub staker_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> ClaimStake<'info> {
    fn release(&self) -> VaultRelease<'info> {
        VaultRelease::new(
            &self.token_program,
            &self.market,
            &self.vault,
            &self.collateral_mint,
            &self.staker_collateral,
        )
    }

    /// Pay out a winning stake: principal plus reward
    pub fn withdraw_reward(&mut self, outcome: u8) -> Result<u64> {
        let clock = Clock::get()?;
        let release = self.release();

        let event = apply_withdraw_reward(
            &mut self.market,
            &mut self.position,
            self.staker.key(),
            outcome,
            clock.unix_timestamp,
            |market, payout| release.send(market, payout),
        )?;
        let payout = event.payout;

        emit!(event);

        Ok(payout)
    }

    /// Return the stake of a cancelled market, net of the fee
    pub fn refund(&mut self, outcome: u8) -> Result<u64> {
        let release = self.release();

        let event = apply_refund(
            &mut self.market,
            &mut self.position,
            self.staker.key(),
            outcome,
            |market, net| release.send(market, net),
        )?;
        let refunded = event.refunded;

        emit!(event);

        Ok(refunded)
    }
}

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])]
pub struct CollectFees<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(address = market.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = creator,
        associated_token::token_program = token_program,
    )]
    pub creator_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CollectFees<'info> {
    pub fn collect_fees(&mut self) -> Result<u64> {
        let clock = Clock::get()?;
        let release = VaultRelease::new(
            &self.token_program,
            &self.market,
            &self.vault,
            &self.collateral_mint,
            &self.creator_collateral,
        );

        let event = apply_collect_fees(
            &mut self.market,
            self.creator.key(),
            clock.unix_timestamp,
            |market, fees| release.send(market, fees),
        )?;
        let fees = event.amount;

        emit!(event);

        Ok(fees)
    }
}

// ============================================================================
// TESTS
// ============================================================================
