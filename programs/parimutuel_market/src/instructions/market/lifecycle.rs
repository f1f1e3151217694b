//! Market Lifecycle
//!
//! Oracle and creator driven transitions:
//!
//! 1. Closing time passes, oracle calls `resolve_market`
//! 2. Stakers have `DISPUTE_WINDOW` seconds to call `dispute_market`
//! 3. Undisputed markets count as closed once the window elapses
//! 4. Disputed markets are settled by the oracle with `close_market`,
//!    or voided with `cancel_market`
//!
//! The legality rules live on [`Market`]. Each `apply_*` step runs one
//! transition against plain account data and returns its event; the
//! handlers only supply the signer and the clock.

use anchor_lang::prelude::*;

use crate::error::MarketError;
use crate::state::{Market, StakePosition};

#[event]
pub struct MarketResolved {
    pub market_id: [u8; 32],
    pub outcome: u8,
    pub dispute_deadline: i64,
    pub timestamp: i64,
}

#[event]
#[derive(Debug)]
pub struct MarketDisputed {
    pub market_id: [u8; 32],
    pub disputer: Pubkey,
    pub outcome: u8,
    pub timestamp: i64,
}

#[event]
#[derive(Debug)]
pub struct MarketClosed {
    pub market_id: [u8; 32],
    pub final_outcome: u8,
    pub timestamp: i64,
}

#[event]
pub struct MarketCancelled {
    pub market_id: [u8; 32],
    pub cancelled_by: Pubkey,
    pub timestamp: i64,
}

// =============================================================================
// LEDGER STEPS
// =============================================================================

pub fn apply_resolve(market: &mut Market, oracle: Pubkey, outcome: u8, now: i64) -> Result<MarketResolved> {
    market.resolve(oracle, outcome, now)?;

    Ok(MarketResolved {
        market_id: market.id,
        outcome,
        dispute_deadline: market.dispute_deadline,
        timestamp: now,
    })
}

/// `position` is the disputer's cell on `outcome`, if one was ever created
pub fn apply_dispute(
    market: &mut Market,
    position: Option<&StakePosition>,
    disputer: Pubkey,
    outcome: u8,
    now: i64,
) -> Result<MarketDisputed> {
    let Some(position) = position else {
        return err!(MarketError::NoStakeForDispute);
    };
    market.dispute(position, disputer, now)?;

    Ok(MarketDisputed {
        market_id: market.id,
        disputer,
        outcome,
        timestamp: now,
    })
}

pub fn apply_close(market: &mut Market, oracle: Pubkey, final_outcome: u8, now: i64) -> Result<MarketClosed> {
    market.settle_dispute(oracle, final_outcome)?;

    Ok(MarketClosed {
        market_id: market.id,
        final_outcome,
        timestamp: now,
    })
}

pub fn apply_cancel(market: &mut Market, authority: Pubkey, now: i64) -> Result<MarketCancelled> {
    market.cancel(authority, now)?;

    Ok(MarketCancelled {
        market_id: market.id,
        cancelled_by: authority,
        timestamp: now,
    })
}

// =============================================================================
// RESOLVE
// =============================================================================

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])]
pub struct ResolveMarket<'info> {
    pub oracle: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,
}

impl<'info> ResolveMarket<'info> {
    pub fn resolve_market(&mut self, outcome: u8) -> Result<()> {
        let clock = Clock::get()?;

        let event = apply_resolve(&mut self.market, self.oracle.key(), outcome, clock.unix_timestamp)?;
        emit!(event);

        msg!(
            "Market {} resolved to outcome {}",
            self.market.key(),
            outcome
        );

        Ok(())
    }
}

// =============================================================================
// DISPUTE
// =============================================================================

#[derive(Accounts)]
#[instruction(market_id: [u8; 32], outcome: u8)]
pub struct DisputeMarket<'info> {
    pub disputer: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// The disputer's stake cell on `outcome`; absent means no stake
    #[account(
        seeds = [StakePosition::SEED, market_id.as_ref(), outcome.to_le_bytes().as_ref(), disputer.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Option<Account<'info, StakePosition>>,
}

impl<'info> DisputeMarket<'info> {
    pub fn dispute_market(&mut self, outcome: u8) -> Result<()> {
        let clock = Clock::get()?;

        let event = apply_dispute(
            &mut self.market,
            self.position.as_deref(),
            self.disputer.key(),
            outcome,
            clock.unix_timestamp,
        )?;
        emit!(event);

        msg!("Market {} disputed by {}", self.market.key(), self.disputer.key());

        Ok(())
    }
}

// =============================================================================
// CLOSE
// =============================================================================

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])]
pub struct CloseMarket<'info> {
    pub oracle: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,
}

impl<'info> CloseMarket<'info> {
    pub fn close_market(&mut self, final_outcome: u8) -> Result<()> {
        let clock = Clock::get()?;

        let event = apply_close(&mut self.market, self.oracle.key(), final_outcome, clock.unix_timestamp)?;
        emit!(event);

        msg!(
            "Market {} closed with final outcome {}",
            self.market.key(),
            final_outcome
        );

        Ok(())
    }
}

// =============================================================================
// CANCEL
// =============================================================================

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])]
pub struct CancelMarket<'info> {
    /// Creator or oracle, depending on the market phase
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,
}

impl<'info> CancelMarket<'info> {
    pub fn cancel_market(&mut self) -> Result<()> {
        let clock = Clock::get()?;

        let event = apply_cancel(&mut self.market, self.authority.key(), clock.unix_timestamp)?;
        emit!(event);

        msg!("Market {} cancelled", self.market.key());

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
