//! Parimutuel Market State
//!
//! Each market holds N mutually exclusive outcomes, the aggregate stake on
//! each one, and its position in the lifecycle:
//!
//! ```text
//!            resolve              dispute              close
//!   OPEN ─────────────▶ RESOLVED ─────────▶ DISPUTED ─────────▶ CLOSED
//!    │  (after closing)    │    (in window)     │
//!    │                     │ window elapsed     │
//!    │                     └──▶ (closed)        │
//!    │ cancel                                   │ cancel (oracle)
//!    └──────────────────▶ CANCELLED ◀───────────┘
//! ```
//!
//! ENDED is never stored: it is OPEN observed at or after `closing_time`.
//! An undisputed market whose dispute window elapsed is likewise never
//! rewritten to CLOSED; [`Market::is_closed`] evaluates it on demand.
//!
//! Every method validates all of its preconditions before writing anything,
//! so a returned error always leaves the market untouched.

use anchor_lang::prelude::*;

use crate::constants::{DISPUTE_WINDOW, MARKET_SEED, MAX_OUTCOMES, MIN_OUTCOMES};
use crate::error::MarketError;
use crate::payout::{FeeSplit, Parimutuel};
use crate::state::StakePosition;

/// Individual prediction market account
///
/// Seeds: ["market", id]
#[account]
#[derive(InitSpace, Debug)]
pub struct Market {
    /// Caller-supplied unique identifier
    pub id: [u8; 32],

    /// Market creator; receives collected fees
    pub creator: Pubkey,

    /// Principal authorized to resolve, close and settle disputes
    pub oracle: Pubkey,

    /// Collateral token mint address
    pub collateral_mint: Pubkey,

    /// Number of outcomes (2..=MAX_OUTCOMES)
    pub num_outcomes: u8,

    /// Unix timestamp when staking ends
    pub closing_time: i64,

    /// Unix timestamp when market was created
    pub created_at: i64,

    /// Sum of all live stakes
    pub total_stake: u64,

    /// Fees captured from removals and refunds, not yet collected
    pub fee_collected: u64,

    /// Winning outcome (only valid once resolved)
    pub resolved_outcome: u8,

    /// End of the dispute window (only valid once resolved)
    pub dispute_deadline: i64,

    /// Stored lifecycle state
    pub state: MarketState,

    /// Aggregate stake per outcome
    #[max_len(32)]
    pub outcome_totals: Vec<u64>,

    /// Winning pool at the time the outcome was fixed
    pub winning_pool: u64,

    /// Losing pool at the time the outcome was fixed
    pub losing_pool: u64,

    /// Rewards (excluding principal) paid out of the losing pool
    pub rewards_paid: u64,

    /// PDA bump seed
    pub bump: u8,
}

/// Stored lifecycle state
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum MarketState {
    /// Accepting stakes until closing time
    #[default]
    Open,
    /// Oracle reported an outcome, dispute window running
    Resolved,
    /// A staker contested the reported outcome
    Disputed,
    /// Oracle settled the dispute with a final outcome
    Closed,
    /// Voided; stakers reclaim their stake via refund
    Cancelled,
}

/// Effective state at a given instant, including derived states
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum MarketPhase {
    Open,
    Ended,
    Resolved,
    Disputed,
    Closed,
    Cancelled,
}

/// Read-only snapshot returned by `get_market`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct MarketView {
    pub id: [u8; 32],
    pub creator: Pubkey,
    pub oracle: Pubkey,
    pub num_outcomes: u8,
    pub closing_time: i64,
    pub created_at: i64,
    pub total_stake: u64,
    pub fee_collected: u64,
    pub resolved_outcome: u8,
    pub dispute_deadline: i64,
    pub phase: MarketPhase,
    pub outcome_totals: Vec<u64>,
}

impl Market {
    pub const SEED: &'static [u8] = MARKET_SEED;

    /// Build a fresh OPEN market after validating creation arguments
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        id: [u8; 32],
        creator: Pubkey,
        oracle: Pubkey,
        collateral_mint: Pubkey,
        closing_time: i64,
        num_outcomes: u8,
        now: i64,
        bump: u8,
    ) -> Result<Market> {
        require!(oracle != Pubkey::default(), MarketError::InvalidOracle);
        require!(closing_time > now, MarketError::ClosingTimeInPast);
        require!(num_outcomes >= MIN_OUTCOMES, MarketError::NotEnoughOutcomes);
        require!(num_outcomes <= MAX_OUTCOMES, MarketError::TooManyOutcomes);

        Ok(Market {
            id,
            creator,
            oracle,
            collateral_mint,
            num_outcomes,
            closing_time,
            created_at: now,
            total_stake: 0,
            fee_collected: 0,
            resolved_outcome: 0,
            dispute_deadline: 0,
            state: MarketState::Open,
            outcome_totals: vec![0; num_outcomes as usize],
            winning_pool: 0,
            losing_pool: 0,
            rewards_paid: 0,
            bump,
        })
    }

    pub fn phase(&self, now: i64) -> MarketPhase {
        match self.state {
            MarketState::Open if now >= self.closing_time => MarketPhase::Ended,
            MarketState::Open => MarketPhase::Open,
            MarketState::Resolved if now >= self.dispute_deadline => MarketPhase::Closed,
            MarketState::Resolved => MarketPhase::Resolved,
            MarketState::Disputed => MarketPhase::Disputed,
            MarketState::Closed => MarketPhase::Closed,
            MarketState::Cancelled => MarketPhase::Cancelled,
        }
    }

    /// Closed explicitly, or resolved with the dispute window elapsed
    pub fn is_closed(&self, now: i64) -> bool {
        self.phase(now) == MarketPhase::Closed
    }

    pub fn view(&self, now: i64) -> MarketView {
        MarketView {
            id: self.id,
            creator: self.creator,
            oracle: self.oracle,
            num_outcomes: self.num_outcomes,
            closing_time: self.closing_time,
            created_at: self.created_at,
            total_stake: self.total_stake,
            fee_collected: self.fee_collected,
            resolved_outcome: self.resolved_outcome,
            dispute_deadline: self.dispute_deadline,
            phase: self.phase(now),
            outcome_totals: self.outcome_totals.clone(),
        }
    }

    /// `total_stake == Σ outcome_totals`
    pub fn is_balanced(&self) -> bool {
        self.outcome_totals
            .iter()
            .try_fold(0u64, |acc, total| acc.checked_add(*total))
            == Some(self.total_stake)
    }

    // ------------------------------------------------------------------
    // Ledger
    // ------------------------------------------------------------------

    /// Intake gateway: credit `amount` to `account`'s cell on `outcome`.
    ///
    /// Both the direct and the notified staking paths end up here.
    pub fn record_stake(
        &mut self,
        position: &mut StakePosition,
        account: Pubkey,
        outcome: u8,
        amount: u64,
        now: i64,
    ) -> Result<()> {
        require!(self.phase(now) == MarketPhase::Open, MarketError::MarketNotOpen);
        require!(amount > 0, MarketError::ZeroAmount);
        self.check_cell(position, account, outcome)?;

        let index = outcome as usize;
        let cell = position.amount.checked_add(amount).ok_or(MarketError::MathOverflow)?;
        let outcome_total = self.outcome_totals[index]
            .checked_add(amount)
            .ok_or(MarketError::MathOverflow)?;
        let total_stake = self.total_stake.checked_add(amount).ok_or(MarketError::MathOverflow)?;

        position.amount = cell;
        self.outcome_totals[index] = outcome_total;
        self.total_stake = total_stake;

        Ok(())
    }

    /// Early exit: debit the full `amount` and capture the fee.
    ///
    /// Returns the split; the caller transfers `net` to the account.
    pub fn release_stake(
        &mut self,
        position: &mut StakePosition,
        account: Pubkey,
        outcome: u8,
        amount: u64,
        now: i64,
    ) -> Result<FeeSplit> {
        require!(self.phase(now) == MarketPhase::Open, MarketError::MarketNotOpen);
        require!(amount > 0, MarketError::ZeroAmount);
        self.check_cell(position, account, outcome)?;
        require!(amount <= position.amount, MarketError::ExceedsStake);

        let split = Parimutuel::split_fee(amount)?;
        let fee_collected = self
            .fee_collected
            .checked_add(split.fee)
            .ok_or(MarketError::MathOverflow)?;

        self.debit(position, amount)?;
        self.fee_collected = fee_collected;

        Ok(split)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Oracle reports the winning outcome once staking has ended
    pub fn resolve(&mut self, caller: Pubkey, outcome: u8, now: i64) -> Result<()> {
        require_keys_eq!(caller, self.oracle, MarketError::NotOracle);
        require!(self.state == MarketState::Open, MarketError::MarketNotOpen);
        require!(now >= self.closing_time, MarketError::MarketNotEnded);
        self.check_outcome(outcome)?;

        let dispute_deadline = now.checked_add(DISPUTE_WINDOW).ok_or(MarketError::MathOverflow)?;

        self.resolved_outcome = outcome;
        self.dispute_deadline = dispute_deadline;
        self.state = MarketState::Resolved;
        self.fix_pools()
    }

    /// A staker contests the reported outcome inside the dispute window
    pub fn dispute(&mut self, position: &StakePosition, caller: Pubkey, now: i64) -> Result<()> {
        require!(self.state == MarketState::Resolved, MarketError::MarketNotResolved);
        require!(now < self.dispute_deadline, MarketError::DisputeWindowClosed);
        require!(
            position.owner == caller && position.market_id == self.id && position.amount > 0,
            MarketError::NoStakeForDispute
        );

        self.state = MarketState::Disputed;
        Ok(())
    }

    /// Oracle settles a dispute with the final outcome
    pub fn settle_dispute(&mut self, caller: Pubkey, final_outcome: u8) -> Result<()> {
        require_keys_eq!(caller, self.oracle, MarketError::NotOracle);
        require!(self.state == MarketState::Disputed, MarketError::MarketNotDisputed);
        self.check_outcome(final_outcome)?;

        self.resolved_outcome = final_outcome;
        self.state = MarketState::Closed;
        self.fix_pools()
    }

    /// Void the market; who may do so depends on the effective phase
    pub fn cancel(&mut self, caller: Pubkey, now: i64) -> Result<()> {
        match self.phase(now) {
            MarketPhase::Open => {
                require!(
                    caller == self.creator || caller == self.oracle,
                    MarketError::NotCreatorOrOracle
                );
            }
            MarketPhase::Ended | MarketPhase::Disputed => {
                require_keys_eq!(caller, self.oracle, MarketError::NotOracle);
            }
            MarketPhase::Resolved => return err!(MarketError::CannotCancelResolved),
            MarketPhase::Closed => return err!(MarketError::CannotCancelClosed),
            MarketPhase::Cancelled => return err!(MarketError::AlreadyCancelled),
        }

        self.state = MarketState::Cancelled;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Settlement
    // ------------------------------------------------------------------

    /// Net gain `account` would receive for its stake on `outcome`.
    ///
    /// While staking is still open or awaiting resolution this is a preview:
    /// the reward if `outcome` won against the live totals. Once an outcome
    /// is fixed it is the settled figure, and zero for every other outcome.
    /// Always zero for a cancelled market.
    pub fn reward_for(&self, position: &StakePosition, outcome: u8) -> Result<u64> {
        if position.outcome != outcome || position.market_id != self.id {
            return Ok(0);
        }

        match self.state {
            MarketState::Open => {
                let Some(&winning) = self.outcome_totals.get(outcome as usize) else {
                    return Ok(0);
                };
                let losing = self
                    .total_stake
                    .checked_sub(winning)
                    .ok_or(MarketError::MathOverflow)?;
                Parimutuel::reward(position.amount, winning, losing)
            }
            MarketState::Resolved | MarketState::Disputed | MarketState::Closed => {
                if outcome != self.resolved_outcome {
                    return Ok(0);
                }
                Parimutuel::reward(position.amount, self.winning_pool, self.losing_pool)
            }
            MarketState::Cancelled => Ok(0),
        }
    }

    /// Pay a winner out: principal plus reward. Returns the payout.
    pub fn settle_reward(
        &mut self,
        position: &mut StakePosition,
        account: Pubkey,
        outcome: u8,
        now: i64,
    ) -> Result<u64> {
        require!(self.is_closed(now), MarketError::MarketNotClosed);
        require!(outcome == self.resolved_outcome, MarketError::NotWinningOutcome);
        self.check_cell(position, account, outcome)?;
        require!(position.amount > 0, MarketError::NothingToWithdraw);

        let principal = position.amount;
        let payout = Parimutuel::payout(principal, self.winning_pool, self.losing_pool)?;
        let reward = payout - principal;
        let rewards_paid = self.rewards_paid.checked_add(reward).ok_or(MarketError::MathOverflow)?;

        self.debit(position, principal)?;
        self.rewards_paid = rewards_paid;

        Ok(payout)
    }

    /// Return a cancelled market's stake, net of the early-exit fee
    pub fn settle_refund(
        &mut self,
        position: &mut StakePosition,
        account: Pubkey,
        outcome: u8,
    ) -> Result<FeeSplit> {
        require!(self.state == MarketState::Cancelled, MarketError::MarketNotCancelled);
        self.check_cell(position, account, outcome)?;
        require!(position.amount > 0, MarketError::NothingToWithdraw);

        let stake = position.amount;
        let split = Parimutuel::split_fee(stake)?;
        let fee_collected = self
            .fee_collected
            .checked_add(split.fee)
            .ok_or(MarketError::MathOverflow)?;

        self.debit(position, stake)?;
        self.fee_collected = fee_collected;

        Ok(split)
    }

    /// Hand all captured fees to the creator once the market is terminal
    pub fn take_fees(&mut self, caller: Pubkey, now: i64) -> Result<u64> {
        require_keys_eq!(caller, self.creator, MarketError::NotCreator);
        require!(
            self.is_closed(now) || self.state == MarketState::Cancelled,
            MarketError::MarketNotClosed
        );
        require!(self.fee_collected > 0, MarketError::NoFeesToCollect);

        let fees = self.fee_collected;
        self.fee_collected = 0;
        Ok(fees)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn check_outcome(&self, outcome: u8) -> Result<()> {
        require!(outcome < self.num_outcomes, MarketError::InvalidOutcome);
        Ok(())
    }

    fn check_cell(&self, position: &StakePosition, account: Pubkey, outcome: u8) -> Result<()> {
        self.check_outcome(outcome)?;
        require!(position.market_id == self.id, MarketError::MarketNotFound);
        require!(position.outcome == outcome, MarketError::InvalidOutcome);
        require_keys_eq!(position.owner, account, MarketError::NotStakeOwner);
        Ok(())
    }

    /// Remove `amount` from a cell and every aggregate above it
    fn debit(&mut self, position: &mut StakePosition, amount: u64) -> Result<()> {
        let index = position.outcome as usize;
        let cell = position.amount.checked_sub(amount).ok_or(MarketError::ExceedsStake)?;
        let outcome_total = self.outcome_totals[index]
            .checked_sub(amount)
            .ok_or(MarketError::MathOverflow)?;
        let total_stake = self.total_stake.checked_sub(amount).ok_or(MarketError::MathOverflow)?;

        position.amount = cell;
        self.outcome_totals[index] = outcome_total;
        self.total_stake = total_stake;
        Ok(())
    }

    /// Freeze the pools rewards are computed against
    fn fix_pools(&mut self) -> Result<()> {
        let winning = self.outcome_totals[self.resolved_outcome as usize];
        self.winning_pool = winning;
        self.losing_pool = self.total_stake.checked_sub(winning).ok_or(MarketError::MathOverflow)?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
