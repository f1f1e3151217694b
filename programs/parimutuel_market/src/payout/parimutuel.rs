//! # Parimutuel Settlement
//!
//! All losing stakes form a single pool that winners share in proportion to
//! their slice of the winning pool:
//!
//! ```text
//!   S = account stake on the winning outcome
//!   W = total stake on the winning outcome
//!   L = total stake on every other outcome
//!
//!   reward = ⌊S × L ÷ W⌋        (net gain)
//!   payout = S + reward          (principal is always returned)
//! ```
//!
//! Rounding is always toward zero, so the sum of all rewards never exceeds
//! `L`; the dust stays in the vault.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, FEE_BPS};
use crate::error::MarketError;

/// Breakdown of value leaving the pool before settlement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    /// Amount paid to the account
    pub net: u64,
    /// Amount retained for the market creator
    pub fee: u64,
}

pub struct Parimutuel;

impl Parimutuel {
    /// Split an early-exit amount into the account's share and the fee.
    ///
    /// The fee is carved out of `amount`, so `net + fee == amount` always.
    pub fn split_fee(amount: u64) -> Result<FeeSplit> {
        let fee = (amount as u128)
            .checked_mul(FEE_BPS as u128)
            .ok_or(MarketError::MathOverflow)?
            .checked_div(BPS_DENOMINATOR as u128)
            .ok_or(MarketError::MathOverflow)? as u64;
        let net = amount.checked_sub(fee).ok_or(MarketError::MathOverflow)?;

        Ok(FeeSplit { net, fee })
    }

    /// Net gain for `stake` out of the losing pool.
    ///
    /// # Arguments
    /// * `stake` - Account stake on the winning outcome (S)
    /// * `winning_pool` - Total stake on the winning outcome (W)
    /// * `losing_pool` - Total stake on all other outcomes (L)
    pub fn reward(stake: u64, winning_pool: u64, losing_pool: u64) -> Result<u64> {
        if stake == 0 || winning_pool == 0 {
            return Ok(0);
        }
        require!(stake <= winning_pool, MarketError::ExceedsStake);

        let reward = (stake as u128)
            .checked_mul(losing_pool as u128)
            .ok_or(MarketError::MathOverflow)?
            .checked_div(winning_pool as u128)
            .ok_or(MarketError::MathOverflow)?;

        // S <= W bounds the quotient by L
        Ok(reward as u64)
    }

    /// Total amount released to a winner: principal plus reward
    pub fn payout(stake: u64, winning_pool: u64, losing_pool: u64) -> Result<u64> {
        let reward = Self::reward(stake, winning_pool, losing_pool)?;
        let payout = stake.checked_add(reward).ok_or(MarketError::MathOverflow)?;
        Ok(payout)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_is_ten_percent_of_principal() {
        let split = Parimutuel::split_fee(100).unwrap();
        assert_eq!(split, FeeSplit { net: 90, fee: 10 });

        let split = Parimutuel::split_fee(500).unwrap();
        assert_eq!(split.net + split.fee, 500);
        assert_eq!(split.fee, 50);
    }

    #[test]
    fn test_fee_rounds_down() {
        // 10% of 9 is 0.9 -> no fee, full amount returned
        assert_eq!(Parimutuel::split_fee(9).unwrap(), FeeSplit { net: 9, fee: 0 });
        assert_eq!(Parimutuel::split_fee(19).unwrap(), FeeSplit { net: 18, fee: 1 });
    }

    #[test]
    fn test_fee_on_max_amount() {
        let split = Parimutuel::split_fee(u64::MAX).unwrap();
        assert_eq!(split.net.checked_add(split.fee), Some(u64::MAX));
    }

    #[test]
    fn test_reward_proportional_to_winning_share() {
        // A=250 and B=300 on the winner, 110 on the loser
        assert_eq!(Parimutuel::reward(250, 550, 110).unwrap(), 50);
        assert_eq!(Parimutuel::reward(300, 550, 110).unwrap(), 60);
    }

    #[test]
    fn test_reward_without_losers_is_zero() {
        assert_eq!(Parimutuel::reward(100, 100, 0).unwrap(), 0);
        assert_eq!(Parimutuel::payout(100, 100, 0).unwrap(), 100);
    }

    #[test]
    fn test_reward_without_stake_is_zero() {
        assert_eq!(Parimutuel::reward(0, 550, 110).unwrap(), 0);
        assert_eq!(Parimutuel::reward(0, 0, 110).unwrap(), 0);
    }

    #[test]
    fn test_rewards_never_exceed_losing_pool() {
        // Three equal winners splitting an indivisible pool
        let winners = [1u64, 1, 1];
        let total: u64 = winners
            .iter()
            .map(|s| Parimutuel::reward(*s, 3, 100).unwrap())
            .sum();
        assert_eq!(total, 99);
    }

    #[test]
    fn test_reward_large_values_do_not_overflow() {
        let reward = Parimutuel::reward(u64::MAX / 2, u64::MAX / 2, u64::MAX / 2).unwrap();
        assert_eq!(reward, u64::MAX / 2);
    }

    #[test]
    fn test_stake_larger_than_pool_is_rejected() {
        assert!(Parimutuel::reward(600, 550, 110).is_err());
    }
}
