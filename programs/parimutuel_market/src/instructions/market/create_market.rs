//! Market Creation
//!
//! Anyone may open a market. The caller picks the id, so an id that is
//! already taken fails when the market PDA is initialized a second time.
//! The market's collateral vault is created in the same instruction.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::state::{Config, Market};

/// Event emitted when a market is opened
#[event]
#[derive(Debug)]
pub struct MarketCreated {
    pub market_id: [u8; 32],
    pub creator: Pubkey,
    pub oracle: Pubkey,
    pub closing_time: i64,
    pub num_outcomes: u8,
}

/// Build the market record and its creation event
#[allow(clippy::too_many_arguments)]
pub fn apply_create_market(
    id: [u8; 32],
    creator: Pubkey,
    oracle: Pubkey,
    collateral_mint: Pubkey,
    closing_time: i64,
    num_outcomes: u8,
    now: i64,
    bump: u8,
) -> Result<(Market, MarketCreated)> {
    let market = Market::open(id, creator, oracle, collateral_mint, closing_time, num_outcomes, now, bump)?;
    let event = MarketCreated {
        market_id: id,
        creator,
        oracle,
        closing_time,
        num_outcomes,
    };

    Ok((market, event))
}

#[derive(Accounts)]
#[instruction(id: [u8; 32])]
pub struct CreateMarket<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [Market::SEED, id.as_ref()],
        bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(address = config.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    pub fn create_market(
        &mut self,
        id: [u8; 32],
        oracle: Pubkey,
        closing_time: i64,
        num_outcomes: u8,
        bumps: &CreateMarketBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        let (market, event) = apply_create_market(
            id,
            self.creator.key(),
            oracle,
            self.collateral_mint.key(),
            closing_time,
            num_outcomes,
            clock.unix_timestamp,
            bumps.market,
        )?;
        self.market.set_inner(market);

        emit!(event);

        msg!("Market {} created with {} outcomes", self.market.key(), num_outcomes);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketError;
    use crate::state::MarketPhase;

    #[test]
    fn test_create_market_builds_open_record() {
        let creator = Pubkey::new_unique();
        let oracle = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let (market, event) = apply_create_market([8; 32], creator, oracle, mint, 200, 3, 100, 251).unwrap();

        assert_eq!(market.phase(100), MarketPhase::Open);
        assert_eq!((market.collateral_mint, market.bump), (mint, 251));
        assert_eq!(market.outcome_totals, vec![0, 0, 0]);
        assert_eq!(event.market_id, [8; 32]);
        assert_eq!((event.creator, event.oracle), (creator, oracle));
        assert_eq!((event.closing_time, event.num_outcomes), (200, 3));
    }

    #[test]
    fn test_create_market_rejects_past_closing() {
        let err = apply_create_market(
            [8; 32],
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            100,
            2,
            100,
            255,
        )
        .unwrap_err();
        assert_eq!(err, MarketError::ClosingTimeInPast.into());
    }
}
