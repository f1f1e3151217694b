//! Stake Intake & Early Exit
//!
//! There are two ways in, both funnelling into [`Market::record_stake`]:
//!
//! ```text
//!   staker ── add_stake ───────────────────────────────┐
//!                                                       ▼
//!   staker ── collaborator ── on_token_transfer ──▶ record_stake ──▶ ledger
//!             (moves value, then notifies)
//! ```
//!
//! On the direct path the ledger is written before the inbound transfer
//! CPI: [`apply_add_stake`] takes the transfer as a closure and runs it
//! last. On the notified path the collaborator has already delivered the
//! value into the vault, so the program only has to decide whether to
//! trust the notification: the signer must be the configured collaborator
//! and `from` must be a real account.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::error::MarketError;
use crate::instructions::vault::VaultRelease;
use crate::state::{Config, Market, StakePosition};

/// Payload carried by a transfer-and-notify deposit
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeTicket {
    pub market_id: [u8; 32],
    pub outcome: u8,
}

#[event]
#[derive(Debug)]
pub struct StakeAdded {
    pub market_id: [u8; 32],
    pub staker: Pubkey,
    pub outcome: u8,
    pub amount: u64,
    pub position: u64,
    pub total_stake: u64,
}

#[event]
pub struct StakeRemoved {
    pub market_id: [u8; 32],
    pub staker: Pubkey,
    pub outcome: u8,
    pub amount: u64,
    pub fee: u64,
    pub net: u64,
    pub position: u64,
    pub total_stake: u64,
}


// =============================================================================
// LEDGER STEPS
// =============================================================================

/// Credit a direct stake, then pull the value in with `deposit`.
///
/// A freshly allocated cell is bound to `staker` first. `deposit` sees the
/// market with the stake already recorded.
#[allow(clippy::too_many_arguments)]
pub fn apply_add_stake(
    market: &mut Market,
    position: &mut StakePosition,
    staker: Pubkey,
    outcome: u8,
    amount: u64,
    bump: u8,
    now: i64,
    deposit: impl FnOnce(&Market, u64) -> Result<()>,
) -> Result<StakeAdded> {
    if position.is_unbound() {
        position.bind(market.id, outcome, staker, bump);
    }
    market.record_stake(position, staker, outcome, amount, now)?;
    deposit(market, amount)?;

    Ok(StakeAdded {
        market_id: market.id,
        staker,
        outcome,
        amount,
        position: position.amount,
        total_stake: market.total_stake,
    })
}

/// Credit a stake whose value the collaborator already delivered.
///
/// The notifier is checked before anything in the ticket is trusted.
#[allow(clippy::too_many_arguments)]
pub fn apply_notified_stake(
    config: &Config,
    market: &mut Market,
    position: &mut StakePosition,
    collaborator: Pubkey,
    from: Pubkey,
    amount: u64,
    ticket: StakeTicket,
    bump: u8,
    now: i64,
) -> Result<StakeAdded> {
    config.check_notifier(collaborator, from)?;
    require!(ticket.market_id == market.id, MarketError::MarketNotFound);

    if position.is_unbound() {
        position.bind(ticket.market_id, ticket.outcome, from, bump);
    }
    market.record_stake(position, from, ticket.outcome, amount, now)?;

    Ok(StakeAdded {
        market_id: market.id,
        staker: from,
        outcome: ticket.outcome,
        amount,
        position: position.amount,
        total_stake: market.total_stake,
    })
}

/// Debit an early exit, then pay the net amount out with `release`
pub fn apply_remove_stake(
    market: &mut Market,
    position: &mut StakePosition,
    staker: Pubkey,
    outcome: u8,
    amount: u64,
    now: i64,
    release: impl FnOnce(&Market, u64) -> Result<()>,
) -> Result<StakeRemoved> {
    let split = market.release_stake(position, staker, outcome, amount, now)?;
    release(market, split.net)?;

    Ok(StakeRemoved {
        market_id: market.id,
        staker,
        outcome,
        amount,
        fee: split.fee,
        net: split.net,
        position: position.amount,
        total_stake: market.total_stake,
    })
}

// =============================================================================
// DIRECT STAKE
// =============================================================================

#[derive(Accounts)]
#[instruction(market_id: [u8; 32], outcome: u8)]
pub struct AddStake<'info> {
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        init_if_needed,
        payer = staker,
        space = 8 + StakePosition::INIT_SPACE,
        seeds = [StakePosition::SEED, market_id.as_ref(), outcome.to_le_bytes().as_ref(), staker.key().as_ref()],
        bump,
    )]
    pub position: Box<Account<'info, StakePosition>>,

    #[account(address = market.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
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
    pub system_program: Program<'info, System>,
}

impl<'info> AddStake<'info> {
    pub fn add_stake(&mut self, outcome: u8, amount: u64, bumps: &AddStakeBumps) -> Result<()> {
        let clock = Clock::get()?;
        let cpi_program = self.token_program.to_account_info();
        let cpi_accounts = TransferChecked {
            from: self.staker_collateral.to_account_info(),
            mint: self.collateral_mint.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.staker.to_account_info(),
        };
        let decimals = self.collateral_mint.decimals;

        let event = apply_add_stake(
            &mut self.market,
            &mut self.position,
            self.staker.key(),
            outcome,
            amount,
            bumps.position,
            clock.unix_timestamp,
            |_, amount| transfer_checked(CpiContext::new(cpi_program, cpi_accounts), amount, decimals),
        )?;

        emit!(event);

        Ok(())
    }
}

// =============================================================================
// NOTIFIED STAKE
// =============================================================================

#[derive(Accounts)]
#[instruction(from: Pubkey, amount: u64, ticket: StakeTicket)]
pub struct OnTokenTransfer<'info> {
    /// Must be the configured value collaborator; checked before the
    /// ticket or `from` are trusted
    #[account(mut)]
    pub collaborator: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [Market::SEED, ticket.market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        init_if_needed,
        payer = collaborator,
        space = 8 + StakePosition::INIT_SPACE,
        seeds = [StakePosition::SEED, ticket.market_id.as_ref(), ticket.outcome.to_le_bytes().as_ref(), from.as_ref()],
        bump,
    )]
    pub position: Box<Account<'info, StakePosition>>,

    pub system_program: Program<'info, System>,
}

impl<'info> OnTokenTransfer<'info> {
    pub fn on_token_transfer(
        &mut self,
        from: Pubkey,
        amount: u64,
        ticket: StakeTicket,
        bumps: &OnTokenTransferBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        let event = apply_notified_stake(
            &self.config,
            &mut self.market,
            &mut self.position,
            self.collaborator.key(),
            from,
            amount,
            ticket,
            bumps.position,
            clock.unix_timestamp,
        )?;

        emit!(event);

        msg!("Notified stake of {} from {}", amount, from);

        Ok(())
    }
}

// =============================================================================
// EARLY EXIT
// =============================================================================

#[derive(Accounts)]
#[instruction(market_id: [u8; 32], outcome: u8)]
pub struct RemoveStake<'info> {
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

impl<'info> RemoveStake<'info> {
    pub fn remove_stake(&mut self, outcome: u8, amount: u64) -> Result<u64> {
        let clock = Clock::get()?;
        let release = VaultRelease::new(
            &self.token_program,
            &self.market,
            &self.vault,
            &self.collateral_mint,
            &self.staker_collateral,
        );

        let event = apply_remove_stake(
            &mut self.market,
            &mut self.position,
            self.staker.key(),
            outcome,
            amount,
            clock.unix_timestamp,
            |market, net| release.send(market, net),
        )?;
        let net = event.net;

        emit!(event);

        Ok(net)
    }
}

// ============================================================================
// TESTS
// ============================================================================
