//! Program Initialization
//!
//! Records the collateral mint and the trusted value collaborator. This is
//! typically called once during deployment.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::error::MarketError;
use crate::state::Config;

/// Accounts required for program initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Deployer (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// Collateral token mint (e.g., USDC)
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the program configuration
    pub fn initialize(&mut self, value_collaborator: Pubkey, bumps: &InitializeBumps) -> Result<()> {
        require!(
            value_collaborator != Pubkey::default(),
            MarketError::InvalidSender
        );

        self.config.set_inner(Config {
            admin: self.admin.key(),
            collateral_mint: self.collateral_mint.key(),
            value_collaborator,
            bump: bumps.config,
        });

        msg!("Program initialized!");
        msg!("Admin: {}", self.admin.key());
        msg!("Collateral: {}", self.collateral_mint.key());
        msg!("Value collaborator: {}", value_collaborator);

        Ok(())
    }
}
