//! Outbound transfers from a market vault.
//!
//! The vault is the market PDA's associated token account, so the market
//! signs every release with its own seeds. Handlers gather the accounts up
//! front and hand the release to their ledger step, which sends it only
//! after the ledger is final.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::state::Market;

/// Accounts behind one market-signed transfer out of the vault
pub struct VaultRelease<'info> {
    token_program: AccountInfo<'info>,
    market: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    collateral_mint: AccountInfo<'info>,
    destination: AccountInfo<'info>,
    decimals: u8,
}

impl<'info> VaultRelease<'info> {
    pub fn new(
        token_program: &Interface<'info, TokenInterface>,
        market: &Account<'info, Market>,
        vault: &InterfaceAccount<'info, TokenAccount>,
        collateral_mint: &InterfaceAccount<'info, Mint>,
        destination: &InterfaceAccount<'info, TokenAccount>,
    ) -> Self {
        VaultRelease {
            token_program: token_program.to_account_info(),
            market: market.to_account_info(),
            vault: vault.to_account_info(),
            collateral_mint: collateral_mint.to_account_info(),
            destination: destination.to_account_info(),
            decimals: collateral_mint.decimals,
        }
    }

    /// Move `amount` to the destination, signed with `market`'s seeds
    pub fn send(self, market: &Market, amount: u64) -> Result<()> {
        let market_seeds = &[Market::SEED, market.id.as_ref(), &[market.bump]];
        let market_signer = &[&market_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program,
                TransferChecked {
                    from: self.vault,
                    mint: self.collateral_mint,
                    to: self.destination,
                    authority: self.market,
                },
                market_signer,
            ),
            amount,
            self.decimals,
        )
    }
}
