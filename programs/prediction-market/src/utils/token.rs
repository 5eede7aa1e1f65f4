use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::MARKET_SEED;
use crate::state::Market;

/// Moves collateral from a user's token account into a market vault.
pub fn deposit<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    vault: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: vault.to_account_info(),
                authority: authority.to_account_info(),
            },
        ),
        amount,
    )
}

/// Pays collateral out of a market vault, signed by the market PDA.
pub fn withdraw<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    market: &Account<'info, Market>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let market_id_bytes = market.market_id.to_le_bytes();
    let bump = [market.bump];
    let signer: &[&[&[u8]]] = &[&[MARKET_SEED, market_id_bytes.as_ref(), &bump]];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: vault.to_account_info(),
                to: to.to_account_info(),
                authority: market.to_account_info(),
            },
            signer,
        ),
        amount,
    )
}
