use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{MARKET_SEED, POSITION_SEED, VAULT_SEED};
use crate::state::{Claim, Market, UserPosition};
use crate::events::WinningsClaimed;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct ClaimWinnings<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// Absent when the owner never held shares in this market
    #[account(
        mut,
        seeds = [POSITION_SEED, market.key().as_ref(), owner.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Option<Box<Account<'info, UserPosition>>>,

    #[account(
        mut,
        token::mint = market.collateral_mint,
        token::authority = owner,
    )]
    pub owner_token_account: Box<Account<'info, TokenAccount>>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Redeems the caller's winning shares. Returns the collateral paid.
pub fn process_claim_winnings(ctx: Context<ClaimWinnings>, market_id: u64) -> Result<u64> {
    let market = &mut ctx.accounts.market;
    let position = ctx.accounts.position.as_mut().map(|p| &mut ***p);
    let Claim { shares, payout } = market.claim(position)?;

    token::withdraw(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.owner_token_account,
        market,
        payout,
    )?;

    emit!(WinningsClaimed {
        market_id,
        owner: ctx.accounts.owner.key(),
        shares,
        payout,
    });

    Ok(payout)
}
