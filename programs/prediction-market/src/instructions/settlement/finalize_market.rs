use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{MARKET_SEED, VAULT_SEED};
use crate::state::Market;
use crate::events::MarketFinalized;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct FinalizeMarket<'info> {
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

    /// Receives the residual when no liquidity provider is left to claim it
    #[account(
        mut,
        token::mint = market.collateral_mint,
        token::authority = market.creator,
    )]
    pub creator_token_account: Box<Account<'info, TokenAccount>>,

    /// Anyone may finalize once the dispute window has passed
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_finalize_market(ctx: Context<FinalizeMarket>, market_id: u64) -> Result<()> {
    let now = Clock::get()?.slot;
    let market = &mut ctx.accounts.market;
    let swept = market.finalize(now)?;

    token::withdraw(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.creator_token_account,
        market,
        swept,
    )?;

    let winner = market.winning_index()?;
    msg!("Market {} finalized, outcome {} wins", market_id, winner);
    emit!(MarketFinalized {
        market_id,
        winning_outcome: winner as u8,
        payout_pool: market.payout_pool,
        lp_residual: market.lp_residual,
        swept_to_creator: swept,
    });

    Ok(())
}
