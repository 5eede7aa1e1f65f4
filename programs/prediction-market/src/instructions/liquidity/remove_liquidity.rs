use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{LIQUIDITY_SEED, MARKET_SEED, POSITION_SEED, VAULT_SEED};
use crate::state::{LiquidityPosition, Market, UserPosition};
use crate::events::LiquidityRemoved;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct RemoveLiquidity<'info> {
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

    #[account(
        mut,
        seeds = [LIQUIDITY_SEED, market.key().as_ref(), provider.key().as_ref()],
        bump = liquidity_position.bump,
    )]
    pub liquidity_position: Box<Account<'info, LiquidityPosition>>,

    #[account(
        init_if_needed,
        seeds = [POSITION_SEED, market.key().as_ref(), provider.key().as_ref()],
        bump,
        payer = provider,
        space = 8 + UserPosition::INIT_SPACE
    )]
    pub position: Box<Account<'info, UserPosition>>,

    #[account(
        mut,
        token::mint = market.collateral_mint,
        token::authority = provider,
    )]
    pub provider_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub provider: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Burns `share_bps` of the caller's LP units. Returns collateral paid out.
pub fn process_remove_liquidity(ctx: Context<RemoveLiquidity>, market_id: u64, share_bps: u16) -> Result<u64> {
    let now = Clock::get()?.slot;
    let liquidity = &mut ctx.accounts.liquidity_position;
    let units = liquidity.units_for(share_bps)?;

    let market = &mut ctx.accounts.market;
    let withdrawal = market.remove_liquidity(units, now)?;
    liquidity.record_withdrawal(units, withdrawal.collateral_out)?;

    let provider = ctx.accounts.provider.key();
    let position = &mut ctx.accounts.position;
    position.bind(market.key(), provider, ctx.bumps.position);
    position.credit_all(&withdrawal.unmatched)?;

    token::withdraw(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.provider_token_account,
        market,
        withdrawal.collateral_out,
    )?;

    emit!(LiquidityRemoved {
        market_id,
        provider,
        units,
        collateral_out: withdrawal.collateral_out,
    });

    Ok(withdrawal.collateral_out)
}
