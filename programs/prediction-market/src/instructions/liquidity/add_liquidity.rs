use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{CONFIG_SEED, LIQUIDITY_SEED, MARKET_SEED, POSITION_SEED, VAULT_SEED};
use crate::state::{LiquidityPosition, Market, PlatformConfig, UserPosition};
use crate::events::LiquidityAdded;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct AddLiquidity<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, PlatformConfig>>,

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
        init_if_needed,
        seeds = [LIQUIDITY_SEED, market.key().as_ref(), provider.key().as_ref()],
        bump,
        payer = provider,
        space = 8 + LiquidityPosition::INIT_SPACE
    )]
    pub liquidity_position: Box<Account<'info, LiquidityPosition>>,

    /// Receives outcome shares the pool could not absorb
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

/// Returns the share of the pool the deposit bought, in basis points.
pub fn process_add_liquidity(ctx: Context<AddLiquidity>, market_id: u64, amount: u64) -> Result<u16> {
    let now = Clock::get()?.slot;
    ctx.accounts.config.require_active()?;

    let market = &mut ctx.accounts.market;
    let deposit = market.add_liquidity(amount, now)?;

    token::deposit(
        &ctx.accounts.token_program,
        &ctx.accounts.provider_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.provider,
        amount,
    )?;

    let provider = ctx.accounts.provider.key();
    let liquidity = &mut ctx.accounts.liquidity_position;
    liquidity.bind(market.key(), provider, ctx.bumps.liquidity_position);
    liquidity.record_deposit(amount, deposit.units)?;

    let position = &mut ctx.accounts.position;
    position.bind(market.key(), provider, ctx.bumps.position);
    position.credit_all(&deposit.unmatched)?;

    emit!(LiquidityAdded {
        market_id,
        provider,
        amount,
        units: deposit.units,
        share_bps: deposit.share_bps,
    });

    Ok(deposit.share_bps)
}
