use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{CONFIG_SEED, MARKET_SEED, POSITION_SEED, VAULT_SEED};
use crate::state::{Market, PlatformConfig, UserPosition};
use crate::events::SharesSold;
use crate::errors::MarketError;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct SellShares<'info> {
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

    /// Absent when the trader never held shares in this market
    #[account(
        mut,
        seeds = [POSITION_SEED, market.key().as_ref(), trader.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Option<Box<Account<'info, UserPosition>>>,

    #[account(
        mut,
        token::mint = market.collateral_mint,
        token::authority = trader,
    )]
    pub trader_token_account: Box<Account<'info, TokenAccount>>,

    pub trader: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_sell_shares(
    ctx: Context<SellShares>,
    market_id: u64,
    outcome: u8,
    shares: u64,
    min_out: u64,
) -> Result<u64> {
    let now = Clock::get()?.slot;
    ctx.accounts.config.require_active()?;

    let market = &mut ctx.accounts.market;
    let position = ctx.accounts.position.as_mut().map(|p| &mut ***p);
    let fill = market.sell_from(position, outcome, shares, now)?;
    require!(fill.collateral >= min_out, MarketError::SlippageExceeded);

    token::withdraw(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.trader_token_account,
        market,
        fill.collateral,
    )?;

    emit!(SharesSold {
        market_id,
        trader: ctx.accounts.trader.key(),
        outcome,
        shares,
        fee: fill.fee,
        collateral_out: fill.collateral,
        price_bps: market.price_bps(outcome)?,
    });

    Ok(fill.collateral)
}
