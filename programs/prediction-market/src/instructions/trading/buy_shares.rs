use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{CONFIG_SEED, MARKET_SEED, POSITION_SEED, VAULT_SEED};
use crate::state::{Market, PlatformConfig, UserPosition};
use crate::events::SharesBought;
use crate::errors::MarketError;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct BuyShares<'info> {
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
        seeds = [POSITION_SEED, market.key().as_ref(), trader.key().as_ref()],
        bump,
        payer = trader,
        space = 8 + UserPosition::INIT_SPACE
    )]
    pub position: Box<Account<'info, UserPosition>>,

    #[account(
        mut,
        token::mint = market.collateral_mint,
        token::authority = trader,
    )]
    pub trader_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub trader: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn process_buy_shares(
    ctx: Context<BuyShares>,
    market_id: u64,
    outcome: u8,
    amount: u64,
    min_shares_out: u64,
) -> Result<u64> {
    let now = Clock::get()?.slot;
    ctx.accounts.config.require_active()?;

    let market = &mut ctx.accounts.market;
    let fill = market.buy(outcome, amount, now)?;
    require!(fill.shares >= min_shares_out, MarketError::SlippageExceeded);

    // Fee stays in the vault as pool liquidity
    token::deposit(
        &ctx.accounts.token_program,
        &ctx.accounts.trader_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.trader,
        amount,
    )?;

    let trader = ctx.accounts.trader.key();
    let position = &mut ctx.accounts.position;
    position.bind(market.key(), trader, ctx.bumps.position);
    position.credit(outcome as usize, fill.shares)?;

    emit!(SharesBought {
        market_id,
        trader,
        outcome,
        amount,
        fee: fill.fee,
        shares: fill.shares,
        price_bps: market.price_bps(outcome)?,
    });

    Ok(fill.shares)
}
