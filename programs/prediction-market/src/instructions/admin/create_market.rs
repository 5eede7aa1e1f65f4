use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::{CONFIG_SEED, MARKET_SEED, VAULT_SEED};
use crate::state::{CreateMarketParams, Market, PlatformConfig};
use crate::events::MarketCreated;
use crate::errors::MarketError;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)] // client derives the market PDA from the next id
pub struct CreateMarket<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = collateral_mint @ MarketError::InvalidMint,
    )]
    pub config: Box<Account<'info, PlatformConfig>>,

    #[account(
        init,
        seeds = [MARKET_SEED, market_id.to_le_bytes().as_ref()],
        bump,
        payer = creator,
        space = 8 + Market::INIT_SPACE
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        init,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump,
        payer = creator,
        token::mint = collateral_mint,
        token::authority = market,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// Pays the oracle fee into escrow
    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = creator,
    )]
    pub creator_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub collateral_mint: Box<Account<'info, Mint>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn process_create_market(
    ctx: Context<CreateMarket>,
    market_id: u64,
    params: CreateMarketParams,
) -> Result<u64> {
    let now = Clock::get()?.slot;
    let config = &mut ctx.accounts.config;

    config.require_active()?;
    config.register_market(market_id)?;

    let market = Market::new(
        params,
        config,
        market_id,
        ctx.accounts.creator.key(),
        now,
        ctx.bumps.market,
        ctx.bumps.vault,
    )?;
    ctx.accounts.market.set_inner(market);

    token::deposit(
        &ctx.accounts.token_program,
        &ctx.accounts.creator_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.creator,
        ctx.accounts.market.escrowed_fee,
    )?;

    let market = &ctx.accounts.market;
    msg!("Market {} created with {} outcomes", market_id, market.outcome_count());
    emit!(MarketCreated {
        market_id,
        creator: market.creator,
        oracle: market.oracle,
        outcomes: market.outcomes.clone(),
        closing_slot: market.closing_slot,
        resolution_slot: market.resolution_slot,
        fee_bps: market.fee_bps,
    });

    Ok(market_id)
}
