use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{CONFIG_SEED, MARKET_SEED, VAULT_SEED};
use crate::state::{Market, PlatformConfig};
use crate::events::MarketResolved;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct ResolveMarket<'info> {
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

    /// Receives the escrowed oracle fee
    #[account(
        mut,
        token::mint = market.collateral_mint,
        token::authority = oracle,
    )]
    pub oracle_token_account: Box<Account<'info, TokenAccount>>,

    pub oracle: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_resolve_market(ctx: Context<ResolveMarket>, market_id: u64, outcome: u8) -> Result<()> {
    let now = Clock::get()?.slot;
    let market = &mut ctx.accounts.market;

    let fee = market.resolve(
        ctx.accounts.oracle.key(),
        outcome,
        now,
        ctx.accounts.config.dispute_period,
    )?;

    token::withdraw(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.oracle_token_account,
        market,
        fee,
    )?;

    let dispute_deadline = market.dispute_deadline()?;
    msg!("Market {} resolved to outcome {}, disputable until slot {}", market_id, outcome, dispute_deadline);
    emit!(MarketResolved {
        market_id,
        oracle: market.oracle,
        outcome,
        resolved_slot: now,
        dispute_deadline,
    });

    Ok(())
}
