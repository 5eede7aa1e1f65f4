use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{CONFIG_SEED, DISPUTE_SEED, MARKET_SEED, VAULT_SEED};
use crate::state::{DisputeRecord, DisputeStatus, Market, PlatformConfig};
use crate::events::DisputeOpened;
use crate::errors::MarketError;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct DisputeResolution<'info> {
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

    /// One record per round
    #[account(
        init,
        seeds = [DISPUTE_SEED, market.key().as_ref(), market.dispute_rounds.to_le_bytes().as_ref()],
        bump,
        payer = disputer,
        space = 8 + DisputeRecord::INIT_SPACE
    )]
    pub dispute: Box<Account<'info, DisputeRecord>>,

    #[account(
        mut,
        token::mint = market.collateral_mint,
        token::authority = disputer,
    )]
    pub disputer_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub disputer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn process_dispute_resolution(
    ctx: Context<DisputeResolution>,
    market_id: u64,
    proposed_outcome: u8,
    stake: u64,
) -> Result<()> {
    let now = Clock::get()?.slot;
    let market = &mut ctx.accounts.market;

    let original_outcome = market.winning_outcome.ok_or(MarketError::MarketNotResolved)?;
    let round = market.open_dispute(proposed_outcome, stake, ctx.accounts.config.min_dispute_stake, now)?;

    token::deposit(
        &ctx.accounts.token_program,
        &ctx.accounts.disputer_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.disputer,
        stake,
    )?;

    let disputer = ctx.accounts.disputer.key();
    ctx.accounts.dispute.set_inner(DisputeRecord {
        market: market.key(),
        disputer,
        round,
        original_outcome,
        proposed_outcome,
        stake,
        raised_slot: now,
        settled_slot: None,
        status: DisputeStatus::Open,
        bump: ctx.bumps.dispute,
    });

    msg!("Dispute round {} opened on market {}", round, market_id);
    emit!(DisputeOpened {
        market_id,
        disputer,
        round,
        proposed_outcome,
        stake,
    });

    Ok(())
}
