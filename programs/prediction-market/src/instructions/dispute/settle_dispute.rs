use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{CONFIG_SEED, DISPUTE_SEED, MARKET_SEED, VAULT_SEED};
use crate::state::{DisputeRecord, Market, PlatformConfig};
use crate::events::DisputeSettled;
use crate::errors::MarketError;
use crate::utils::token;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct SettleDispute<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        constraint = config.arbiter == arbiter.key() @ MarketError::NotArbiter
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

    /// Latest round
    #[account(
        mut,
        seeds = [
            DISPUTE_SEED,
            market.key().as_ref(),
            market.dispute_rounds.saturating_sub(1).to_le_bytes().as_ref()
        ],
        bump = dispute.bump,
        has_one = market,
    )]
    pub dispute: Box<Account<'info, DisputeRecord>>,

    /// Refund destination when the dispute is upheld
    #[account(
        mut,
        token::mint = market.collateral_mint,
        constraint = disputer_token_account.owner == dispute.disputer,
    )]
    pub disputer_token_account: Box<Account<'info, TokenAccount>>,

    pub arbiter: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_settle_dispute(ctx: Context<SettleDispute>, market_id: u64, uphold: bool) -> Result<()> {
    let now = Clock::get()?.slot;
    let market = &mut ctx.accounts.market;
    let dispute = &mut ctx.accounts.dispute;

    let refund = market.settle_dispute(uphold, dispute.proposed_outcome, now)?;
    dispute.settle(uphold, now)?;

    token::withdraw(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.disputer_token_account,
        market,
        refund,
    )?;

    let winning_outcome = market.winning_outcome.ok_or(MarketError::MarketNotResolved)?;
    let dispute_deadline = market.dispute_deadline()?;
    msg!(
        "Dispute round {} on market {} {}",
        dispute.round,
        market_id,
        if uphold { "upheld" } else { "rejected" }
    );
    emit!(DisputeSettled {
        market_id,
        round: dispute.round,
        upheld: uphold,
        winning_outcome,
        dispute_deadline,
    });

    Ok(())
}
