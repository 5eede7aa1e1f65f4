use anchor_lang::prelude::*;

pub mod constants;
pub mod state;
pub mod instructions;
pub mod errors;
pub mod events;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use instructions::*;
use state::CreateMarketParams;

declare_id!("HpwcEApACw9KMmkFqdpmC7j4SEK44YKtNLDM635TqxU");

#[program]
pub mod prediction_market {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, oracles: Vec<Pubkey>) -> Result<()> {
        instructions::admin::initialize::process_initialize(ctx, oracles)
    }

    pub fn create_market(ctx: Context<CreateMarket>, market_id: u64, params: CreateMarketParams) -> Result<u64> {
        instructions::admin::create_market::process_create_market(ctx, market_id, params)
    }

    pub fn add_liquidity(ctx: Context<AddLiquidity>, market_id: u64, amount: u64) -> Result<u16> {
        instructions::liquidity::add_liquidity::process_add_liquidity(ctx, market_id, amount)
    }

    pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, market_id: u64, share_bps: u16) -> Result<u64> {
        instructions::liquidity::remove_liquidity::process_remove_liquidity(ctx, market_id, share_bps)
    }

    pub fn buy_shares(ctx: Context<BuyShares>, market_id: u64, outcome: u8, amount: u64, min_shares_out: u64) -> Result<u64> {
        instructions::trading::buy_shares::process_buy_shares(ctx, market_id, outcome, amount, min_shares_out)
    }

    pub fn sell_shares(ctx: Context<SellShares>, market_id: u64, outcome: u8, shares: u64, min_out: u64) -> Result<u64> {
        instructions::trading::sell_shares::process_sell_shares(ctx, market_id, outcome, shares, min_out)
    }

    pub fn resolve_market(ctx: Context<ResolveMarket>, market_id: u64, outcome: u8) -> Result<()> {
        instructions::oracle::resolve_market::process_resolve_market(ctx, market_id, outcome)
    }

    pub fn dispute_resolution(ctx: Context<DisputeResolution>, market_id: u64, proposed_outcome: u8, stake: u64) -> Result<()> {
        instructions::dispute::open_dispute::process_dispute_resolution(ctx, market_id, proposed_outcome, stake)
    }

    pub fn settle_dispute(ctx: Context<SettleDispute>, market_id: u64, uphold: bool) -> Result<()> {
        instructions::dispute::settle_dispute::process_settle_dispute(ctx, market_id, uphold)
    }

    pub fn finalize_market(ctx: Context<FinalizeMarket>, market_id: u64) -> Result<()> {
        instructions::settlement::finalize_market::process_finalize_market(ctx, market_id)
    }

    pub fn claim_winnings(ctx: Context<ClaimWinnings>, market_id: u64) -> Result<u64> {
        instructions::settlement::claim_winnings::process_claim_winnings(ctx, market_id)
    }

    pub fn set_default_dispute_period_length(ctx: Context<PlatformAdmin>, slots: u64) -> Result<()> {
        instructions::admin::update_config::process_set_default_dispute_period_length(ctx, slots)
    }

    pub fn set_min_dispute_stake(ctx: Context<PlatformAdmin>, amount: u64) -> Result<()> {
        instructions::admin::update_config::process_set_min_dispute_stake(ctx, amount)
    }

    pub fn set_arbiter(ctx: Context<PlatformAdmin>, arbiter: Pubkey) -> Result<()> {
        instructions::admin::update_config::process_set_arbiter(ctx, arbiter)
    }

    pub fn set_paused(ctx: Context<PlatformAdmin>, paused: bool) -> Result<()> {
        instructions::admin::pause::process_set_paused(ctx, paused)
    }
}
