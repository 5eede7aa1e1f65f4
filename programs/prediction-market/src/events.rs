use anchor_lang::prelude::*;

#[event]
pub struct PlatformInitialized {
    pub owner: Pubkey,
    pub oracles: Vec<Pubkey>,
    pub collateral_mint: Pubkey,
}

#[event]
pub struct ConfigUpdated {
    pub owner: Pubkey,
    pub dispute_period: u64,
    pub min_dispute_stake: u64,
    pub arbiter: Pubkey,
    pub paused: bool,
}

#[event]
pub struct MarketCreated {
    pub market_id: u64,
    pub creator: Pubkey,
    pub oracle: Pubkey,
    pub outcomes: Vec<String>,
    pub closing_slot: u64,
    pub resolution_slot: u64,
    pub fee_bps: u16,
}

#[event]
pub struct LiquidityAdded {
    pub market_id: u64,
    pub provider: Pubkey,
    pub amount: u64,
    pub units: u64,
    pub share_bps: u16,
}

#[event]
pub struct LiquidityRemoved {
    pub market_id: u64,
    pub provider: Pubkey,
    pub units: u64,
    pub collateral_out: u64,
}

#[event]
pub struct SharesBought {
    pub market_id: u64,
    pub trader: Pubkey,
    pub outcome: u8,
    pub amount: u64,
    pub fee: u64,
    pub shares: u64,
    pub price_bps: u16,
}

#[event]
pub struct SharesSold {
    pub market_id: u64,
    pub trader: Pubkey,
    pub outcome: u8,
    pub shares: u64,
    pub fee: u64,
    pub collateral_out: u64,
    pub price_bps: u16,
}

#[event]
pub struct MarketResolved {
    pub market_id: u64,
    pub oracle: Pubkey,
    pub outcome: u8,
    pub resolved_slot: u64,
    pub dispute_deadline: u64,
}

#[event]
pub struct DisputeOpened {
    pub market_id: u64,
    pub disputer: Pubkey,
    pub round: u8,
    pub proposed_outcome: u8,
    pub stake: u64,
}

#[event]
pub struct DisputeSettled {
    pub market_id: u64,
    pub round: u8,
    pub upheld: bool,
    pub winning_outcome: u8,
    pub dispute_deadline: u64,
}

#[event]
pub struct MarketFinalized {
    pub market_id: u64,
    pub winning_outcome: u8,
    pub payout_pool: u64,
    pub lp_residual: u64,
    /// Residual paid to the creator because no liquidity units remained
    pub swept_to_creator: u64,
}

#[event]
pub struct WinningsClaimed {
    pub market_id: u64,
    pub owner: Pubkey,
    pub shares: u64,
    pub payout: u64,
}
