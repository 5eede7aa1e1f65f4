use anchor_lang::prelude::*;

#[error_code]
pub enum MarketError {
    #[msg("Only the program owner can perform this action")]
    OwnerOnly,
    #[msg("Platform already initialized")]
    AlreadyInitialized,
    #[msg("Platform not initialized")]
    NotInitialized,
    #[msg("Oracle list must hold 1-10 unique keys")]
    InvalidOracleList,
    #[msg("Platform is paused")]
    PlatformPaused,
    #[msg("Closing slot must be in the future and before the resolution slot")]
    InvalidTiming,
    #[msg("Oracle is not in the authorized set")]
    InvalidOracle,
    #[msg("Market must have between 2 and 8 outcomes")]
    InvalidOutcomeCount,
    #[msg("Outcome label must be 1-32 bytes")]
    InvalidOutcomeLabel,
    #[msg("Fee exceeds maximum (10%)")]
    InvalidFee,
    #[msg("Description too long (max 256)")]
    DescriptionTooLong,
    #[msg("Category too long (max 32)")]
    CategoryTooLong,
    #[msg("Metadata too long (max 256)")]
    MetadataTooLong,
    #[msg("Market id must be the next sequential id")]
    InvalidMarketId,
    #[msg("Market is not open")]
    MarketNotOpen,
    #[msg("Trading has closed for this market")]
    MarketClosed,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Trade below market minimum")]
    BelowMinTrade,
    #[msg("Invalid outcome index")]
    InvalidOutcome,
    #[msg("Pool has no liquidity")]
    InsufficientLiquidity,
    #[msg("Slippage exceeded")]
    SlippageExceeded,
    #[msg("Trade too small to produce any output")]
    TradeTooSmall,
    #[msg("Insufficient shares")]
    InsufficientShares,
    #[msg("No liquidity position to withdraw")]
    NoLiquidity,
    #[msg("Liquidity is locked until the market is finalized")]
    LiquidityLocked,
    #[msg("Caller is not the market oracle")]
    NotOracle,
    #[msg("Market cannot be resolved before its closing slot")]
    TooEarly,
    #[msg("Market already resolved")]
    AlreadyResolved,
    #[msg("Market is not resolved")]
    MarketNotResolved,
    #[msg("Dispute window closed")]
    DisputeWindowClosed,
    #[msg("Maximum number of dispute rounds reached")]
    DisputeLimitReached,
    #[msg("Proposed outcome equals the current outcome")]
    SameOutcome,
    #[msg("Dispute stake below minimum")]
    InsufficientStake,
    #[msg("Caller is not the dispute arbiter")]
    NotArbiter,
    #[msg("No open dispute on this market")]
    NoActiveDispute,
    #[msg("Market has an unsettled dispute")]
    DisputePending,
    #[msg("Dispute period has not elapsed")]
    DisputePeriodNotElapsed,
    #[msg("Market already finalized")]
    AlreadyFinalized,
    #[msg("Market is not finalized")]
    MarketNotFinalized,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Dispute period must be greater than zero")]
    InvalidDisputePeriod,
    #[msg("Token account mint does not match the collateral mint")]
    InvalidMint,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
