pub const CONFIG_SEED: &[u8] = b"config";
pub const MARKET_SEED: &[u8] = b"market";
pub const VAULT_SEED: &[u8] = b"vault";
pub const LIQUIDITY_SEED: &[u8] = b"liquidity";
pub const POSITION_SEED: &[u8] = b"position";
pub const DISPUTE_SEED: &[u8] = b"dispute";

/// 100% expressed in basis points.
pub const BPS_DENOMINATOR: u64 = 10_000;
pub const FULL_SHARE_BPS: u16 = 10_000;

/// Trading fee ceiling (10%).
pub const MAX_FEE_BPS: u16 = 1_000;

pub const MIN_OUTCOMES: usize = 2;
pub const MAX_OUTCOMES: usize = 8;
pub const MAX_ORACLES: usize = 10;

pub const MAX_DESCRIPTION_LEN: usize = 256;
pub const MAX_CATEGORY_LEN: usize = 32;
pub const MAX_OUTCOME_LABEL_LEN: usize = 32;
pub const MAX_METADATA_LEN: usize = 256;

/// Roughly one day of slots at 400ms.
pub const DEFAULT_DISPUTE_PERIOD_SLOTS: u64 = 216_000;
pub const DEFAULT_MIN_DISPUTE_STAKE: u64 = 1_000_000;
pub const MAX_DISPUTE_ROUNDS: u8 = 3;
