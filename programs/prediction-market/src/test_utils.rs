use anchor_lang::error::Error;
use anchor_lang::prelude::Pubkey;
use crate::errors::MarketError;
use crate::state::platform::blank_config;
use crate::constants::MAX_OUTCOMES;
use crate::state::{CreateMarketParams, PlatformConfig, UserPosition};

pub const OWNER: Pubkey = Pubkey::new_from_array([1; 32]);
pub const ORACLE: Pubkey = Pubkey::new_from_array([2; 32]);
pub const MINT: Pubkey = Pubkey::new_from_array([9; 32]);

pub fn err(code: MarketError) -> Error {
    code.into()
}

pub fn expect_err<T>(result: anchor_lang::Result<T>, code: MarketError) {
    match result {
        Ok(_) => panic!("expected {:?}, call succeeded", err(code)),
        Err(e) => assert_eq!(e, err(code)),
    }
}

pub fn key(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

/// Initialized platform with three oracles, `ORACLE` first.
pub fn sample_config() -> PlatformConfig {
    let mut config = blank_config();
    config
        .initialize(OWNER, Some(OWNER), vec![ORACLE, key(3), key(4)], MINT, 255)
        .unwrap();
    config
}

/// Binary market closing at slot 100, 2% fee, 1000 minimum trade.
pub fn sample_params() -> CreateMarketParams {
    CreateMarketParams {
        description: "Will it rain in Lisbon on new year's day?".to_string(),
        category: "weather".to_string(),
        outcomes: vec!["Yes".to_string(), "No".to_string()],
        resolution_slot: 200,
        closing_slot: 100,
        fee_bps: 200,
        oracle: ORACLE,
        oracle_fee: 0,
        min_trade: 1_000,
        metadata: None,
    }
}

pub fn empty_position() -> UserPosition {
    UserPosition {
        market: Pubkey::default(),
        owner: Pubkey::default(),
        shares: [0; MAX_OUTCOMES],
        claimed: false,
        bump: 0,
    }
}
