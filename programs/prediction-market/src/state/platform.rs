use anchor_lang::prelude::*;
use crate::constants::{DEFAULT_DISPUTE_PERIOD_SLOTS, DEFAULT_MIN_DISPUTE_STAKE, MAX_ORACLES};
use crate::errors::MarketError;

/// Process-wide settings. Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct PlatformConfig {
    pub status: ConfigStatus,
    /// Program upgrade authority at initialization time
    pub owner: Pubkey,
    /// Oracles allowed to be named on new markets
    #[max_len(10)]
    pub oracles: Vec<Pubkey>,
    /// Adjudicates disputes. Starts as the owner; can be handed to a multisig
    /// or a voting program PDA.
    pub arbiter: Pubkey,
    pub collateral_mint: Pubkey,
    /// Dispute window in slots applied to markets resolved from now on
    pub dispute_period: u64,
    pub min_dispute_stake: u64,
    pub market_count: u64,
    pub paused: bool,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum ConfigStatus {
    #[default]
    Uninitialized,
    Initialized,
}

impl PlatformConfig {
    /// One-shot setup. `deployer` is the upgrade authority recorded in the
    /// program's ProgramData account.
    pub fn initialize(
        &mut self,
        caller: Pubkey,
        deployer: Option<Pubkey>,
        oracles: Vec<Pubkey>,
        collateral_mint: Pubkey,
        bump: u8,
    ) -> Result<()> {
        require!(deployer == Some(caller), MarketError::OwnerOnly);
        require!(self.status == ConfigStatus::Uninitialized, MarketError::AlreadyInitialized);
        require!(
            !oracles.is_empty() && oracles.len() <= MAX_ORACLES,
            MarketError::InvalidOracleList
        );
        for (i, oracle) in oracles.iter().enumerate() {
            require!(!oracles[..i].contains(oracle), MarketError::InvalidOracleList);
        }

        self.status = ConfigStatus::Initialized;
        self.owner = caller;
        self.oracles = oracles;
        self.arbiter = caller;
        self.collateral_mint = collateral_mint;
        self.dispute_period = DEFAULT_DISPUTE_PERIOD_SLOTS;
        self.min_dispute_stake = DEFAULT_MIN_DISPUTE_STAKE;
        self.market_count = 0;
        self.paused = false;
        self.bump = bump;
        Ok(())
    }

    pub fn require_initialized(&self) -> Result<()> {
        require!(self.status == ConfigStatus::Initialized, MarketError::NotInitialized);
        Ok(())
    }

    pub fn require_owner(&self, caller: Pubkey) -> Result<()> {
        self.require_initialized()?;
        require_keys_eq!(caller, self.owner, MarketError::OwnerOnly);
        Ok(())
    }

    pub fn require_active(&self) -> Result<()> {
        self.require_initialized()?;
        require!(!self.paused, MarketError::PlatformPaused);
        Ok(())
    }

    pub fn is_oracle(&self, key: &Pubkey) -> bool {
        self.oracles.contains(key)
    }

    pub fn next_market_id(&self) -> Result<u64> {
        self.market_count
            .checked_add(1)
            .ok_or_else(|| error!(MarketError::MathOverflow))
    }

    /// Claims `market_id` as the next sequential id.
    pub fn register_market(&mut self, market_id: u64) -> Result<()> {
        require!(market_id == self.next_market_id()?, MarketError::InvalidMarketId);
        self.market_count = market_id;
        Ok(())
    }

    pub fn set_dispute_period(&mut self, caller: Pubkey, slots: u64) -> Result<()> {
        self.require_owner(caller)?;
        require!(slots > 0, MarketError::InvalidDisputePeriod);
        self.dispute_period = slots;
        Ok(())
    }

    pub fn set_min_dispute_stake(&mut self, caller: Pubkey, amount: u64) -> Result<()> {
        self.require_owner(caller)?;
        self.min_dispute_stake = amount;
        Ok(())
    }

    pub fn set_arbiter(&mut self, caller: Pubkey, arbiter: Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        self.arbiter = arbiter;
        Ok(())
    }

    pub fn set_paused(&mut self, caller: Pubkey, paused: bool) -> Result<()> {
        self.require_owner(caller)?;
        self.paused = paused;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn blank_config() -> PlatformConfig {
    PlatformConfig {
        status: ConfigStatus::Uninitialized,
        owner: Pubkey::default(),
        oracles: Vec::new(),
        arbiter: Pubkey::default(),
        collateral_mint: Pubkey::default(),
        dispute_period: 0,
        min_dispute_stake: 0,
        market_count: 0,
        paused: false,
        bump: 0,
    }
}
