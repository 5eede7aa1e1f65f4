use anchor_lang::prelude::*;
use crate::constants::{BPS_DENOMINATOR, FULL_SHARE_BPS};
use crate::errors::MarketError;
use crate::utils::math;

/// Seeds: ["liquidity", market, provider]
#[account]
#[derive(InitSpace)]
pub struct LiquidityPosition {
    pub market: Pubkey,
    pub provider: Pubkey,
    /// Cumulative collateral deposited
    pub deposited: u64,
    /// Cumulative collateral withdrawn
    pub withdrawn: u64,
    pub units: u64,
    pub bump: u8,
}

impl LiquidityPosition {
    pub fn bind(&mut self, market: Pubkey, provider: Pubkey, bump: u8) {
        if self.market == Pubkey::default() {
            self.market = market;
            self.provider = provider;
            self.bump = bump;
        }
    }

    pub fn record_deposit(&mut self, amount: u64, units: u64) -> Result<()> {
        self.deposited = self.deposited.checked_add(amount).ok_or(MarketError::MathOverflow)?;
        self.units = self.units.checked_add(units).ok_or(MarketError::MathOverflow)?;
        Ok(())
    }

    /// Units to burn for a withdrawal of `share_bps` of this position.
    pub fn units_for(&self, share_bps: u16) -> Result<u64> {
        require!(
            share_bps > 0 && share_bps <= FULL_SHARE_BPS,
            MarketError::InvalidAmount
        );
        require!(self.units > 0, MarketError::NoLiquidity);
        let burn = math::mul_div(self.units, share_bps as u64, BPS_DENOMINATOR)?;
        require!(burn > 0, MarketError::NoLiquidity);
        Ok(burn)
    }

    pub fn record_withdrawal(&mut self, units: u64, amount: u64) -> Result<()> {
        self.units = self.units.checked_sub(units).ok_or(MarketError::NoLiquidity)?;
        self.withdrawn = self.withdrawn.checked_add(amount).ok_or(MarketError::MathOverflow)?;
        Ok(())
    }

    /// Current share of the pool, diluted by every later deposit.
    pub fn share_bps(&self, total_units: u64) -> u16 {
        math::share_bps(self.units, total_units)
    }
}
