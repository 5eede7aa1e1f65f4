use anchor_lang::prelude::*;
use crate::constants::MAX_OUTCOMES;
use crate::errors::MarketError;

/// Outcome shares held by one owner in one market.
/// Seeds: ["position", market, owner]
#[account]
#[derive(InitSpace)]
pub struct UserPosition {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub shares: [u64; MAX_OUTCOMES],
    pub claimed: bool,
    pub bump: u8,
}

impl UserPosition {
    pub fn bind(&mut self, market: Pubkey, owner: Pubkey, bump: u8) {
        if self.market == Pubkey::default() {
            self.market = market;
            self.owner = owner;
            self.bump = bump;
        }
    }

    pub fn credit(&mut self, index: usize, shares: u64) -> Result<()> {
        let slot = self.shares.get_mut(index).ok_or(MarketError::InvalidOutcome)?;
        *slot = slot.checked_add(shares).ok_or(MarketError::MathOverflow)?;
        Ok(())
    }

    pub fn credit_all(&mut self, shares: &[u64; MAX_OUTCOMES]) -> Result<()> {
        for (index, amount) in shares.iter().enumerate() {
            self.credit(index, *amount)?;
        }
        Ok(())
    }

    pub fn debit(&mut self, index: usize, shares: u64) -> Result<()> {
        let slot = self.shares.get_mut(index).ok_or(MarketError::InvalidOutcome)?;
        *slot = slot.checked_sub(shares).ok_or(MarketError::InsufficientShares)?;
        Ok(())
    }

    /// Empties the position and returns the winning shares it held.
    pub fn take_winning_shares(&mut self, winning_index: usize) -> Result<u64> {
        let shares = self.shares.get(winning_index).copied().unwrap_or(0);
        require!(!self.claimed && shares > 0, MarketError::NothingToClaim);
        self.shares = [0; MAX_OUTCOMES];
        self.claimed = true;
        Ok(shares)
    }
}
