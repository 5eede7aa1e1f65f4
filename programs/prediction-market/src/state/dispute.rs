use anchor_lang::prelude::*;
use crate::errors::MarketError;

/// One challenge of a market's resolution.
/// Seeds: ["dispute", market, round]
#[account]
#[derive(InitSpace)]
pub struct DisputeRecord {
    pub market: Pubkey,
    pub disputer: Pubkey,
    pub round: u8,
    pub original_outcome: u8,
    pub proposed_outcome: u8,
    /// Escrowed in the market vault until settlement
    pub stake: u64,
    pub raised_slot: u64,
    pub settled_slot: Option<u64>,
    pub status: DisputeStatus,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum DisputeStatus {
    Open,
    Upheld,
    Rejected,
}

impl DisputeRecord {
    pub fn settle(&mut self, uphold: bool, now: u64) -> Result<()> {
        require!(self.status == DisputeStatus::Open, MarketError::NoActiveDispute);
        self.status = if uphold { DisputeStatus::Upheld } else { DisputeStatus::Rejected };
        self.settled_slot = Some(now);
        Ok(())
    }
}
