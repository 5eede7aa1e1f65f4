use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::MarketError;
use crate::state::{PlatformConfig, UserPosition};
use crate::utils::math;

/// Seeds: ["market", market_id.to_le_bytes()]
///
/// Reserves and outstanding shares are indexed by outcome; only the first
/// `outcomes.len()` slots are used. For every outcome `j` the program keeps
/// `reserves[j] + outstanding_shares[j] <= collateral`, which is what lets
/// each winning share redeem 1:1 at settlement.
#[account]
#[derive(InitSpace)]
pub struct Market {
    pub market_id: u64,
    pub creator: Pubkey,
    #[max_len(256)]
    pub description: String,
    #[max_len(32)]
    pub category: String,
    #[max_len(8, 32)]
    pub outcomes: Vec<String>,
    #[max_len(256)]
    pub metadata: Option<String>,
    pub oracle: Pubkey,
    pub oracle_fee: u64,
    pub fee_bps: u16,
    pub min_trade: u64,
    pub collateral_mint: Pubkey,
    pub created_slot: u64,
    /// No trades at or after this slot
    pub closing_slot: u64,
    /// Slot the question is expected to be decided by
    pub resolution_slot: u64,
    pub status: MarketStatus,
    pub winning_outcome: Option<u8>,
    pub resolved_slot: Option<u64>,
    /// Snapshot of the platform dispute period taken at resolution
    pub dispute_period: u64,
    pub dispute_rounds: u8,

    // AMM
    pub reserves: [u64; MAX_OUTCOMES],
    pub outstanding_shares: [u64; MAX_OUTCOMES],
    pub collateral: u64,
    pub total_lp_units: u64,

    // Settlement, filled at finalization
    pub payout_pool: u64,
    pub winning_shares_remaining: u64,
    pub lp_residual: u64,

    // Vault escrow outside the pool
    /// Oracle fee deposited by the creator, zeroed once paid on resolution
    pub escrowed_fee: u64,
    /// Stake of the dispute currently awaiting a ruling
    pub escrowed_stake: u64,

    pub bump: u8,
    pub vault_bump: u8,
}

/// Stored lifecycle. `Closed` is never stored, see [`Market::phase`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum MarketStatus {
    Open,
    Resolved,
    Disputed,
    Finalized,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MarketPhase {
    Open,
    Closed,
    Resolved,
    Disputed,
    Finalized,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct CreateMarketParams {
    pub description: String,
    pub category: String,
    pub outcomes: Vec<String>,
    pub resolution_slot: u64,
    pub closing_slot: u64,
    pub fee_bps: u16,
    pub oracle: Pubkey,
    pub oracle_fee: u64,
    pub min_trade: u64,
    pub metadata: Option<String>,
}

impl CreateMarketParams {
    pub fn validate(&self, config: &PlatformConfig, now: u64) -> Result<()> {
        require!(
            self.closing_slot > now && self.closing_slot < self.resolution_slot,
            MarketError::InvalidTiming
        );
        require!(config.is_oracle(&self.oracle), MarketError::InvalidOracle);
        require!(
            (MIN_OUTCOMES..=MAX_OUTCOMES).contains(&self.outcomes.len()),
            MarketError::InvalidOutcomeCount
        );
        require!(
            self.outcomes
                .iter()
                .all(|label| !label.is_empty() && label.len() <= MAX_OUTCOME_LABEL_LEN),
            MarketError::InvalidOutcomeLabel
        );
        require!(self.fee_bps <= MAX_FEE_BPS, MarketError::InvalidFee);
        require!(self.description.len() <= MAX_DESCRIPTION_LEN, MarketError::DescriptionTooLong);
        require!(self.category.len() <= MAX_CATEGORY_LEN, MarketError::CategoryTooLong);
        if let Some(metadata) = &self.metadata {
            require!(metadata.len() <= MAX_METADATA_LEN, MarketError::MetadataTooLong);
        }
        Ok(())
    }
}

/// Result of a liquidity deposit.
#[derive(Debug)]
pub struct Deposit {
    pub units: u64,
    pub share_bps: u16,
    /// Outcome shares that did not fit the pool's ratios, owed to the provider
    pub unmatched: [u64; MAX_OUTCOMES],
}

/// Result of burning LP units.
#[derive(Debug)]
pub struct Withdrawal {
    pub collateral_out: u64,
    pub unmatched: [u64; MAX_OUTCOMES],
}

/// Result of a trade against the pool.
#[derive(Debug, PartialEq, Eq)]
pub struct Fill {
    pub shares: u64,
    /// Collateral paid in (buy) or out (sell), fee included on buys
    pub collateral: u64,
    pub fee: u64,
}

/// Result of a winnings claim.
#[derive(Debug, PartialEq, Eq)]
pub struct Claim {
    pub shares: u64,
    pub payout: u64,
}

impl Market {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        params: CreateMarketParams,
        config: &PlatformConfig,
        market_id: u64,
        creator: Pubkey,
        now: u64,
        bump: u8,
        vault_bump: u8,
    ) -> Result<Self> {
        params.validate(config, now)?;
        Ok(Self {
            market_id,
            creator,
            description: params.description,
            category: params.category,
            outcomes: params.outcomes,
            metadata: params.metadata,
            oracle: params.oracle,
            oracle_fee: params.oracle_fee,
            fee_bps: params.fee_bps,
            min_trade: params.min_trade,
            collateral_mint: config.collateral_mint,
            created_slot: now,
            closing_slot: params.closing_slot,
            resolution_slot: params.resolution_slot,
            status: MarketStatus::Open,
            winning_outcome: None,
            resolved_slot: None,
            dispute_period: 0,
            dispute_rounds: 0,
            reserves: [0; MAX_OUTCOMES],
            outstanding_shares: [0; MAX_OUTCOMES],
            collateral: 0,
            total_lp_units: 0,
            payout_pool: 0,
            winning_shares_remaining: 0,
            lp_residual: 0,
            escrowed_fee: params.oracle_fee,
            escrowed_stake: 0,
            bump,
            vault_bump,
        })
    }

    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn active_reserves(&self) -> &[u64] {
        &self.reserves[..self.outcome_count()]
    }

    pub fn outcome_index(&self, outcome: u8) -> Result<usize> {
        let index = outcome as usize;
        require!(index < self.outcome_count(), MarketError::InvalidOutcome);
        Ok(index)
    }

    pub fn phase(&self, now: u64) -> MarketPhase {
        match self.status {
            MarketStatus::Open if now >= self.closing_slot => MarketPhase::Closed,
            MarketStatus::Open => MarketPhase::Open,
            MarketStatus::Resolved => MarketPhase::Resolved,
            MarketStatus::Disputed => MarketPhase::Disputed,
            MarketStatus::Finalized => MarketPhase::Finalized,
        }
    }

    /// Largest reserve; LP units are priced against it.
    pub fn pool_weight(&self) -> u64 {
        self.active_reserves().iter().copied().max().unwrap_or(0)
    }

    pub fn price_bps(&self, outcome: u8) -> Result<u16> {
        let index = self.outcome_index(outcome)?;
        math::price_bps(self.active_reserves(), index)
    }

    pub fn dispute_deadline(&self) -> Result<u64> {
        let resolved = self.resolved_slot.ok_or(MarketError::MarketNotResolved)?;
        Ok(resolved.saturating_add(self.dispute_period))
    }

    pub fn winning_index(&self) -> Result<usize> {
        let outcome = self.winning_outcome.ok_or(MarketError::MarketNotResolved)?;
        self.outcome_index(outcome)
    }

    fn add_to_all_reserves(&mut self, amount: u64) -> Result<()> {
        for reserve in self.reserves[..self.outcomes.len()].iter_mut() {
            *reserve = reserve.checked_add(amount).ok_or(MarketError::MathOverflow)?;
        }
        Ok(())
    }

    fn credit_outstanding(&mut self, index: usize, shares: u64) -> Result<()> {
        self.outstanding_shares[index] = self.outstanding_shares[index]
            .checked_add(shares)
            .ok_or(MarketError::MathOverflow)?;
        Ok(())
    }

    pub fn add_liquidity(&mut self, amount: u64, now: u64) -> Result<Deposit> {
        require!(self.phase(now) == MarketPhase::Open, MarketError::MarketNotOpen);
        require!(amount > 0, MarketError::InvalidAmount);

        let mut unmatched = [0u64; MAX_OUTCOMES];
        let (units, share_bps) = if self.total_lp_units == 0 {
            // Fresh pool: equal reserves, every outcome starts at parity
            self.add_to_all_reserves(amount)?;
            (amount, FULL_SHARE_BPS)
        } else {
            let weight = self.pool_weight();
            require!(weight > 0, MarketError::InsufficientLiquidity);
            let units = math::mul_div(amount, self.total_lp_units, weight)?;
            require!(units > 0, MarketError::InvalidAmount);

            for j in 0..self.outcome_count() {
                let added = math::mul_div(amount, self.reserves[j], weight)?;
                self.reserves[j] = self.reserves[j]
                    .checked_add(added)
                    .ok_or(MarketError::MathOverflow)?;
                unmatched[j] = amount - added;
                self.credit_outstanding(j, unmatched[j])?;
            }
            (units, math::deposit_share_bps(amount, weight)?)
        };

        self.total_lp_units = self.total_lp_units
            .checked_add(units)
            .ok_or(MarketError::MathOverflow)?;
        self.collateral = self.collateral
            .checked_add(amount)
            .ok_or(MarketError::MathOverflow)?;

        Ok(Deposit { units, share_bps, unmatched })
    }

    /// Burns `units` LP units. While trading is open the provider takes a
    /// slice of every reserve: complete sets come back as collateral and the
    /// rest as outcome shares. After finalization the units redeem against the
    /// settled residual.
    pub fn remove_liquidity(&mut self, units: u64, now: u64) -> Result<Withdrawal> {
        require!(
            units > 0 && units <= self.total_lp_units,
            MarketError::NoLiquidity
        );
        let total = self.total_lp_units;

        let withdrawal = match self.phase(now) {
            MarketPhase::Open => {
                let n = self.outcome_count();
                let mut taken = [0u64; MAX_OUTCOMES];
                for j in 0..n {
                    taken[j] = math::mul_div(self.reserves[j], units, total)?;
                }
                let sets = taken[..n].iter().copied().min().unwrap_or(0);

                let mut unmatched = [0u64; MAX_OUTCOMES];
                for j in 0..n {
                    self.reserves[j] -= taken[j];
                    unmatched[j] = taken[j] - sets;
                    self.credit_outstanding(j, unmatched[j])?;
                }
                self.collateral = self.collateral
                    .checked_sub(sets)
                    .ok_or(MarketError::MathOverflow)?;
                Withdrawal { collateral_out: sets, unmatched }
            }
            MarketPhase::Finalized => {
                let out = math::mul_div(self.lp_residual, units, total)?;
                self.lp_residual -= out;
                Withdrawal { collateral_out: out, unmatched: [0; MAX_OUTCOMES] }
            }
            _ => return err!(MarketError::LiquidityLocked),
        };

        self.total_lp_units = total - units;
        Ok(withdrawal)
    }

    pub fn buy(&mut self, outcome: u8, amount: u64, now: u64) -> Result<Fill> {
        require!(self.phase(now) == MarketPhase::Open, MarketError::MarketClosed);
        require!(amount >= self.min_trade, MarketError::BelowMinTrade);
        let index = self.outcome_index(outcome)?;

        let fee = math::fee_for(amount, self.fee_bps)?;
        let net = amount.checked_sub(fee).ok_or(MarketError::MathOverflow)?;
        require!(net > 0, MarketError::BelowMinTrade);

        let shares = math::calc_buy_shares(self.active_reserves(), index, net)?;
        require!(shares > 0, MarketError::TradeTooSmall);

        // Mint `net` complete sets into the pool, hand `shares` of the chosen
        // outcome to the buyer, keep the fee as extra complete sets.
        self.add_to_all_reserves(net)?;
        self.reserves[index] -= shares;
        self.add_to_all_reserves(fee)?;
        self.credit_outstanding(index, shares)?;
        self.collateral = self.collateral
            .checked_add(amount)
            .ok_or(MarketError::MathOverflow)?;

        Ok(Fill { shares, collateral: amount, fee })
    }

    pub fn sell(&mut self, outcome: u8, shares: u64, now: u64) -> Result<Fill> {
        require!(self.phase(now) == MarketPhase::Open, MarketError::MarketClosed);
        let index = self.outcome_index(outcome)?;
        require!(shares > 0, MarketError::InvalidAmount);
        require!(
            self.outstanding_shares[index] >= shares,
            MarketError::InsufficientShares
        );

        let gross = math::calc_sell_return(self.active_reserves(), index, shares)?;
        let fee = math::fee_for(gross, self.fee_bps)?;
        let payout = gross.checked_sub(fee).ok_or(MarketError::MathOverflow)?;
        require!(payout > 0, MarketError::TradeTooSmall);

        // Shares go back into the pool, `gross` complete sets are burned and
        // the fee portion of them stays behind as liquidity.
        self.reserves[index] = self.reserves[index]
            .checked_add(shares)
            .ok_or(MarketError::MathOverflow)?;
        for reserve in self.reserves[..self.outcomes.len()].iter_mut() {
            *reserve = reserve
                .checked_sub(payout)
                .ok_or(MarketError::MathOverflow)?;
        }
        self.outstanding_shares[index] -= shares;
        self.collateral = self.collateral
            .checked_sub(payout)
            .ok_or(MarketError::MathOverflow)?;

        Ok(Fill { shares, collateral: payout, fee })
    }

    /// Sells out of `position`. A trader without a position holds no shares.
    pub fn sell_from(
        &mut self,
        position: Option<&mut UserPosition>,
        outcome: u8,
        shares: u64,
        now: u64,
    ) -> Result<Fill> {
        require!(self.phase(now) == MarketPhase::Open, MarketError::MarketClosed);
        let index = self.outcome_index(outcome)?;
        require!(shares > 0, MarketError::InvalidAmount);
        let position = position.ok_or(MarketError::InsufficientShares)?;
        position.debit(index, shares)?;
        self.sell(outcome, shares, now)
    }

    /// Records the oracle's answer. Returns the escrowed oracle fee now owed
    /// to the oracle.
    pub fn resolve(&mut self, caller: Pubkey, outcome: u8, now: u64, dispute_period: u64) -> Result<u64> {
        require_keys_eq!(caller, self.oracle, MarketError::NotOracle);
        require!(self.status == MarketStatus::Open, MarketError::AlreadyResolved);
        require!(now >= self.closing_slot, MarketError::TooEarly);
        self.outcome_index(outcome)?;

        self.status = MarketStatus::Resolved;
        self.winning_outcome = Some(outcome);
        self.resolved_slot = Some(now);
        self.dispute_period = dispute_period;
        Ok(std::mem::take(&mut self.escrowed_fee))
    }

    /// Moves the market into `Disputed`. Returns the dispute round index.
    pub fn open_dispute(&mut self, proposed: u8, stake: u64, min_stake: u64, now: u64) -> Result<u8> {
        require!(self.status == MarketStatus::Resolved, MarketError::MarketNotResolved);
        require!(now <= self.dispute_deadline()?, MarketError::DisputeWindowClosed);
        require!(self.dispute_rounds < MAX_DISPUTE_ROUNDS, MarketError::DisputeLimitReached);
        self.outcome_index(proposed)?;
        require!(self.winning_outcome != Some(proposed), MarketError::SameOutcome);
        require!(stake > 0 && stake >= min_stake, MarketError::InsufficientStake);

        let round = self.dispute_rounds;
        self.dispute_rounds += 1;
        self.escrowed_stake = stake;
        self.status = MarketStatus::Disputed;
        Ok(round)
    }

    /// Applies the arbiter's ruling and restarts the dispute window.
    /// A rejected dispute forfeits its stake to the pool. Returns the stake
    /// to refund to the disputer.
    pub fn settle_dispute(&mut self, uphold: bool, proposed: u8, now: u64) -> Result<u64> {
        require!(self.status == MarketStatus::Disputed, MarketError::NoActiveDispute);
        self.outcome_index(proposed)?;

        let stake = std::mem::take(&mut self.escrowed_stake);
        let refund = if uphold {
            self.winning_outcome = Some(proposed);
            stake
        } else {
            self.collateral = self.collateral
                .checked_add(stake)
                .ok_or(MarketError::MathOverflow)?;
            0
        };
        self.status = MarketStatus::Resolved;
        self.resolved_slot = Some(now);
        Ok(refund)
    }

    /// Locks the outcome and splits pooled collateral between winners and LPs.
    /// With no LP units left the residual cannot be withdrawn, so it is
    /// returned for payment to the creator.
    pub fn finalize(&mut self, now: u64) -> Result<u64> {
        match self.status {
            MarketStatus::Finalized => return err!(MarketError::AlreadyFinalized),
            MarketStatus::Disputed => return err!(MarketError::DisputePending),
            MarketStatus::Open => return err!(MarketError::MarketNotResolved),
            MarketStatus::Resolved => {}
        }
        require!(now >= self.dispute_deadline()?, MarketError::DisputePeriodNotElapsed);

        let winner = self.winning_index()?;
        let winning_supply = self.outstanding_shares[winner];
        self.payout_pool = winning_supply.min(self.collateral);
        self.lp_residual = self.collateral - self.payout_pool;
        self.winning_shares_remaining = winning_supply;
        self.collateral = 0;
        self.status = MarketStatus::Finalized;

        if self.total_lp_units == 0 {
            return Ok(std::mem::take(&mut self.lp_residual));
        }
        Ok(0)
    }

    /// Pays out `shares` of the winning outcome from the payout pool.
    pub fn redeem(&mut self, shares: u64) -> Result<u64> {
        require!(self.status == MarketStatus::Finalized, MarketError::MarketNotFinalized);
        require!(shares > 0, MarketError::NothingToClaim);

        let payout = math::mul_div(shares, self.payout_pool, self.winning_shares_remaining)?;
        self.payout_pool = self.payout_pool
            .checked_sub(payout)
            .ok_or(MarketError::MathOverflow)?;
        self.winning_shares_remaining = self.winning_shares_remaining
            .checked_sub(shares)
            .ok_or(MarketError::MathOverflow)?;
        Ok(payout)
    }

    /// Redeems the winning shares held in `position`.
    pub fn claim(&mut self, position: Option<&mut UserPosition>) -> Result<Claim> {
        require!(self.status == MarketStatus::Finalized, MarketError::MarketNotFinalized);
        let winner = self.winning_index()?;
        let position = position.ok_or(MarketError::NothingToClaim)?;
        let shares = position.take_winning_shares(winner)?;
        let payout = self.redeem(shares)?;
        Ok(Claim { shares, payout })
    }

    /// Collateral the vault must hold for this market.
    pub fn vault_liabilities(&self) -> Result<u64> {
        [self.collateral, self.payout_pool, self.lp_residual, self.escrowed_fee, self.escrowed_stake]
            .iter()
            .try_fold(0u64, |acc, v| acc.checked_add(*v))
            .ok_or_else(|| error!(MarketError::MathOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{empty_position, expect_err, key, sample_config, sample_params, ORACLE};

    const CLOSE: u64 = 100;
    const PERIOD: u64 = 50;

    fn open_market() -> Market {
        Market::new(sample_params(), &sample_config(), 1, key(20), 10, 254, 253).unwrap()
    }

    fn funded_market(amount: u64) -> Market {
        let mut market = open_market();
        market.add_liquidity(amount, 10).unwrap();
        market
    }

    fn assert_solvent(market: &Market) {
        for j in 0..market.outcome_count() {
            assert!(
                market.reserves[j] as u128 + market.outstanding_shares[j] as u128
                    <= market.collateral as u128,
                "outcome {} is not fully backed",
                j
            );
        }
    }

    #[test]
    fn test_create_validation() {
        let config = sample_config();
        let create = |params: CreateMarketParams| Market::new(params, &config, 1, key(20), 10, 0, 0);

        let mut p = sample_params();
        p.closing_slot = 300;
        p.resolution_slot = 300;
        expect_err(create(p), MarketError::InvalidTiming);

        let mut p = sample_params();
        p.closing_slot = 10;
        expect_err(create(p), MarketError::InvalidTiming);

        let mut p = sample_params();
        p.oracle = key(99);
        expect_err(create(p), MarketError::InvalidOracle);

        let mut p = sample_params();
        p.outcomes = vec!["Yes".to_string()];
        expect_err(create(p), MarketError::InvalidOutcomeCount);

        let mut p = sample_params();
        p.outcomes = (0..9).map(|i| i.to_string()).collect();
        expect_err(create(p), MarketError::InvalidOutcomeCount);

        let mut p = sample_params();
        p.outcomes = vec!["Yes".to_string(), String::new()];
        expect_err(create(p), MarketError::InvalidOutcomeLabel);

        let mut p = sample_params();
        p.fee_bps = MAX_FEE_BPS + 1;
        expect_err(create(p), MarketError::InvalidFee);

        let mut p = sample_params();
        p.metadata = Some("x".repeat(MAX_METADATA_LEN + 1));
        expect_err(create(p), MarketError::MetadataTooLong);

        let market = create(sample_params()).unwrap();
        assert_eq!(market.status, MarketStatus::Open);
        assert_eq!(market.active_reserves(), &[0, 0]);
    }

    #[test]
    fn test_closed_is_derived_from_slot() {
        let market = open_market();
        assert_eq!(market.phase(CLOSE - 1), MarketPhase::Open);
        assert_eq!(market.phase(CLOSE), MarketPhase::Closed);
        assert_eq!(market.status, MarketStatus::Open);
    }

    #[test]
    fn test_first_deposit_owns_pool() {
        let mut market = open_market();
        let deposit = market.add_liquidity(50_000_000, 10).unwrap();
        assert_eq!(deposit.share_bps, 10_000);
        assert_eq!(deposit.units, 50_000_000);
        assert_eq!(market.active_reserves(), &[50_000_000, 50_000_000]);
        assert_solvent(&market);
    }

    #[test]
    fn test_deposit_keeps_prices() {
        let mut market = funded_market(1_000_000);
        market.buy(0, 200_000, 20).unwrap();
        let price_before = market.price_bps(0).unwrap();

        let deposit = market.add_liquidity(500_000, 30).unwrap();
        let price_after = market.price_bps(0).unwrap();
        assert!(price_before.abs_diff(price_after) <= 1);
        // the cheaper side could not be matched fully and is owed to the provider
        assert_eq!(deposit.unmatched[1], 0);
        assert!(deposit.unmatched[0] > 0);
        assert_solvent(&market);
    }

    #[test]
    fn test_deposit_rejected_outside_open() {
        let mut market = funded_market(1_000);
        expect_err(market.add_liquidity(0, 20), MarketError::InvalidAmount);
        expect_err(market.add_liquidity(1_000, CLOSE), MarketError::MarketNotOpen);
    }

    #[test]
    fn test_buy_before_and_after_close() {
        let mut market = funded_market(100_000_000);
        let fill = market.buy(0, 10_000_000, CLOSE - 1).unwrap();
        assert!(fill.shares > 0);
        assert_eq!(fill.fee, 200_000);
        assert_eq!(market.outstanding_shares[0], fill.shares);
        assert!(market.price_bps(0).unwrap() > 5_000);
        assert_solvent(&market);

        expect_err(market.buy(0, 10_000_000, CLOSE), MarketError::MarketClosed);
        expect_err(market.buy(0, 10_000_000, CLOSE + 500), MarketError::MarketClosed);
    }

    #[test]
    fn test_buy_validation() {
        let mut market = funded_market(100_000_000);
        expect_err(market.buy(0, 999, 20), MarketError::BelowMinTrade);
        expect_err(market.buy(2, 10_000, 20), MarketError::InvalidOutcome);

        let mut empty = open_market();
        expect_err(empty.buy(0, 10_000, 20), MarketError::InsufficientLiquidity);
    }

    #[test]
    fn test_sell_returns_collateral() {
        let mut market = funded_market(100_000_000);
        let bought = market.buy(1, 10_000_000, 20).unwrap();
        let sold = market.sell(1, bought.shares, 21).unwrap();
        assert!(sold.collateral < 10_000_000);
        assert!(sold.collateral > 9_000_000);
        assert_eq!(market.outstanding_shares[1], 0);
        assert_solvent(&market);

        expect_err(market.sell(1, 1, 22), MarketError::InsufficientShares);
        expect_err(market.sell(1, 1, CLOSE), MarketError::MarketClosed);
    }

    #[test]
    fn test_trading_stays_solvent() {
        let mut market = Market::new(
            CreateMarketParams {
                outcomes: vec!["A".into(), "B".into(), "C".into()],
                ..sample_params()
            },
            &sample_config(),
            1,
            key(20),
            10,
            0,
            0,
        )
        .unwrap();
        market.add_liquidity(3_000_000, 10).unwrap();

        let mut held = [0u64; 3];
        for (i, amount) in [250_000u64, 1_000, 75_000, 400_000, 33_333].iter().enumerate() {
            let outcome = (i % 3) as u8;
            held[outcome as usize] += market.buy(outcome, *amount, 20).unwrap().shares;
            assert_solvent(&market);
        }
        market.sell(0, held[0] / 2, 30).unwrap();
        assert_solvent(&market);
        market.add_liquidity(1_234_567, 31).unwrap();
        assert_solvent(&market);
        market.remove_liquidity(market.total_lp_units / 3, 32).unwrap();
        assert_solvent(&market);
    }

    #[test]
    fn test_resolve_rules() {
        let mut market = funded_market(1_000);
        expect_err(market.resolve(key(99), 0, CLOSE, PERIOD), MarketError::NotOracle);
        expect_err(market.resolve(ORACLE, 0, CLOSE - 1, PERIOD), MarketError::TooEarly);
        expect_err(market.resolve(ORACLE, 5, CLOSE, PERIOD), MarketError::InvalidOutcome);

        market.resolve(ORACLE, 1, CLOSE, PERIOD).unwrap();
        assert_eq!(market.phase(CLOSE), MarketPhase::Resolved);
        assert_eq!(market.winning_outcome, Some(1));
        assert_eq!(market.dispute_deadline().unwrap(), CLOSE + PERIOD);

        expect_err(market.resolve(ORACLE, 0, CLOSE + 1, PERIOD), MarketError::AlreadyResolved);
        expect_err(market.resolve(key(99), 0, CLOSE + 1, PERIOD), MarketError::NotOracle);
    }

    #[test]
    fn test_dispute_window_boundary() {
        let mut market = funded_market(1_000);
        expect_err(market.open_dispute(0, 10, 10, 20), MarketError::MarketNotResolved);
        market.resolve(ORACLE, 1, CLOSE, PERIOD).unwrap();

        let mut late = market.clone();
        expect_err(
            late.open_dispute(0, 10, 10, CLOSE + PERIOD + 1),
            MarketError::DisputeWindowClosed,
        );
        expect_err(market.open_dispute(1, 10, 10, CLOSE + 1), MarketError::SameOutcome);
        expect_err(market.open_dispute(0, 9, 10, CLOSE + 1), MarketError::InsufficientStake);
        expect_err(market.open_dispute(0, 0, 0, CLOSE + 1), MarketError::InsufficientStake);

        assert_eq!(market.open_dispute(0, 10, 10, CLOSE + PERIOD).unwrap(), 0);
        assert_eq!(market.status, MarketStatus::Disputed);
        expect_err(market.open_dispute(0, 10, 10, CLOSE + PERIOD), MarketError::MarketNotResolved);
    }

    #[test]
    fn test_settled_dispute_reopens_window() {
        let mut market = funded_market(1_000);
        market.resolve(ORACLE, 1, CLOSE, PERIOD).unwrap();
        market.open_dispute(0, 10, 10, CLOSE + 5).unwrap();
        expect_err(market.finalize(CLOSE + PERIOD), MarketError::DisputePending);

        market.settle_dispute(true, 0, CLOSE + 20).unwrap();
        assert_eq!(market.winning_outcome, Some(0));
        assert_eq!(market.dispute_deadline().unwrap(), CLOSE + 20 + PERIOD);
        expect_err(market.settle_dispute(true, 0, CLOSE + 21), MarketError::NoActiveDispute);

        let collateral = market.collateral;
        market.open_dispute(1, 10, 10, CLOSE + 30).unwrap();
        market.settle_dispute(false, 1, CLOSE + 31).unwrap();
        assert_eq!(market.winning_outcome, Some(0));
        assert_eq!(market.collateral, collateral + 10);

        market.open_dispute(1, 10, 10, CLOSE + 40).unwrap();
        market.settle_dispute(false, 1, CLOSE + 41).unwrap();
        expect_err(market.open_dispute(1, 10, 10, CLOSE + 42), MarketError::DisputeLimitReached);
    }

    #[test]
    fn test_finalize_rules() {
        let mut market = funded_market(1_000);
        expect_err(market.finalize(CLOSE), MarketError::MarketNotResolved);
        market.resolve(ORACLE, 0, CLOSE, PERIOD).unwrap();
        expect_err(market.finalize(CLOSE + PERIOD - 1), MarketError::DisputePeriodNotElapsed);

        market.finalize(CLOSE + PERIOD).unwrap();
        assert_eq!(market.phase(CLOSE + PERIOD), MarketPhase::Finalized);
        expect_err(market.finalize(CLOSE + PERIOD + 1), MarketError::AlreadyFinalized);
        expect_err(market.open_dispute(1, 10, 10, CLOSE + 1), MarketError::MarketNotResolved);
        assert_eq!(market.winning_outcome, Some(0));
    }

    #[test]
    fn test_settlement_pays_winners_one_to_one() {
        let mut market = funded_market(100_000_000);
        let yes = market.buy(0, 10_000_000, 20).unwrap().shares;
        let no = market.buy(1, 4_000_000, 21).unwrap().shares;
        assert!(no > 0);
        market.resolve(ORACLE, 0, CLOSE, PERIOD).unwrap();
        expect_err(market.redeem(yes), MarketError::MarketNotFinalized);
        market.finalize(CLOSE + PERIOD).unwrap();

        assert_eq!(market.payout_pool, yes);
        assert_eq!(market.lp_residual, 114_000_000 - yes);

        let first = market.redeem(yes / 3).unwrap();
        assert_eq!(first, yes / 3);
        let rest = market.redeem(yes - yes / 3).unwrap();
        assert_eq!(first + rest, yes);
        assert_eq!(market.payout_pool, 0);
        expect_err(market.redeem(0), MarketError::NothingToClaim);

        let withdrawal = market.remove_liquidity(market.total_lp_units, CLOSE + PERIOD).unwrap();
        assert_eq!(withdrawal.collateral_out, 114_000_000 - yes);
        assert_eq!(market.lp_residual, 0);
    }

    #[test]
    fn test_liquidity_locked_between_close_and_finalize() {
        let mut market = funded_market(1_000);
        expect_err(market.remove_liquidity(10, CLOSE), MarketError::LiquidityLocked);
        market.resolve(ORACLE, 0, CLOSE, PERIOD).unwrap();
        expect_err(market.remove_liquidity(10, CLOSE + 1), MarketError::LiquidityLocked);
        market.open_dispute(1, 10, 10, CLOSE + 1).unwrap();
        expect_err(market.remove_liquidity(10, CLOSE + 2), MarketError::LiquidityLocked);
        expect_err(market.remove_liquidity(5_000, CLOSE + 2), MarketError::NoLiquidity);
    }

    #[test]
    fn test_full_exit_while_open_returns_deposit() {
        let mut market = funded_market(1_000_000);
        let withdrawal = market.remove_liquidity(1_000_000, 20).unwrap();
        assert_eq!(withdrawal.collateral_out, 1_000_000);
        assert_eq!(withdrawal.unmatched, [0; MAX_OUTCOMES]);
        assert_eq!(market.active_reserves(), &[0, 0]);
        assert_eq!(market.total_lp_units, 0);
        assert_eq!(market.collateral, 0);
    }

    #[test]
    fn test_sell_without_position() {
        let mut market = funded_market(100_000_000);
        let mut holder = empty_position();
        let shares = market.buy(0, 1_000_000, 20).unwrap().shares;
        holder.credit(0, shares).unwrap();

        expect_err(market.sell_from(None, 0, 1, CLOSE), MarketError::MarketClosed);
        expect_err(market.sell_from(None, 0, 0, 21), MarketError::InvalidAmount);
        expect_err(market.sell_from(None, 0, 1, 21), MarketError::InsufficientShares);
        let mut stranger = empty_position();
        expect_err(
            market.sell_from(Some(&mut stranger), 0, 1, 21),
            MarketError::InsufficientShares,
        );
        assert_eq!(market.outstanding_shares[0], shares);

        let fill = market.sell_from(Some(&mut holder), 0, shares, 21).unwrap();
        assert!(fill.collateral > 0);
        assert_eq!(holder.shares[0], 0);
        assert_eq!(market.outstanding_shares[0], 0);
    }

    #[test]
    fn test_claim_without_position() {
        let mut market = funded_market(100_000_000);
        let mut winner = empty_position();
        winner.credit(0, market.buy(0, 1_000_000, 20).unwrap().shares).unwrap();
        market.resolve(ORACLE, 0, CLOSE, PERIOD).unwrap();

        expect_err(market.claim(None), MarketError::MarketNotFinalized);
        expect_err(market.claim(Some(&mut winner)), MarketError::MarketNotFinalized);
        market.finalize(CLOSE + PERIOD).unwrap();

        expect_err(market.claim(None), MarketError::NothingToClaim);
        let mut loser = empty_position();
        loser.credit(1, 500).unwrap();
        expect_err(market.claim(Some(&mut loser)), MarketError::NothingToClaim);

        let shares = winner.shares[0];
        let claim = market.claim(Some(&mut winner)).unwrap();
        assert_eq!(claim, Claim { shares, payout: shares });
        expect_err(market.claim(Some(&mut winner)), MarketError::NothingToClaim);
    }

    #[test]
    fn test_vault_covers_fee_and_stakes() {
        let params = CreateMarketParams { oracle_fee: 5_000, ..sample_params() };
        let mut market = Market::new(params, &sample_config(), 1, key(20), 10, 0, 0).unwrap();
        // creator escrow
        let mut vault = 5_000u64;
        assert_eq!(market.vault_liabilities().unwrap(), vault);

        market.add_liquidity(1_000_000, 10).unwrap();
        vault += 1_000_000;
        let fill = market.buy(0, 100_000, 20).unwrap();
        vault += fill.collateral;
        assert_eq!(market.vault_liabilities().unwrap(), vault);

        let fee = market.resolve(ORACLE, 1, CLOSE, PERIOD).unwrap();
        assert_eq!(fee, 5_000);
        vault -= fee;
        assert_eq!(market.escrowed_fee, 0);
        assert_eq!(market.vault_liabilities().unwrap(), vault);

        market.open_dispute(0, 700, 500, CLOSE + 1).unwrap();
        vault += 700;
        assert_eq!(market.escrowed_stake, 700);
        assert_eq!(market.vault_liabilities().unwrap(), vault);
        let refund = market.settle_dispute(true, 0, CLOSE + 2).unwrap();
        assert_eq!(refund, 700);
        vault -= refund;
        assert_eq!(market.vault_liabilities().unwrap(), vault);

        market.open_dispute(1, 900, 500, CLOSE + 3).unwrap();
        vault += 900;
        assert_eq!(market.settle_dispute(false, 1, CLOSE + 4).unwrap(), 0);
        assert_eq!(market.escrowed_stake, 0);
        assert_eq!(market.vault_liabilities().unwrap(), vault);

        assert_eq!(market.finalize(CLOSE + 4 + PERIOD).unwrap(), 0);
        assert_eq!(market.vault_liabilities().unwrap(), vault);
        vault -= market.redeem(fill.shares).unwrap();
        vault -= market
            .remove_liquidity(market.total_lp_units, CLOSE + 200)
            .unwrap()
            .collateral_out;
        assert_eq!(vault, 0);
        assert_eq!(market.vault_liabilities().unwrap(), 0);
    }

    #[test]
    fn test_residual_without_providers_goes_to_creator() {
        let mut market = funded_market(1_000_000);
        market.remove_liquidity(1_000_000, 20).unwrap();
        market.resolve(ORACLE, 0, CLOSE, PERIOD).unwrap();
        market.open_dispute(1, 400, 400, CLOSE + 1).unwrap();
        market.settle_dispute(false, 1, CLOSE + 2).unwrap();

        assert_eq!(market.finalize(CLOSE + 2 + PERIOD).unwrap(), 400);
        assert_eq!(market.lp_residual, 0);
        assert_eq!(market.vault_liabilities().unwrap(), 0);
    }
}
