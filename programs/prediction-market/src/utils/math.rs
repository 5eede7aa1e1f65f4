use anchor_lang::prelude::*;
use crate::constants::{BPS_DENOMINATOR, FULL_SHARE_BPS};
use crate::errors::MarketError;

/// Scale used to turn reserves into inverse weights for price quotes.
const PRICE_SCALE: u128 = 1_000_000_000_000_000_000_000_000_000_000;

fn ceil_div(numerator: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator / denominator;
    if numerator % denominator == 0 {
        Some(quotient)
    } else {
        quotient.checked_add(1)
    }
}

fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(MarketError::MathOverflow))
}

/// floor(a * b / c)
pub fn mul_div(a: u64, b: u64, c: u64) -> Result<u64> {
    require!(c > 0, MarketError::MathOverflow);
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(MarketError::MathOverflow)?;
    to_u64(product / c as u128)
}

/// Trading fee, rounded up so small trades cannot slip under it.
pub fn fee_for(amount: u64, fee_bps: u16) -> Result<u64> {
    let product = (amount as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(MarketError::MathOverflow)?;
    let fee = ceil_div(product, BPS_DENOMINATOR as u128).ok_or(MarketError::MathOverflow)?;
    to_u64(fee)
}

/// Share of the pool held by `units` out of `total_units`, truncated.
pub fn share_bps(units: u64, total_units: u64) -> u16 {
    if total_units == 0 {
        return 0;
    }
    let bps = (units as u128 * BPS_DENOMINATOR as u128) / total_units as u128;
    bps.min(FULL_SHARE_BPS as u128) as u16
}

/// Share granted for a deposit of `amount` into a pool worth `pool_before`.
/// An empty pool hands the whole pool to the depositor.
pub fn deposit_share_bps(amount: u64, pool_before: u64) -> Result<u16> {
    if pool_before == 0 {
        return Ok(FULL_SHARE_BPS);
    }
    let total = (pool_before as u128)
        .checked_add(amount as u128)
        .ok_or(MarketError::MathOverflow)?;
    let bps = (amount as u128 * BPS_DENOMINATOR as u128) / total;
    Ok(bps as u16)
}

/// Shares received for `net` collateral spent on `outcome`.
///
/// `net` complete sets are minted into the pool, then outcome tokens are
/// withdrawn from `outcome` until the product of all reserves is back at its
/// previous value. With two outcomes this is plain `x * y = k` where the
/// other reserve is the opposite side. The ending reserve is rounded up so
/// the product never shrinks.
pub fn calc_buy_shares(reserves: &[u64], outcome: usize, net: u64) -> Result<u64> {
    require!(net > 0, MarketError::InvalidAmount);
    let start = *reserves.get(outcome).ok_or(MarketError::InvalidOutcome)? as u128;
    require!(reserves.iter().all(|r| *r > 0), MarketError::InsufficientLiquidity);

    let x = net as u128;
    let mut ending = start;
    for (j, reserve) in reserves.iter().enumerate() {
        if j == outcome {
            continue;
        }
        let r = *reserve as u128;
        let grown = r.checked_add(x).ok_or(MarketError::MathOverflow)?;
        let scaled = ending.checked_mul(r).ok_or(MarketError::MathOverflow)?;
        ending = ceil_div(scaled, grown).ok_or(MarketError::MathOverflow)?;
    }

    let shares = start
        .checked_add(x)
        .and_then(|v| v.checked_sub(ending))
        .ok_or(MarketError::MathOverflow)?;
    to_u64(shares)
}

/// Outcome tokens a seller must hand in to take `collateral_out` complete
/// sets out of the pool while keeping the reserve product. `None` when the
/// pool cannot pay that much.
fn shares_required(reserves: &[u64], outcome: usize, collateral_out: u128) -> Option<u128> {
    let start = reserves[outcome] as u128;
    let mut ending = start;
    for (j, reserve) in reserves.iter().enumerate() {
        if j == outcome {
            continue;
        }
        let r = *reserve as u128;
        if collateral_out >= r {
            return None;
        }
        ending = ceil_div(ending.checked_mul(r)?, r - collateral_out)?;
    }
    collateral_out.checked_add(ending)?.checked_sub(start)
}

/// Gross collateral returned for selling `shares` of `outcome`.
///
/// Largest amount whose required shares do not exceed `shares`. The required
/// amount grows monotonically with the payout, so a binary search finds it.
pub fn calc_sell_return(reserves: &[u64], outcome: usize, shares: u64) -> Result<u64> {
    require!(shares > 0, MarketError::InvalidAmount);
    require!(outcome < reserves.len(), MarketError::InvalidOutcome);
    require!(reserves.iter().all(|r| *r > 0), MarketError::InsufficientLiquidity);

    let s = shares as u128;
    let min_other = reserves
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != outcome)
        .map(|(_, r)| *r as u128)
        .min()
        .ok_or(MarketError::InvalidOutcome)?;

    let mut lo: u128 = 0;
    let mut hi: u128 = s.min(min_other - 1);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        match shares_required(reserves, outcome, mid) {
            Some(required) if required <= s => lo = mid,
            _ => hi = mid - 1,
        }
    }
    to_u64(lo)
}

/// Marginal price of `outcome` in basis points: (1/r_i) / sum(1/r_j).
pub fn price_bps(reserves: &[u64], outcome: usize) -> Result<u16> {
    require!(outcome < reserves.len(), MarketError::InvalidOutcome);
    require!(reserves.iter().all(|r| *r > 0), MarketError::InsufficientLiquidity);

    let weights: Vec<u128> = reserves.iter().map(|r| PRICE_SCALE / *r as u128).collect();
    let total = weights
        .iter()
        .try_fold(0u128, |acc, w| acc.checked_add(*w))
        .ok_or(MarketError::MathOverflow)?;
    let price = weights[outcome]
        .checked_mul(BPS_DENOMINATOR as u128)
        .ok_or(MarketError::MathOverflow)?
        / total;
    Ok(price as u16)
}
