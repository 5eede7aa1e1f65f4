use anchor_lang::prelude::*;
use super::pause::{emit_config_updated, PlatformAdmin};

/// Applies to markets resolved after this call; resolved markets keep
/// the window they snapshotted.
pub fn process_set_default_dispute_period_length(ctx: Context<PlatformAdmin>, slots: u64) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.set_dispute_period(ctx.accounts.owner.key(), slots)?;
    emit_config_updated(config);
    Ok(())
}

pub fn process_set_min_dispute_stake(ctx: Context<PlatformAdmin>, amount: u64) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.set_min_dispute_stake(ctx.accounts.owner.key(), amount)?;
    emit_config_updated(config);
    Ok(())
}

pub fn process_set_arbiter(ctx: Context<PlatformAdmin>, arbiter: Pubkey) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.set_arbiter(ctx.accounts.owner.key(), arbiter)?;
    msg!("Arbiter set to {}", arbiter);
    emit_config_updated(config);
    Ok(())
}
