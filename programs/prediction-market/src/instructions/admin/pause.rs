use anchor_lang::prelude::*;
use crate::constants::CONFIG_SEED;
use crate::state::PlatformConfig;
use crate::events::ConfigUpdated;

/// Owner-gated configuration. The owner check happens in the state methods
/// so it reports `OwnerOnly`.
#[derive(Accounts)]
pub struct PlatformAdmin<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, PlatformConfig>,
    pub owner: Signer<'info>,
}

pub(crate) fn emit_config_updated(config: &PlatformConfig) {
    emit!(ConfigUpdated {
        owner: config.owner,
        dispute_period: config.dispute_period,
        min_dispute_stake: config.min_dispute_stake,
        arbiter: config.arbiter,
        paused: config.paused,
    });
}

pub fn process_set_paused(ctx: Context<PlatformAdmin>, paused: bool) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.set_paused(ctx.accounts.owner.key(), paused)?;
    msg!("Platform paused: {}", paused);
    emit_config_updated(config);
    Ok(())
}
