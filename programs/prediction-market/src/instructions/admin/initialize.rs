use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use crate::constants::CONFIG_SEED;
use crate::state::PlatformConfig;
use crate::events::PlatformInitialized;

#[derive(Accounts)]
pub struct Initialize<'info> {
    // init_if_needed so a repeated call reaches the AlreadyInitialized check
    #[account(
        init_if_needed,
        seeds = [CONFIG_SEED],
        bump,
        payer = owner,
        space = 8 + PlatformConfig::INIT_SPACE
    )]
    pub config: Account<'info, PlatformConfig>,

    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(constraint = program.programdata_address()? == Some(program_data.key()))]
    pub program: Program<'info, crate::program::PredictionMarket>,

    pub program_data: Account<'info, ProgramData>,

    pub collateral_mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn process_initialize(ctx: Context<Initialize>, oracles: Vec<Pubkey>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.initialize(
        ctx.accounts.owner.key(),
        ctx.accounts.program_data.upgrade_authority_address,
        oracles,
        ctx.accounts.collateral_mint.key(),
        ctx.bumps.config,
    )?;

    msg!("Platform initialized with {} oracles", config.oracles.len());
    emit!(PlatformInitialized {
        owner: config.owner,
        oracles: config.oracles.clone(),
        collateral_mint: config.collateral_mint,
    });

    Ok(())
}
