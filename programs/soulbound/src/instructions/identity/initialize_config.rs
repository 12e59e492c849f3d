use anchor_lang::prelude::*;
use crate::state::{RegistryConfig, DEFAULT_MAX_ADDRESSES_PER_SOUL};

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = RegistryConfig::SIZE,
        seeds = [b"config"],
        bump,
    )]
    pub config: Account<'info, RegistryConfig>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeConfig>) -> Result<()> {
    let config = &mut ctx.accounts.config;

    config.authority = ctx.accounts.authority.key();
    config.max_addresses_per_soul = DEFAULT_MAX_ADDRESSES_PER_SOUL;
    config.bump = ctx.bumps.config;

    msg!(
        "Initialized registry config (max addresses per soul: {})",
        config.max_addresses_per_soul
    );

    Ok(())
}
