use anchor_lang::prelude::*;
use crate::state::{RegistryConfig, SoulRegistry};

#[derive(Accounts)]
pub struct InitializeSoulRegistry<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, RegistryConfig>,

    #[account(
        init,
        payer = authority,
        space = SoulRegistry::SIZE,
        seeds = [b"soul_registry"],
        bump,
    )]
    pub soul_registry: Account<'info, SoulRegistry>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeSoulRegistry>) -> Result<()> {
    let soul_registry = &mut ctx.accounts.soul_registry;

    soul_registry.authority = ctx.accounts.authority.key();
    soul_registry.config = ctx.accounts.config.key();
    soul_registry.last_soul_id = 0;
    soul_registry.bump = ctx.bumps.soul_registry;

    msg!("Initialized soul registry with config {}", soul_registry.config);

    Ok(())
}
