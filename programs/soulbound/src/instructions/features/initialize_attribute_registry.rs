use anchor_lang::prelude::*;
use crate::state::{AttributeRegistry, SoulRegistry};

#[derive(Accounts)]
pub struct InitializeAttributeRegistry<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(seeds = [b"soul_registry"], bump = soul_registry.bump)]
    pub soul_registry: Account<'info, SoulRegistry>,

    #[account(
        init,
        payer = authority,
        space = AttributeRegistry::SIZE,
        seeds = [b"attribute_registry"],
        bump,
    )]
    pub attribute_registry: Account<'info, AttributeRegistry>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeAttributeRegistry>) -> Result<()> {
    let registry = &mut ctx.accounts.attribute_registry;

    registry.authority = ctx.accounts.authority.key();
    registry.soul_registry = ctx.accounts.soul_registry.key();
    registry.bump = ctx.bumps.attribute_registry;

    msg!("Initialized attribute registry for souls of {}", registry.soul_registry);

    Ok(())
}
