use anchor_lang::prelude::*;
use crate::state::{SoulRegistry, TokenRegistry};

#[derive(Accounts)]
pub struct InitializeTokenRegistry<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(seeds = [b"soul_registry"], bump = soul_registry.bump)]
    pub soul_registry: Account<'info, SoulRegistry>,

    #[account(
        init,
        payer = authority,
        space = TokenRegistry::SIZE,
        seeds = [b"token_registry"],
        bump,
    )]
    pub token_registry: Account<'info, TokenRegistry>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeTokenRegistry>) -> Result<()> {
    let registry = &mut ctx.accounts.token_registry;

    registry.authority = ctx.accounts.authority.key();
    registry.soul_registry = ctx.accounts.soul_registry.key();
    registry.bump = ctx.bumps.token_registry;

    msg!("Initialized token registry for souls of {}", registry.soul_registry);

    Ok(())
}
