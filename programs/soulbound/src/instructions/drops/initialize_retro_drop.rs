use anchor_lang::prelude::*;
use crate::state::{RetroDrop, SoulRegistry};

#[derive(Accounts)]
pub struct InitializeRetroDrop<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(seeds = [b"soul_registry"], bump = soul_registry.bump)]
    pub soul_registry: Account<'info, SoulRegistry>,

    #[account(
        init,
        payer = authority,
        space = RetroDrop::SIZE,
        seeds = [b"retro_drop"],
        bump,
    )]
    pub retro_drop: Account<'info, RetroDrop>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeRetroDrop>, start_time: i64) -> Result<()> {
    let retro_drop = &mut ctx.accounts.retro_drop;

    retro_drop.authority = ctx.accounts.authority.key();
    retro_drop.soul_registry = ctx.accounts.soul_registry.key();
    retro_drop.start_time = start_time;
    retro_drop.bump = ctx.bumps.retro_drop;

    msg!("Initialized retro drop starting at {}", start_time);

    Ok(())
}
