use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::{RewardEnginePaused, RewardEngineUnpaused};
use crate::state::RewardEngine;

#[derive(Accounts)]
pub struct SetPaused<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"reward_engine"],
        bump = reward_engine.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub reward_engine: Account<'info, RewardEngine>,
}

pub fn pause(ctx: Context<SetPaused>) -> Result<()> {
    ctx.accounts.reward_engine.pause()?;

    emit!(RewardEnginePaused {
        authority: ctx.accounts.authority.key(),
    });

    msg!("Reward engine paused");
    Ok(())
}

pub fn unpause(ctx: Context<SetPaused>) -> Result<()> {
    ctx.accounts.reward_engine.unpause()?;

    emit!(RewardEngineUnpaused {
        authority: ctx.accounts.authority.key(),
    });

    msg!("Reward engine unpaused");
    Ok(())
}
