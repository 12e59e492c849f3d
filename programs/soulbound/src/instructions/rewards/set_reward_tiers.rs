use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::state::{RewardEngine, RewardTier};

#[derive(Accounts)]
pub struct SetRewardTiers<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"reward_engine"],
        bump = reward_engine.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub reward_engine: Account<'info, RewardEngine>,
}

pub fn handler(ctx: Context<SetRewardTiers>, tiers: Vec<RewardTier>) -> Result<()> {
    let engine = &mut ctx.accounts.reward_engine;
    engine.set_reward_tiers(tiers)?;

    msg!("Replaced reward tiers ({} tiers)", engine.tiers.len());

    Ok(())
}
