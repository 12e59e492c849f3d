use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::RewardWithheld;
use crate::instructions::rewards::attribute_or_empty;
use crate::state::{RewardAccount, RewardEngine, SoulRegistry};

#[derive(Accounts)]
#[instruction(soul_id: u64)]
pub struct WithholdSoulReward<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"reward_engine"],
        bump = reward_engine.bump,
        has_one = authority @ SoulboundError::Unauthorized,
        has_one = soul_registry,
    )]
    pub reward_engine: Account<'info, RewardEngine>,

    pub soul_registry: Account<'info, SoulRegistry>,

    /// CHECK: Amount attribute of the soul, read as empty when never set
    #[account(
        seeds = [b"attribute".as_ref(), &soul_id.to_le_bytes(), reward_engine.amount_feature.as_ref()],
        bump,
    )]
    pub amount_attribute: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        space = RewardAccount::SIZE,
        seeds = [b"reward".as_ref(), &soul_id.to_le_bytes()],
        bump,
    )]
    pub reward_account: Account<'info, RewardAccount>,

    pub system_program: Program<'info, System>,
}

/// Checkpoint a soul's reward without paying it out
pub fn handler(ctx: Context<WithholdSoulReward>, soul_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let amount_attribute = attribute_or_empty(&ctx.accounts.amount_attribute)?;

    let amount = ctx.accounts.reward_engine.withhold(
        &mut ctx.accounts.reward_account,
        &ctx.accounts.soul_registry,
        &amount_attribute,
        soul_id,
        now,
    )?;
    ctx.accounts.reward_account.bump = ctx.bumps.reward_account;

    emit!(RewardWithheld { soul_id, amount });

    msg!("Withheld {} for soul {}", amount, soul_id);

    Ok(())
}
