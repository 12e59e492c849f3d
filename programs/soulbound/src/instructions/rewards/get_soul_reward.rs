use anchor_lang::prelude::*;
use crate::instructions::rewards::attribute_or_empty;
use crate::state::{RewardAccount, RewardEngine};
use crate::utils::read_state;

#[derive(Accounts)]
#[instruction(soul_id: u64)]
pub struct GetSoulReward<'info> {
    #[account(seeds = [b"reward_engine"], bump = reward_engine.bump)]
    pub reward_engine: Account<'info, RewardEngine>,

    /// CHECK: Amount attribute of the soul, read as empty when never set
    #[account(
        seeds = [b"attribute", &soul_id.to_le_bytes(), reward_engine.amount_feature.as_ref()],
        bump,
    )]
    pub amount_attribute: UncheckedAccount<'info>,

    /// CHECK: Checkpoint of the soul, read as empty when never written
    #[account(seeds = [b"reward", &soul_id.to_le_bytes()], bump)]
    pub reward_account: UncheckedAccount<'info>,
}

/// Read-only, the reward is returned through return data
pub fn handler(ctx: Context<GetSoulReward>, _soul_id: u64) -> Result<u128> {
    let now = Clock::get()?.unix_timestamp;
    let amount = attribute_or_empty(&ctx.accounts.amount_attribute)?;
    let account = read_state::<RewardAccount>(&ctx.accounts.reward_account)?.unwrap_or_default();

    ctx.accounts.reward_engine.reward(&account, &amount, now)
}
