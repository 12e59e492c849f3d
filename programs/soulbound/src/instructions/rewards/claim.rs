use anchor_lang::prelude::*;
use crate::events::RewardClaimed;
use crate::instructions::rewards::attribute_or_empty;
use crate::state::{AddressRecord, RewardAccount, RewardEngine};
use crate::utils::pay_out;

// =============================================================================
// CLAIM INSTRUCTION
// =============================================================================
//
// The signer is resolved to its soul through its address record. The reward
// is converted to lamports (one lamport per 1e9 amount units, truncated) and
// paid from the engine account, which must keep its rent-exempt minimum. If
// the payout cannot be made the instruction fails and the checkpoint written
// by `RewardEngine::claim` is discarded with it.
// =============================================================================

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut)]
    pub claimer: Signer<'info>,

    #[account(
        mut,
        seeds = [b"reward_engine"],
        bump = reward_engine.bump,
    )]
    pub reward_engine: Account<'info, RewardEngine>,

    /// Reads as unused (and fails the claim) for addresses that own no soul
    #[account(
        init_if_needed,
        payer = claimer,
        space = AddressRecord::SIZE,
        seeds = [b"address", claimer.key().as_ref()],
        bump,
    )]
    pub address_record: Account<'info, AddressRecord>,

    /// CHECK: Verification attribute of the soul, read as empty when never set
    #[account(
        seeds = [
            b"attribute",
            &address_record.soul_id.to_le_bytes(),
            reward_engine.verification_feature.as_ref(),
        ],
        bump,
    )]
    pub verification_attribute: UncheckedAccount<'info>,

    /// CHECK: Amount attribute of the soul, read as empty when never set
    #[account(
        seeds = [
            b"attribute",
            &address_record.soul_id.to_le_bytes(),
            reward_engine.amount_feature.as_ref(),
        ],
        bump,
    )]
    pub amount_attribute: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = claimer,
        space = RewardAccount::SIZE,
        seeds = [b"reward".as_ref(), &address_record.soul_id.to_le_bytes()],
        bump,
    )]
    pub reward_account: Account<'info, RewardAccount>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Claim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let soul_id = ctx.accounts.address_record.soul_of();
    let verification = attribute_or_empty(&ctx.accounts.verification_attribute)?;
    let amount = attribute_or_empty(&ctx.accounts.amount_attribute)?;

    let payout = ctx.accounts.reward_engine.claim(
        &mut ctx.accounts.reward_account,
        soul_id,
        &verification,
        &amount,
        now,
    )?;
    ctx.accounts.reward_account.bump = ctx.bumps.reward_account;

    let paid = pay_out(
        &ctx.accounts.reward_engine.to_account_info(),
        &ctx.accounts.claimer.to_account_info(),
        payout.lamports.into(),
    )?;

    emit!(RewardClaimed {
        soul_id,
        amount: payout.reward,
        lamports: paid,
    });

    msg!("Soul {} claimed {} lamports", soul_id, paid);

    Ok(())
}
