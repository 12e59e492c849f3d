use anchor_lang::prelude::*;
use crate::events::DropClaimed;
use crate::state::{AddressRecord, DropAllocation, RetroDrop};
use crate::utils::pay_out;

#[derive(Accounts)]
pub struct ClaimDrop<'info> {
    #[account(mut)]
    pub claimer: Signer<'info>,

    #[account(mut, seeds = [b"retro_drop"], bump = retro_drop.bump)]
    pub retro_drop: Account<'info, RetroDrop>,

    /// Reads as unused (and fails the claim) for addresses that own no soul
    #[account(
        init_if_needed,
        payer = claimer,
        space = AddressRecord::SIZE,
        seeds = [b"address", claimer.key().as_ref()],
        bump,
    )]
    pub address_record: Account<'info, AddressRecord>,

    #[account(
        init_if_needed,
        payer = claimer,
        space = DropAllocation::SIZE,
        seeds = [b"drop".as_ref(), &address_record.soul_id.to_le_bytes()],
        bump,
    )]
    pub allocation: Account<'info, DropAllocation>,

    pub system_program: Program<'info, System>,
}

/// Pay the signer's soul its allocation, once
pub fn handler(ctx: Context<ClaimDrop>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let soul_id = ctx.accounts.address_record.soul_of();

    let amount = ctx
        .accounts
        .retro_drop
        .claim(&mut ctx.accounts.allocation, soul_id, now)?;
    ctx.accounts.allocation.bump = ctx.bumps.allocation;

    let paid = pay_out(
        &ctx.accounts.retro_drop.to_account_info(),
        &ctx.accounts.claimer.to_account_info(),
        amount.into(),
    )?;

    emit!(DropClaimed {
        soul_id,
        amount: paid,
    });

    msg!("Soul {} claimed {} lamports from the retro drop", soul_id, paid);

    Ok(())
}
