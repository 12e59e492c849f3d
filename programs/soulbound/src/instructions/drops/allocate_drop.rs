use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::DropAllocated;
use crate::state::{DropAllocation, RetroDrop, SoulRegistry};

#[derive(Accounts)]
#[instruction(soul_id: u64)]
pub struct AllocateDrop<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"retro_drop"],
        bump = retro_drop.bump,
        has_one = authority @ SoulboundError::Unauthorized,
        has_one = soul_registry,
    )]
    pub retro_drop: Account<'info, RetroDrop>,

    pub soul_registry: Account<'info, SoulRegistry>,

    #[account(
        init_if_needed,
        payer = authority,
        space = DropAllocation::SIZE,
        seeds = [b"drop".as_ref(), &soul_id.to_le_bytes()],
        bump,
    )]
    pub allocation: Account<'info, DropAllocation>,

    pub system_program: Program<'info, System>,
}

/// Set the lamports `soul_id` may claim, replacing any unclaimed allocation
pub fn handler(ctx: Context<AllocateDrop>, soul_id: u64, amount: u64) -> Result<()> {
    let previous = ctx.accounts.retro_drop.allocate(
        &mut ctx.accounts.allocation,
        &ctx.accounts.soul_registry,
        soul_id,
        amount,
    )?;
    ctx.accounts.allocation.bump = ctx.bumps.allocation;

    emit!(DropAllocated { soul_id, amount });

    msg!("Allocated {} lamports to soul {} (was {})", amount, soul_id, previous);

    Ok(())
}
