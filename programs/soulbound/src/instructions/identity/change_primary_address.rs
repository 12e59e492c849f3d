use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::PrimaryAddressChanged;
use crate::state::{Soul, SoulRegistry};

#[derive(Accounts)]
#[instruction(soul_id: u64)]
pub struct ChangePrimaryAddress<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"soul_registry"],
        bump = soul_registry.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub soul_registry: Account<'info, SoulRegistry>,

    #[account(
        init_if_needed,
        payer = authority,
        space = Soul::SIZE,
        seeds = [b"soul".as_ref(), &soul_id.to_le_bytes()],
        bump,
    )]
    pub soul: Account<'info, Soul>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ChangePrimaryAddress>, soul_id: u64, address: Pubkey) -> Result<()> {
    let Some(old) = ctx.accounts.soul.change_primary_address(address)? else {
        msg!("{} is already the primary address of soul {}", address, soul_id);
        return Ok(());
    };

    emit!(PrimaryAddressChanged {
        soul_id,
        old,
        new: address,
    });

    msg!("Changed primary address of soul {}: {} -> {}", soul_id, old, address);

    Ok(())
}
