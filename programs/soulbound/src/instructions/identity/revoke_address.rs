use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::AddressRevoked;
use crate::state::{AddressRecord, IndexSlot, SlotItem, Soul, SoulRegistry};

#[derive(Accounts)]
#[instruction(address: Pubkey)]
pub struct RevokeAddress<'info> {
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
        space = AddressRecord::SIZE,
        seeds = [b"address", address.as_ref()],
        bump,
    )]
    pub address_record: Account<'info, AddressRecord>,

    /// Soul owning the address, an empty soul for unknown addresses
    #[account(
        init_if_needed,
        payer = authority,
        space = Soul::SIZE,
        seeds = [b"soul".as_ref(), &address_record.soul_id.to_le_bytes()],
        bump,
    )]
    pub soul: Account<'info, Soul>,

    /// Next entry of the soul's revoked list, which only ever grows
    #[account(
        init,
        payer = authority,
        space = IndexSlot::SIZE,
        seeds = [b"slot", soul.key().as_ref(), &soul.revoked.len.to_le_bytes()],
        bump,
    )]
    pub revoked_slot: Account<'info, IndexSlot>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RevokeAddress>, address: Pubkey) -> Result<()> {
    let soul = &mut ctx.accounts.soul;

    let position = soul.revoke_address(&mut ctx.accounts.address_record)?;
    ctx.accounts.revoked_slot.item = address.to_slot();

    let soul_id = soul.id;
    emit!(AddressRevoked { soul_id, address });

    msg!("Revoked {} from soul {} (revoked #{})", address, soul_id, position);

    Ok(())
}
