use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::AddressAssigned;
use crate::state::{AddressRecord, RegistryConfig, Soul, SoulRegistry};

#[derive(Accounts)]
#[instruction(soul_id: u64, address: Pubkey)]
pub struct AssignAddress<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"soul_registry"],
        bump = soul_registry.bump,
        has_one = authority @ SoulboundError::Unauthorized,
        has_one = config,
    )]
    pub soul_registry: Account<'info, SoulRegistry>,

    /// Source of the addresses-per-soul limit
    pub config: Account<'info, RegistryConfig>,

    /// Reads as an empty soul (and fails the instruction) for unknown ids
    #[account(
        init_if_needed,
        payer = authority,
        space = Soul::SIZE,
        seeds = [b"soul".as_ref(), &soul_id.to_le_bytes()],
        bump,
    )]
    pub soul: Account<'info, Soul>,

    #[account(
        init_if_needed,
        payer = authority,
        space = AddressRecord::SIZE,
        seeds = [b"address", address.as_ref()],
        bump,
    )]
    pub address_record: Account<'info, AddressRecord>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<AssignAddress>, soul_id: u64, address: Pubkey) -> Result<()> {
    let limit = ctx.accounts.config.max_addresses_per_soul;
    let soul = &mut ctx.accounts.soul;
    let address_record = &mut ctx.accounts.address_record;

    soul.assign_address(address_record, address, limit)?;
    address_record.bump = ctx.bumps.address_record;

    emit!(AddressAssigned { soul_id, address });

    msg!(
        "Assigned {} to soul {} ({}/{} addresses)",
        address,
        soul_id,
        soul.active_addresses.len(),
        limit
    );

    Ok(())
}
