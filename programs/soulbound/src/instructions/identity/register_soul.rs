use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::{AddressAssigned, PrimaryAddressChanged};
use crate::state::{AddressRecord, Soul, SoulRegistry};

#[derive(Accounts)]
#[instruction(address: Pubkey)]
pub struct RegisterSoul<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"soul_registry"],
        bump = soul_registry.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub soul_registry: Account<'info, SoulRegistry>,

    /// The soul about to be registered
    #[account(
        init,
        payer = authority,
        space = Soul::SIZE,
        seeds = [b"soul".as_ref(), &soul_registry.last_soul_id.wrapping_add(1).to_le_bytes()],
        bump,
    )]
    pub soul: Account<'info, Soul>,

    /// Created on first use and never closed, so a used address stays used
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

pub fn handler(ctx: Context<RegisterSoul>, address: Pubkey) -> Result<()> {
    let RegisterSoul {
        soul_registry,
        soul,
        address_record,
        ..
    } = ctx.accounts;

    let soul_id = soul_registry.register_soul(soul, address_record, address)?;
    soul.bump = ctx.bumps.soul;
    address_record.bump = ctx.bumps.address_record;

    emit!(AddressAssigned { soul_id, address });
    emit!(PrimaryAddressChanged {
        soul_id,
        old: Pubkey::default(),
        new: address,
    });

    msg!("Registered soul {} with primary address {}", soul_id, address);

    Ok(())
}
