use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::MaxAddressesPerSoulUpdated;
use crate::state::RegistryConfig;

#[derive(Accounts)]
pub struct UpdateMaxAddressesPerSoul<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub config: Account<'info, RegistryConfig>,
}

pub fn handler(ctx: Context<UpdateMaxAddressesPerSoul>, max_addresses_per_soul: u32) -> Result<()> {
    let old = ctx
        .accounts
        .config
        .update_max_addresses_per_soul(max_addresses_per_soul)?;

    emit!(MaxAddressesPerSoulUpdated {
        old,
        new: max_addresses_per_soul,
    });

    msg!("Updated max addresses per soul: {} -> {}", old, max_addresses_per_soul);

    Ok(())
}
