use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::feature_program::ProgramFeature;
use crate::instructions::features::announce_status_change;
use crate::state::{Feature, TokenRegistry};

#[derive(Accounts)]
pub struct ManageTokenCollection<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"token_registry"],
        bump = token_registry.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub token_registry: Account<'info, TokenRegistry>,

    /// CHECK: Collection program, queried through CPI on registration
    pub collection: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        space = Feature::SIZE,
        seeds = [b"feature", token_registry.key().as_ref(), collection.key().as_ref()],
        bump,
    )]
    pub collection_record: Account<'info, Feature>,

    pub system_program: Program<'info, System>,
}

/// Remaining accounts are forwarded to the collection's capability check
pub fn register_token_collection<'info>(
    ctx: Context<'_, '_, 'info, 'info, ManageTokenCollection<'info>>,
) -> Result<()> {
    let module = ProgramFeature::new(&ctx.accounts.collection, ctx.remaining_accounts);
    let registry = ctx.accounts.token_registry.key();
    let collection_record = &mut ctx.accounts.collection_record;

    let change = collection_record.register(registry, &module, TokenRegistry::CAPABILITY)?;
    collection_record.bump = ctx.bumps.collection_record;

    announce_status_change(registry, change);
    Ok(())
}

pub fn pause_token_collection(ctx: Context<ManageTokenCollection>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let change = ctx.accounts.collection_record.pause(now)?;

    announce_status_change(ctx.accounts.token_registry.key(), change);
    Ok(())
}

pub fn unpause_token_collection(ctx: Context<ManageTokenCollection>) -> Result<()> {
    let change = ctx.accounts.collection_record.unpause()?;

    announce_status_change(ctx.accounts.token_registry.key(), change);
    Ok(())
}
