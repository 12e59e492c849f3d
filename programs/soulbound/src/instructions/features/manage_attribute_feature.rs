use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::feature_program::ProgramFeature;
use crate::instructions::features::announce_status_change;
use crate::state::{AttributeRegistry, Feature};

#[derive(Accounts)]
pub struct ManageAttributeFeature<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"attribute_registry"],
        bump = attribute_registry.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub attribute_registry: Account<'info, AttributeRegistry>,

    /// CHECK: Feature program, queried through CPI on registration
    pub feature: UncheckedAccount<'info>,

    /// Lifecycle record, NonExistent until registration
    #[account(
        init_if_needed,
        payer = authority,
        space = Feature::SIZE,
        seeds = [b"feature", attribute_registry.key().as_ref(), feature.key().as_ref()],
        bump,
    )]
    pub feature_record: Account<'info, Feature>,

    pub system_program: Program<'info, System>,
}

/// Remaining accounts are forwarded to the feature's capability check
pub fn register_attribute_feature<'info>(
    ctx: Context<'_, '_, 'info, 'info, ManageAttributeFeature<'info>>,
) -> Result<()> {
    let module = ProgramFeature::new(&ctx.accounts.feature, ctx.remaining_accounts);
    let registry = ctx.accounts.attribute_registry.key();
    let feature_record = &mut ctx.accounts.feature_record;

    let change = feature_record.register(registry, &module, AttributeRegistry::CAPABILITY)?;
    feature_record.bump = ctx.bumps.feature_record;

    announce_status_change(registry, change);
    Ok(())
}

pub fn pause_attribute_feature(ctx: Context<ManageAttributeFeature>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let change = ctx.accounts.feature_record.pause(now)?;

    announce_status_change(ctx.accounts.attribute_registry.key(), change);
    Ok(())
}

pub fn unpause_attribute_feature(ctx: Context<ManageAttributeFeature>) -> Result<()> {
    let change = ctx.accounts.feature_record.unpause()?;

    announce_status_change(ctx.accounts.attribute_registry.key(), change);
    Ok(())
}
