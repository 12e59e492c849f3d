use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::AttributeValueChanged;
use crate::feature_program::ProgramFeature;
use crate::state::{
    Attribute, AttributeChange, AttributeRegistry, AttributeValue, Feature, Holder, SlotBytes,
    SlotItem, SlotRemoval, SoulRegistry,
};
use crate::utils::{expect_pda, read_slot, read_state, required, store_state, write_slot};

// =============================================================================
// SET ATTRIBUTE INSTRUCTION
// =============================================================================
//
// Open to any signer. Whether the signer may write this value for this soul
// is decided by the feature program (`assert_is_settable`), the registry only
// checks that the soul exists and the feature is active.
//
// The soul <-> feature index is kept in slot accounts. Which slots a call
// touches depends on the transition:
//
//   empty -> value   soul_slot, feature_slot (appended)
//   value -> value   none
//   value -> empty   soul_slot, feature_slot (the holes), plus for each list
//                    whose last item moves: the last slot and the attribute
//                    account of the moved item
// =============================================================================

#[derive(Accounts)]
#[instruction(soul_id: u64)]
pub struct SetAttribute<'info> {
    /// Caller presented to the feature, pays for new accounts
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        seeds = [b"attribute_registry"],
        bump = attribute_registry.bump,
        has_one = soul_registry,
    )]
    pub attribute_registry: Account<'info, AttributeRegistry>,

    #[account(seeds = [b"soul_registry"], bump = soul_registry.bump)]
    pub soul_registry: Account<'info, SoulRegistry>,

    /// CHECK: Must be a registered, active attribute feature
    pub feature: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = caller,
        space = Feature::SIZE,
        seeds = [b"feature", attribute_registry.key().as_ref(), feature.key().as_ref()],
        bump,
    )]
    pub feature_record: Account<'info, Feature>,

    #[account(
        init_if_needed,
        payer = caller,
        space = Holder::SIZE,
        seeds = [b"holder", attribute_registry.key().as_ref(), &soul_id.to_le_bytes()],
        bump,
    )]
    pub holder: Account<'info, Holder>,

    #[account(
        init_if_needed,
        payer = caller,
        space = Attribute::SIZE,
        seeds = [b"attribute".as_ref(), &soul_id.to_le_bytes(), feature.key().as_ref()],
        bump,
    )]
    pub attribute: Account<'info, Attribute>,

    /// CHECK: Holder slot of this attribute, checked in the handler
    #[account(mut)]
    pub soul_slot: Option<UncheckedAccount<'info>>,

    /// CHECK: Last holder slot, checked in the handler
    #[account(mut)]
    pub soul_last_slot: Option<UncheckedAccount<'info>>,

    /// CHECK: Attribute of the soul moved into `soul_slot`, checked in the handler
    #[account(mut)]
    pub soul_moved: Option<UncheckedAccount<'info>>,

    /// CHECK: Feature slot of this soul, checked in the handler
    #[account(mut)]
    pub feature_slot: Option<UncheckedAccount<'info>>,

    /// CHECK: Last feature slot, checked in the handler
    #[account(mut)]
    pub feature_last_slot: Option<UncheckedAccount<'info>>,

    /// CHECK: Attribute of the soul moved into `feature_slot`, checked in the handler
    #[account(mut)]
    pub feature_moved: Option<UncheckedAccount<'info>>,

    pub system_program: Program<'info, System>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetAttribute<'info>>,
    soul_id: u64,
    value: AttributeValue,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let module = ProgramFeature::new(&ctx.accounts.feature, ctx.remaining_accounts);
    let caller = ctx.accounts.caller.key();
    let feature = ctx.accounts.feature.key();

    let (old, change) = ctx.accounts.attribute_registry.set_attribute(
        &ctx.accounts.soul_registry,
        &mut ctx.accounts.feature_record,
        &mut ctx.accounts.holder,
        &mut ctx.accounts.attribute,
        &module,
        &caller,
        soul_id,
        value,
        now,
    )?;

    let holder = &mut ctx.accounts.holder;
    holder.registry = ctx.accounts.attribute_registry.key();
    holder.soul_id = soul_id;
    holder.bump = ctx.bumps.holder;
    ctx.accounts.attribute.bump = ctx.bumps.attribute;

    let holder_key = ctx.accounts.holder.key();
    let feature_key = ctx.accounts.feature_record.key();
    let payer = ctx.accounts.caller.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();

    match change {
        AttributeChange::Inserted {
            soul_position,
            feature_position,
        } => {
            write_slot(
                &required(&ctx.accounts.soul_slot)?,
                &holder_key,
                soul_position,
                feature.to_slot(),
                &payer,
                &system_program,
            )?;
            write_slot(
                &required(&ctx.accounts.feature_slot)?,
                &feature_key,
                feature_position,
                soul_id.to_slot(),
                &payer,
                &system_program,
            )?;
        }
        AttributeChange::Updated => {}
        AttributeChange::Removed { by_soul, by_feature } => {
            if by_soul.moves() {
                let item = fill_slot(
                    &ctx.accounts.soul_slot,
                    &ctx.accounts.soul_last_slot,
                    &holder_key,
                    by_soul,
                    &payer,
                    &system_program,
                )?;
                let moved = Pubkey::from_slot(&item);
                reposition(
                    &required(&ctx.accounts.soul_moved)?,
                    &[b"attribute", &soul_id.to_le_bytes(), moved.as_ref()],
                    |attribute| attribute.soul_position = by_soul.hole,
                )?;
            }
            if by_feature.moves() {
                let item = fill_slot(
                    &ctx.accounts.feature_slot,
                    &ctx.accounts.feature_last_slot,
                    &feature_key,
                    by_feature,
                    &payer,
                    &system_program,
                )?;
                let moved = u64::from_slot(&item);
                reposition(
                    &required(&ctx.accounts.feature_moved)?,
                    &[b"attribute", &moved.to_le_bytes(), feature.as_ref()],
                    |attribute| attribute.feature_position = by_feature.hole,
                )?;
            }
        }
    }

    emit!(AttributeValueChanged {
        soul_id,
        feature,
        old,
        new: value,
    });

    msg!(
        "Set attribute {} of soul {} (attributes held: {})",
        feature,
        soul_id,
        ctx.accounts.holder.keys.len
    );

    Ok(())
}

/// Move the item of the last slot into the hole, returning it
fn fill_slot<'info>(
    hole: &Option<UncheckedAccount<'info>>,
    last: &Option<UncheckedAccount<'info>>,
    owner: &Pubkey,
    removal: SlotRemoval,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<SlotBytes> {
    let item = read_slot(&required(last)?, owner, removal.last)?;
    write_slot(&required(hole)?, owner, removal.hole, item, payer, system_program)?;
    Ok(item)
}

/// Point the attribute whose list item moved at its new slot
fn reposition(
    info: &AccountInfo,
    seeds: &[&[u8]],
    update: impl FnOnce(&mut Attribute),
) -> Result<()> {
    expect_pda(info, seeds)?;
    let mut attribute =
        read_state::<Attribute>(info)?.ok_or(error!(SoulboundError::AccountMismatch))?;

    update(&mut attribute);
    store_state(info, &attribute)
}
