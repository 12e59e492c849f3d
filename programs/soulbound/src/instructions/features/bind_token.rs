use anchor_lang::prelude::*;
use crate::events::TokenBound;
use crate::feature_program::ProgramFeature;
use crate::state::{Feature, Holder, IndexSlot, SlotItem, SoulRegistry, TokenBinding, TokenRegistry};

#[derive(Accounts)]
#[instruction(soul_id: u64, token_id: u64)]
pub struct BindToken<'info> {
    /// Caller presented to the collection, pays for new accounts
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        seeds = [b"token_registry"],
        bump = token_registry.bump,
        has_one = soul_registry,
    )]
    pub token_registry: Account<'info, TokenRegistry>,

    #[account(seeds = [b"soul_registry"], bump = soul_registry.bump)]
    pub soul_registry: Account<'info, SoulRegistry>,

    /// CHECK: Must be a registered, active token collection
    pub collection: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = caller,
        space = Feature::SIZE,
        seeds = [b"feature", token_registry.key().as_ref(), collection.key().as_ref()],
        bump,
    )]
    pub collection_record: Account<'info, Feature>,

    #[account(
        init_if_needed,
        payer = caller,
        space = Holder::SIZE,
        seeds = [b"holder", token_registry.key().as_ref(), &soul_id.to_le_bytes()],
        bump,
    )]
    pub holder: Account<'info, Holder>,

    #[account(
        init_if_needed,
        payer = caller,
        space = TokenBinding::SIZE,
        seeds = [b"token", collection.key().as_ref(), &token_id.to_be_bytes()],
        bump,
    )]
    pub binding: Account<'info, TokenBinding>,

    /// Next entry of the soul's token list, which only ever grows
    #[account(
        init,
        payer = caller,
        space = IndexSlot::SIZE,
        seeds = [b"slot", holder.key().as_ref(), &holder.keys.len.to_le_bytes()],
        bump,
    )]
    pub holder_slot: Account<'info, IndexSlot>,

    pub system_program: Program<'info, System>,
}

/// Bindings are permanent, there is no unbind
pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, BindToken<'info>>,
    soul_id: u64,
    token_id: u64,
) -> Result<()> {
    let module = ProgramFeature::new(&ctx.accounts.collection, ctx.remaining_accounts);
    let caller = ctx.accounts.caller.key();

    let token = ctx.accounts.token_registry.bind_token(
        &ctx.accounts.soul_registry,
        &ctx.accounts.collection_record,
        &mut ctx.accounts.holder,
        &mut ctx.accounts.binding,
        &module,
        &caller,
        soul_id,
        token_id,
    )?;

    let holder = &mut ctx.accounts.holder;
    holder.registry = ctx.accounts.token_registry.key();
    holder.soul_id = soul_id;
    holder.bump = ctx.bumps.holder;
    ctx.accounts.binding.bump = ctx.bumps.binding;
    ctx.accounts.holder_slot.item = token.to_slot();

    emit!(TokenBound {
        soul_id,
        collection: token.collection,
        token_id: token.token_id,
    });

    msg!(
        "Bound token {} of collection {} to soul {}",
        token.token_id,
        token.collection,
        soul_id
    );

    Ok(())
}
