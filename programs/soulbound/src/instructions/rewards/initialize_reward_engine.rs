use anchor_lang::prelude::*;
use crate::state::{
    default_reward_tiers, validate_reward_tiers, AttributeRegistry, RewardEngine, RewardTier,
    SoulRegistry,
};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeRewardEngineParams {
    /// Attribute feature holding the rewarded amount
    pub amount_feature: Pubkey,
    /// Attribute feature holding the verification flag
    pub verification_feature: Pubkey,
    /// Tier table, the default table when omitted
    pub tiers: Option<Vec<RewardTier>>,
}

#[derive(Accounts)]
pub struct InitializeRewardEngine<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(seeds = [b"soul_registry"], bump = soul_registry.bump)]
    pub soul_registry: Account<'info, SoulRegistry>,

    #[account(
        seeds = [b"attribute_registry"],
        bump = attribute_registry.bump,
        has_one = soul_registry,
    )]
    pub attribute_registry: Account<'info, AttributeRegistry>,

    #[account(
        init,
        payer = authority,
        space = RewardEngine::SIZE,
        seeds = [b"reward_engine"],
        bump,
    )]
    pub reward_engine: Account<'info, RewardEngine>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeRewardEngine>,
    params: InitializeRewardEngineParams,
) -> Result<()> {
    let tiers = params.tiers.unwrap_or_else(default_reward_tiers);
    validate_reward_tiers(&tiers)?;

    let engine = &mut ctx.accounts.reward_engine;

    engine.authority = ctx.accounts.authority.key();
    engine.soul_registry = ctx.accounts.soul_registry.key();
    engine.attribute_registry = ctx.accounts.attribute_registry.key();
    engine.amount_feature = params.amount_feature;
    engine.verification_feature = params.verification_feature;
    engine.paused = false;
    engine.tiers = tiers;
    engine.bump = ctx.bumps.reward_engine;

    msg!(
        "Initialized reward engine (amount: {}, verification: {}, tiers: {})",
        engine.amount_feature,
        engine.verification_feature,
        engine.tiers.len()
    );

    Ok(())
}
