use anchor_lang::prelude::*;
use crate::errors::SoulboundError;
use crate::events::AuthorityTransferred;
use crate::state::{
    AttributeRegistry, RegistryConfig, RetroDrop, RewardEngine, SoulRegistry, TokenRegistry,
};

// =============================================================================
// AUTHORITY MANAGEMENT
// =============================================================================
//
// Each administered account has a single authority. Transferring hands it to
// a new key. Renouncing sets the zero address, after which no signer can pass
// the `has_one = authority` checks of that account again.
// =============================================================================

fn hand_over(component: Pubkey, authority: &mut Pubkey, new_authority: Pubkey) {
    let previous = std::mem::replace(authority, new_authority);

    emit!(AuthorityTransferred {
        component,
        previous,
        new: new_authority,
    });

    msg!("Authority of {} changed: {} -> {}", component, previous, new_authority);
}

fn transfer(component: Pubkey, authority: &mut Pubkey, new_authority: Pubkey) -> Result<()> {
    require!(new_authority != Pubkey::default(), SoulboundError::InvalidAuthority);
    hand_over(component, authority, new_authority);
    Ok(())
}

fn renounce(component: Pubkey, authority: &mut Pubkey) -> Result<()> {
    hand_over(component, authority, Pubkey::default());
    Ok(())
}

#[derive(Accounts)]
pub struct SetConfigAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub config: Account<'info, RegistryConfig>,
}

pub fn transfer_config_authority(
    ctx: Context<SetConfigAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    transfer(config.key(), &mut config.authority, new_authority)
}

pub fn renounce_config_authority(ctx: Context<SetConfigAuthority>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    renounce(config.key(), &mut config.authority)
}

#[derive(Accounts)]
pub struct SetSoulRegistryAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"soul_registry"],
        bump = soul_registry.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub soul_registry: Account<'info, SoulRegistry>,
}

pub fn transfer_soul_registry_authority(
    ctx: Context<SetSoulRegistryAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let registry = &mut ctx.accounts.soul_registry;
    transfer(registry.key(), &mut registry.authority, new_authority)
}

pub fn renounce_soul_registry_authority(ctx: Context<SetSoulRegistryAuthority>) -> Result<()> {
    let registry = &mut ctx.accounts.soul_registry;
    renounce(registry.key(), &mut registry.authority)
}

#[derive(Accounts)]
pub struct SetAttributeRegistryAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"attribute_registry"],
        bump = attribute_registry.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub attribute_registry: Account<'info, AttributeRegistry>,
}

pub fn transfer_attribute_registry_authority(
    ctx: Context<SetAttributeRegistryAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let registry = &mut ctx.accounts.attribute_registry;
    transfer(registry.key(), &mut registry.authority, new_authority)
}

pub fn renounce_attribute_registry_authority(
    ctx: Context<SetAttributeRegistryAuthority>,
) -> Result<()> {
    let registry = &mut ctx.accounts.attribute_registry;
    renounce(registry.key(), &mut registry.authority)
}

#[derive(Accounts)]
pub struct SetTokenRegistryAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"token_registry"],
        bump = token_registry.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub token_registry: Account<'info, TokenRegistry>,
}

pub fn transfer_token_registry_authority(
    ctx: Context<SetTokenRegistryAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let registry = &mut ctx.accounts.token_registry;
    transfer(registry.key(), &mut registry.authority, new_authority)
}

pub fn renounce_token_registry_authority(ctx: Context<SetTokenRegistryAuthority>) -> Result<()> {
    let registry = &mut ctx.accounts.token_registry;
    renounce(registry.key(), &mut registry.authority)
}

#[derive(Accounts)]
pub struct SetRewardEngineAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"reward_engine"],
        bump = reward_engine.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub reward_engine: Account<'info, RewardEngine>,
}

pub fn transfer_reward_engine_authority(
    ctx: Context<SetRewardEngineAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let engine = &mut ctx.accounts.reward_engine;
    transfer(engine.key(), &mut engine.authority, new_authority)
}

pub fn renounce_reward_engine_authority(ctx: Context<SetRewardEngineAuthority>) -> Result<()> {
    let engine = &mut ctx.accounts.reward_engine;
    renounce(engine.key(), &mut engine.authority)
}

#[derive(Accounts)]
pub struct SetRetroDropAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"retro_drop"],
        bump = retro_drop.bump,
        has_one = authority @ SoulboundError::Unauthorized,
    )]
    pub retro_drop: Account<'info, RetroDrop>,
}

pub fn transfer_retro_drop_authority(
    ctx: Context<SetRetroDropAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let retro_drop = &mut ctx.accounts.retro_drop;
    transfer(retro_drop.key(), &mut retro_drop.authority, new_authority)
}

pub fn renounce_retro_drop_authority(ctx: Context<SetRetroDropAuthority>) -> Result<()> {
    let retro_drop = &mut ctx.accounts.retro_drop;
    renounce(retro_drop.key(), &mut retro_drop.authority)
}
