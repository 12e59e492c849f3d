use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod feature_program;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::{AttributeValue, RewardTier};

declare_id!("H6GbVbv1E9Gk3mSskEvrb3ZqPmAUR66qURkKDWwqqb1M");

#[program]
pub mod soulbound {
    use super::*;

    // === Registry Config ===

    /// Create the config account, signer becomes its authority
    pub fn initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
        instructions::initialize_config::handler(ctx)
    }

    /// Change how many active addresses a soul may hold
    pub fn update_max_addresses_per_soul(
        ctx: Context<UpdateMaxAddressesPerSoul>,
        max_addresses_per_soul: u32,
    ) -> Result<()> {
        instructions::update_max_addresses::handler(ctx, max_addresses_per_soul)
    }

    // === Soul Registry ===

    pub fn initialize_soul_registry(ctx: Context<InitializeSoulRegistry>) -> Result<()> {
        instructions::initialize_soul_registry::handler(ctx)
    }

    /// Create a soul owning `address` as its primary address
    pub fn register_soul(ctx: Context<RegisterSoul>, address: Pubkey) -> Result<()> {
        instructions::register_soul::handler(ctx, address)
    }

    /// Add a never used address to a soul
    pub fn assign_address(
        ctx: Context<AssignAddress>,
        soul_id: u64,
        address: Pubkey,
    ) -> Result<()> {
        instructions::assign_address::handler(ctx, soul_id, address)
    }

    /// Permanently retire a non-primary address
    pub fn revoke_address(ctx: Context<RevokeAddress>, address: Pubkey) -> Result<()> {
        instructions::revoke_address::handler(ctx, address)
    }

    pub fn change_primary_address(
        ctx: Context<ChangePrimaryAddress>,
        soul_id: u64,
        address: Pubkey,
    ) -> Result<()> {
        instructions::change_primary_address::handler(ctx, soul_id, address)
    }

    // === Attribute Registry ===

    pub fn initialize_attribute_registry(ctx: Context<InitializeAttributeRegistry>) -> Result<()> {
        instructions::initialize_attribute_registry::handler(ctx)
    }

    /// Activate an attribute feature program
    pub fn register_attribute_feature<'info>(
        ctx: Context<'_, '_, 'info, 'info, ManageAttributeFeature<'info>>,
    ) -> Result<()> {
        instructions::manage_attribute_feature::register_attribute_feature(ctx)
    }

    pub fn pause_attribute_feature(ctx: Context<ManageAttributeFeature>) -> Result<()> {
        instructions::manage_attribute_feature::pause_attribute_feature(ctx)
    }

    pub fn unpause_attribute_feature(ctx: Context<ManageAttributeFeature>) -> Result<()> {
        instructions::manage_attribute_feature::unpause_attribute_feature(ctx)
    }

    /// Set a soul's attribute, legality is checked by the feature program
    pub fn set_attribute<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetAttribute<'info>>,
        soul_id: u64,
        value: AttributeValue,
    ) -> Result<()> {
        instructions::set_attribute::handler(ctx, soul_id, value)
    }

    // === Token Registry ===

    pub fn initialize_token_registry(ctx: Context<InitializeTokenRegistry>) -> Result<()> {
        instructions::initialize_token_registry::handler(ctx)
    }

    /// Activate a token collection program
    pub fn register_token_collection<'info>(
        ctx: Context<'_, '_, 'info, 'info, ManageTokenCollection<'info>>,
    ) -> Result<()> {
        instructions::manage_token_collection::register_token_collection(ctx)
    }

    pub fn pause_token_collection(ctx: Context<ManageTokenCollection>) -> Result<()> {
        instructions::manage_token_collection::pause_token_collection(ctx)
    }

    pub fn unpause_token_collection(ctx: Context<ManageTokenCollection>) -> Result<()> {
        instructions::manage_token_collection::unpause_token_collection(ctx)
    }

    /// Permanently bind a token to a soul
    pub fn bind_token<'info>(
        ctx: Context<'_, '_, 'info, 'info, BindToken<'info>>,
        soul_id: u64,
        token_id: u64,
    ) -> Result<()> {
        instructions::bind_token::handler(ctx, soul_id, token_id)
    }

    // === Reward Engine ===

    pub fn initialize_reward_engine(
        ctx: Context<InitializeRewardEngine>,
        params: InitializeRewardEngineParams,
    ) -> Result<()> {
        instructions::initialize_reward_engine::handler(ctx, params)
    }

    pub fn withhold_soul_reward(ctx: Context<WithholdSoulReward>, soul_id: u64) -> Result<()> {
        instructions::withhold_soul_reward::handler(ctx, soul_id)
    }

    /// Pay the signer's soul its reward in lamports
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::handler(ctx)
    }

    pub fn fund(ctx: Context<Fund>, amount: u64) -> Result<()> {
        instructions::fund::handler(ctx, amount)
    }

    pub fn pause(ctx: Context<SetPaused>) -> Result<()> {
        instructions::set_paused::pause(ctx)
    }

    pub fn unpause(ctx: Context<SetPaused>) -> Result<()> {
        instructions::set_paused::unpause(ctx)
    }

    pub fn set_reward_tiers(ctx: Context<SetRewardTiers>, tiers: Vec<RewardTier>) -> Result<()> {
        instructions::set_reward_tiers::handler(ctx, tiers)
    }

    /// Current reward of a soul, returned through return data
    pub fn get_soul_reward(ctx: Context<GetSoulReward>, soul_id: u64) -> Result<u128> {
        instructions::get_soul_reward::handler(ctx, soul_id)
    }

    // === Retro Drop ===

    pub fn initialize_retro_drop(ctx: Context<InitializeRetroDrop>, start_time: i64) -> Result<()> {
        instructions::initialize_retro_drop::handler(ctx, start_time)
    }

    /// Set the lamports a soul may claim from the drop
    pub fn allocate_drop(ctx: Context<AllocateDrop>, soul_id: u64, amount: u64) -> Result<()> {
        instructions::allocate_drop::handler(ctx, soul_id, amount)
    }

    pub fn fund_retro_drop(ctx: Context<FundRetroDrop>, amount: u64) -> Result<()> {
        instructions::fund_retro_drop::handler(ctx, amount)
    }

    /// Pay the signer's soul its drop allocation once the drop has started
    pub fn claim_drop(ctx: Context<ClaimDrop>) -> Result<()> {
        instructions::claim_drop::handler(ctx)
    }

    // === Authority Management ===

    pub fn transfer_config_authority(
        ctx: Context<SetConfigAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::set_authority::transfer_config_authority(ctx, new_authority)
    }

    pub fn renounce_config_authority(ctx: Context<SetConfigAuthority>) -> Result<()> {
        instructions::set_authority::renounce_config_authority(ctx)
    }

    pub fn transfer_soul_registry_authority(
        ctx: Context<SetSoulRegistryAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::set_authority::transfer_soul_registry_authority(ctx, new_authority)
    }

    pub fn renounce_soul_registry_authority(ctx: Context<SetSoulRegistryAuthority>) -> Result<()> {
        instructions::set_authority::renounce_soul_registry_authority(ctx)
    }

    pub fn transfer_attribute_registry_authority(
        ctx: Context<SetAttributeRegistryAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::set_authority::transfer_attribute_registry_authority(ctx, new_authority)
    }

    pub fn renounce_attribute_registry_authority(
        ctx: Context<SetAttributeRegistryAuthority>,
    ) -> Result<()> {
        instructions::set_authority::renounce_attribute_registry_authority(ctx)
    }

    pub fn transfer_token_registry_authority(
        ctx: Context<SetTokenRegistryAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::set_authority::transfer_token_registry_authority(ctx, new_authority)
    }

    pub fn renounce_token_registry_authority(
        ctx: Context<SetTokenRegistryAuthority>,
    ) -> Result<()> {
        instructions::set_authority::renounce_token_registry_authority(ctx)
    }

    pub fn transfer_reward_engine_authority(
        ctx: Context<SetRewardEngineAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::set_authority::transfer_reward_engine_authority(ctx, new_authority)
    }

    pub fn renounce_reward_engine_authority(ctx: Context<SetRewardEngineAuthority>) -> Result<()> {
        instructions::set_authority::renounce_reward_engine_authority(ctx)
    }

    pub fn transfer_retro_drop_authority(
        ctx: Context<SetRetroDropAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::set_authority::transfer_retro_drop_authority(ctx, new_authority)
    }

    pub fn renounce_retro_drop_authority(ctx: Context<SetRetroDropAuthority>) -> Result<()> {
        instructions::set_authority::renounce_retro_drop_authority(ctx)
    }
}
