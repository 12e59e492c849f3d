use anchor_lang::prelude::*;

use crate::errors::SoulboundError;
use crate::state::attribute::AttributeValue;
use crate::state::index::SlotList;

// =============================================================================
// FEATURE REGISTRY - Shared core of the attribute and token registries
// =============================================================================
//
// A feature is an external program that either validates attribute values or
// validates token bindings for souls. The registry owns two things:
//
// 1. The activation lifecycle of every feature, one `Feature` PDA each:
//      NonExistent --register--> Active <--pause/unpause--> Paused
//
// 2. A bidirectional index between soul ids and feature-side keys (feature
//    program ids for attributes, composite token ids for tokens). The soul
//    half lives in `Holder` PDAs, the feature half in `Feature::souls` for
//    attributes and in the token binding itself for tokens. Both halves are
//    slot lists (see `state::index`).
//
// Whether a caller may set a value or bind a token is never decided here, it
// is delegated to the feature itself through `FeatureModule`.
// =============================================================================

/// Lifecycle state of a registered feature
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeatureStatus {
    #[default]
    NonExistent,
    Active,
    Paused,
}

/// Capabilities a feature program can advertise
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Validates `assert_is_settable` calls (attribute features)
    CanValidateSet,
    /// Validates `assert_is_bindable` calls (token collections)
    CanValidateBind,
}

/// Interface every feature module exposes to the registries.
///
/// On chain this is backed by CPI into the feature program (see
/// `crate::feature_program::ProgramFeature`). Rejections are returned as
/// errors and abort the calling instruction.
pub trait FeatureModule {
    /// Feature key, the program id of the module
    fn key(&self) -> Pubkey;

    /// Whether the key points at executable code
    fn is_executable(&self) -> bool;

    fn supports_capability(&self, capability: Capability) -> Result<bool>;

    fn assert_is_settable(
        &self,
        caller: &Pubkey,
        soul_id: u64,
        value: &AttributeValue,
    ) -> Result<()>;

    fn assert_is_bindable(&self, caller: &Pubkey, soul_id: u64, token_id: u64) -> Result<()>;
}

/// Result of a lifecycle transition, mirrored into `FeatureStatusChanged`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusChange {
    pub feature: Pubkey,
    pub old: FeatureStatus,
    pub new: FeatureStatus,
}

/// One feature of one registry, `["feature", registry, feature_key]`
#[account]
#[derive(Default)]
pub struct Feature {
    /// Attribute or token registry the feature belongs to
    pub registry: Pubkey,
    /// Program id of the feature module
    pub key: Pubkey,
    pub status: FeatureStatus,
    /// Non-zero exactly while the feature is paused
    pub paused_at: i64,
    /// Souls holding a value of this feature (attribute features only)
    pub souls: SlotList,
    /// PDA bump seed
    pub bump: u8,
}

impl Feature {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // registry
        32 +                     // key
        1 +                      // status
        8 +                      // paused_at
        SlotList::SIZE +         // souls
        1;                       // bump

    /// NonExistent -> Active, after asking the module for `capability`
    pub fn register(
        &mut self,
        registry: Pubkey,
        module: &impl FeatureModule,
        capability: Capability,
    ) -> Result<StatusChange> {
        require!(
            self.status == FeatureStatus::NonExistent,
            SoulboundError::AlreadyExists
        );
        require!(module.is_executable(), SoulboundError::NotAContract);
        require!(
            module.supports_capability(capability)?,
            SoulboundError::Incompatible
        );

        self.registry = registry;
        self.key = module.key();
        self.status = FeatureStatus::Active;
        self.paused_at = 0;

        Ok(self.change(FeatureStatus::NonExistent))
    }

    /// Active -> Paused
    pub fn pause(&mut self, now: i64) -> Result<StatusChange> {
        require!(self.status == FeatureStatus::Active, SoulboundError::NotActive);

        self.status = FeatureStatus::Paused;
        self.paused_at = now;
        Ok(self.change(FeatureStatus::Active))
    }

    /// Paused -> Active
    pub fn unpause(&mut self) -> Result<StatusChange> {
        require!(self.status == FeatureStatus::Paused, SoulboundError::NotPaused);

        self.status = FeatureStatus::Active;
        self.paused_at = 0;
        Ok(self.change(FeatureStatus::Paused))
    }

    /// Gate for every state-changing call made against a feature
    pub fn ensure_available(&self) -> Result<()> {
        require!(
            self.status == FeatureStatus::Active,
            SoulboundError::FeatureUnavailable
        );
        Ok(())
    }

    fn change(&self, old: FeatureStatus) -> StatusChange {
        StatusChange {
            feature: self.key,
            old,
            new: self.status,
        }
    }
}

/// Feature-side keys held by one soul in one registry,
/// `["holder", registry, soul_id]`. Attribute holders list feature keys,
/// token holders list composite token ids.
#[account]
#[derive(Default)]
pub struct Holder {
    pub registry: Pubkey,
    pub soul_id: u64,
    pub keys: SlotList,
    /// PDA bump seed
    pub bump: u8,
}

impl Holder {
    pub const SIZE: usize = 8 + 32 + 8 + SlotList::SIZE + 1;
}
