use anchor_lang::prelude::*;

use crate::errors::SoulboundError;
use crate::state::feature::{Capability, Feature, FeatureModule, Holder};
use crate::state::identity::SoulRegistry;
use crate::state::index::{SlotBytes, SlotItem};

/// A token inside a registered collection
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct CompositeTokenId {
    /// Program id of the collection feature
    pub collection: Pubkey,
    /// Token id inside the collection
    pub token_id: u64,
}

impl CompositeTokenId {
    pub const LEN: usize = 32 + 8;

    pub fn new(collection: Pubkey, token_id: u64) -> Self {
        Self {
            collection,
            token_id,
        }
    }

    /// Fixed-width encoding, collection followed by the big-endian token id
    fn to_bytes(self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        bytes[..32].copy_from_slice(self.collection.as_ref());
        bytes[32..].copy_from_slice(&self.token_id.to_be_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8; Self::LEN]) -> Self {
        let mut collection = [0u8; 32];
        collection.copy_from_slice(&bytes[..32]);
        let mut token_id = [0u8; 8];
        token_id.copy_from_slice(&bytes[32..]);

        Self {
            collection: Pubkey::new_from_array(collection),
            token_id: u64::from_be_bytes(token_id),
        }
    }
}

/// Token holder lists store the full composite id
impl SlotItem for CompositeTokenId {
    fn to_slot(&self) -> SlotBytes {
        self.to_bytes()
    }

    fn from_slot(bytes: &SlotBytes) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Owner of one token, `["token", collection, token_id]`.
/// Bindings are permanent, so a token has at most one soul ever.
#[account]
#[derive(Default)]
pub struct TokenBinding {
    pub collection: Pubkey,
    pub token_id: u64,
    /// Bound soul, 0 while unbound
    pub soul_id: u64,
    /// Slot of the token in the holder list of the soul
    pub soul_position: u32,
    /// PDA bump seed
    pub bump: u8,
}

impl TokenBinding {
    pub const SIZE: usize = 8 + 32 + 8 + 8 + 4 + 1;

    pub fn token(&self) -> CompositeTokenId {
        CompositeTokenId::new(self.collection, self.token_id)
    }

    pub fn is_bound(&self, soul_id: u64) -> bool {
        self.soul_id != 0 && self.soul_id == soul_id
    }

    /// Soul holding the token, if any
    pub fn bound_soul(&self) -> Option<u64> {
        (self.soul_id != 0).then_some(self.soul_id)
    }

    pub fn souls_count(&self) -> u32 {
        u32::from(self.soul_id != 0)
    }
}

#[account]
pub struct TokenRegistry {
    /// Administrator of the collection lifecycle
    pub authority: Pubkey,
    /// Soul registry consulted for soul existence
    pub soul_registry: Pubkey,
    /// PDA bump seed
    pub bump: u8,
}

impl TokenRegistry {
    pub const SIZE: usize = 8 + 32 + 32 + 1;

    pub const CAPABILITY: Capability = Capability::CanValidateBind;

    /// Bind `token_id` of the collection `module` to `soul_id`.
    /// The caller writes the returned id into the holder slot `holder.keys.len - 1`.
    #[allow(clippy::too_many_arguments)]
    pub fn bind_token(
        &self,
        souls: &SoulRegistry,
        collection: &Feature,
        holder: &mut Holder,
        binding: &mut TokenBinding,
        module: &impl FeatureModule,
        caller: &Pubkey,
        soul_id: u64,
        token_id: u64,
    ) -> Result<CompositeTokenId> {
        require!(souls.is_soul(soul_id), SoulboundError::SoulNotFound);
        collection.ensure_available()?;
        module.assert_is_bindable(caller, soul_id, token_id)?;
        require!(binding.bound_soul().is_none(), SoulboundError::AlreadyBound);

        let token = CompositeTokenId::new(module.key(), token_id);

        binding.collection = token.collection;
        binding.token_id = token.token_id;
        binding.soul_id = soul_id;
        binding.soul_position = holder.keys.push()?;

        Ok(token)
    }
}
