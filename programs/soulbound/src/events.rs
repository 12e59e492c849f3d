use anchor_lang::prelude::*;

use crate::state::{AttributeValue, FeatureStatus};

// === Identity ===

#[event]
pub struct AddressAssigned {
    pub soul_id: u64,
    pub address: Pubkey,
}

#[event]
pub struct AddressRevoked {
    pub soul_id: u64,
    pub address: Pubkey,
}

/// `old` is the zero address for a freshly registered soul
#[event]
pub struct PrimaryAddressChanged {
    pub soul_id: u64,
    pub old: Pubkey,
    pub new: Pubkey,
}

#[event]
pub struct MaxAddressesPerSoulUpdated {
    pub old: u32,
    pub new: u32,
}

// === Features ===

#[event]
pub struct FeatureStatusChanged {
    /// Attribute or token registry account
    pub registry: Pubkey,
    pub feature: Pubkey,
    pub old: FeatureStatus,
    pub new: FeatureStatus,
}

#[event]
pub struct AttributeValueChanged {
    pub soul_id: u64,
    pub feature: Pubkey,
    pub old: AttributeValue,
    pub new: AttributeValue,
}

#[event]
pub struct TokenBound {
    pub soul_id: u64,
    pub collection: Pubkey,
    pub token_id: u64,
}

// === Rewards ===

#[event]
pub struct RewardWithheld {
    pub soul_id: u64,
    pub amount: u128,
}

#[event]
pub struct RewardClaimed {
    pub soul_id: u64,
    /// Reward in 18-decimal units
    pub amount: u128,
    /// Lamports paid out for `amount`
    pub lamports: u64,
}

#[event]
pub struct RewardsFunded {
    pub authority: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardEnginePaused {
    pub authority: Pubkey,
}

#[event]
pub struct RewardEngineUnpaused {
    pub authority: Pubkey,
}

// === Retro Drop ===

#[event]
pub struct DropAllocated {
    pub soul_id: u64,
    pub amount: u64,
}

#[event]
pub struct DropFunded {
    pub authority: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DropClaimed {
    pub soul_id: u64,
    pub amount: u64,
}

// === Ownership ===

#[event]
pub struct AuthorityTransferred {
    /// Account whose authority changed
    pub component: Pubkey,
    pub previous: Pubkey,
    /// Zero address when renounced
    pub new: Pubkey,
}
