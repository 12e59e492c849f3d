pub mod initialize_attribute_registry;
pub mod initialize_token_registry;
pub mod manage_attribute_feature;
pub mod manage_token_collection;
pub mod set_attribute;
pub mod bind_token;

pub use initialize_attribute_registry::*;
pub use initialize_token_registry::*;
pub use manage_attribute_feature::*;
pub use manage_token_collection::*;
pub use set_attribute::*;
pub use bind_token::*;

use anchor_lang::prelude::*;
use crate::events::FeatureStatusChanged;
use crate::state::StatusChange;

/// Emit and log a feature lifecycle transition of `registry`
pub(crate) fn announce_status_change(registry: Pubkey, change: StatusChange) {
    emit!(FeatureStatusChanged {
        registry,
        feature: change.feature,
        old: change.old,
        new: change.new,
    });

    msg!(
        "Feature {} status changed: {:?} -> {:?}",
        change.feature,
        change.old,
        change.new
    );
}
