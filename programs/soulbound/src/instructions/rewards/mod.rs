pub mod initialize_reward_engine;
pub mod withhold_soul_reward;
pub mod claim;
pub mod fund;
pub mod set_paused;
pub mod set_reward_tiers;
pub mod get_soul_reward;

pub use initialize_reward_engine::*;
pub use withhold_soul_reward::*;
pub use claim::*;
pub use fund::*;
pub use set_paused::*;
pub use set_reward_tiers::*;
pub use get_soul_reward::*;

use anchor_lang::prelude::*;
use crate::state::Attribute;
use crate::utils::read_state;

/// Attribute stored at `info`, the empty attribute when it was never set
pub(crate) fn attribute_or_empty(info: &AccountInfo) -> Result<Attribute> {
    Ok(read_state(info)?.unwrap_or_default())
}
