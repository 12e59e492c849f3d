// =============================================================================
// SOULBOUND STATE
// =============================================================================
//
// - RegistryConfig: tunables of the soul registry
// - SoulRegistry: souls and the addresses they own
// - IndexSlot: one item of an enumerable list
// - Feature / Holder: lifecycle and soul index shared by the two registries
// - AttributeRegistry: attribute values set by attribute features
// - TokenRegistry: tokens bound to souls by collection features
// - RewardEngine: compounding rewards on the amount attribute
// - RetroDrop: one-off lamport allocations per soul
//
// Registries are singleton PDAs holding authorities and counters. Every soul,
// address, feature, attribute, binding and checkpoint lives in its own PDA.
// Business rules live on the state types and take the current time explicitly.
// =============================================================================

pub mod config;
pub mod index;
pub mod identity;
pub mod feature;
pub mod attribute;
pub mod token;
pub mod reward;
pub mod drop;

pub use config::*;
pub use index::*;
pub use identity::*;
pub use feature::*;
pub use attribute::*;
pub use token::*;
pub use reward::*;
pub use drop::*;
