pub mod initialize_config;
pub mod update_max_addresses;
pub mod initialize_soul_registry;
pub mod register_soul;
pub mod assign_address;
pub mod revoke_address;
pub mod change_primary_address;

pub use initialize_config::*;
pub use update_max_addresses::*;
pub use initialize_soul_registry::*;
pub use register_soul::*;
pub use assign_address::*;
pub use revoke_address::*;
pub use change_primary_address::*;
