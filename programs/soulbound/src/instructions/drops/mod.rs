pub mod initialize_retro_drop;
pub mod allocate_drop;
pub mod fund_retro_drop;
pub mod claim_drop;

pub use initialize_retro_drop::*;
pub use allocate_drop::*;
pub use fund_retro_drop::*;
pub use claim_drop::*;
