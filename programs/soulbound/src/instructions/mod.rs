pub mod identity;
pub mod features;
pub mod rewards;
pub mod drops;
pub mod set_authority;

pub use identity::*;
pub use features::*;
pub use rewards::*;
pub use drops::*;
pub use set_authority::*;
