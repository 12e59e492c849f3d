use anchor_lang::prelude::*;

use crate::errors::SoulboundError;

/// Addresses a soul may hold when the config is created
pub const DEFAULT_MAX_ADDRESSES_PER_SOUL: u32 = 5;

/// Upper bound accepted for the addresses-per-soul limit
pub const MAX_ADDRESSES_PER_SOUL_CAP: u32 = 64;

/// Tunables of the soul registry
#[account]
pub struct RegistryConfig {
    /// Only this key may change the limits
    pub authority: Pubkey,
    /// Maximum number of active addresses per soul
    pub max_addresses_per_soul: u32,
    /// PDA bump seed
    pub bump: u8,
}

impl RegistryConfig {
    pub const SIZE: usize = 8 + 32 + 4 + 1;

    /// Replace the limit, returning the previous value
    pub fn update_max_addresses_per_soul(&mut self, max_addresses_per_soul: u32) -> Result<u32> {
        require!(
            (1..=MAX_ADDRESSES_PER_SOUL_CAP).contains(&max_addresses_per_soul),
            SoulboundError::InvalidLimit
        );

        Ok(std::mem::replace(
            &mut self.max_addresses_per_soul,
            max_addresses_per_soul,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_error, key};

    #[test]
    fn updates_limit_within_range() {
        let mut config = RegistryConfig {
            authority: key(1),
            max_addresses_per_soul: DEFAULT_MAX_ADDRESSES_PER_SOUL,
            bump: 255,
        };

        assert_eq!(config.update_max_addresses_per_soul(10).unwrap(), 5);
        assert_eq!(config.max_addresses_per_soul, 10);

        assert_error(config.update_max_addresses_per_soul(0), SoulboundError::InvalidLimit);
        assert_error(
            config.update_max_addresses_per_soul(MAX_ADDRESSES_PER_SOUL_CAP + 1),
            SoulboundError::InvalidLimit,
        );
        assert_eq!(config.max_addresses_per_soul, 10);
    }
}
