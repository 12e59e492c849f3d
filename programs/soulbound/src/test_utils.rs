use std::fmt::Debug;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;

use crate::state::{
    attribute_value_to_u128, AttributeValue, Capability, FeatureModule, SoulRegistry,
};

pub fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

pub fn is_error<T>(result: Result<T>, expected: impl Into<anchor_lang::error::Error>) -> bool {
    match result {
        Ok(_) => false,
        Err(error) => ProgramError::from(error) == ProgramError::from(expected.into()),
    }
}

#[track_caller]
pub fn assert_error<T: Debug>(result: Result<T>, expected: impl Into<anchor_lang::error::Error>) {
    let expected: anchor_lang::error::Error = expected.into();
    match result {
        Ok(value) => panic!("expected {expected:?}, got Ok({value:?})"),
        Err(error) => assert_eq!(ProgramError::from(error), ProgramError::from(expected)),
    }
}

#[error_code(offset = 7000)]
pub enum MockFeatureError {
    #[msg("Caller may not operate this feature")]
    PermissionDenied,
    #[msg("Value rejected by feature")]
    InvalidValue,
    #[msg("Token does not exist")]
    TokenDoesNotExist,
}

/// In-memory feature module. Only `operator` may set or bind.
#[derive(Clone, Debug)]
pub struct MockFeature {
    pub key: Pubkey,
    pub executable: bool,
    pub capability: Capability,
    pub operator: Pubkey,
    /// Largest integer value accepted by `assert_is_settable`
    pub max_value: u128,
    /// Tokens `1..=max_token_id` exist
    pub max_token_id: u64,
}

impl MockFeature {
    pub fn attribute(key: Pubkey, operator: Pubkey) -> Self {
        Self {
            key,
            executable: true,
            capability: Capability::CanValidateSet,
            operator,
            max_value: 11,
            max_token_id: 0,
        }
    }

    pub fn collection(key: Pubkey, operator: Pubkey) -> Self {
        Self {
            key,
            executable: true,
            capability: Capability::CanValidateBind,
            operator,
            max_value: 0,
            max_token_id: 1,
        }
    }
}

impl FeatureModule for MockFeature {
    fn key(&self) -> Pubkey {
        self.key
    }

    fn is_executable(&self) -> bool {
        self.executable
    }

    fn supports_capability(&self, capability: Capability) -> Result<bool> {
        Ok(capability == self.capability)
    }

    fn assert_is_settable(
        &self,
        caller: &Pubkey,
        _soul_id: u64,
        value: &AttributeValue,
    ) -> Result<()> {
        require_keys_eq!(*caller, self.operator, MockFeatureError::PermissionDenied);
        require!(
            attribute_value_to_u128(value)? <= self.max_value,
            MockFeatureError::InvalidValue
        );
        Ok(())
    }

    fn assert_is_bindable(&self, caller: &Pubkey, _soul_id: u64, token_id: u64) -> Result<()> {
        require_keys_eq!(*caller, self.operator, MockFeatureError::PermissionDenied);
        require!(
            (1..=self.max_token_id).contains(&token_id),
            MockFeatureError::TokenDoesNotExist
        );
        Ok(())
    }
}

/// Soul registry holding souls `1..=last_soul_id`
pub fn soul_registry(last_soul_id: u64) -> SoulRegistry {
    SoulRegistry {
        authority: key(200),
        config: key(201),
        last_soul_id,
        bump: 255,
    }
}
