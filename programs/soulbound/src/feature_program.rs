use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke};

use crate::state::{AttributeValue, Capability, FeatureModule};

// =============================================================================
// FEATURE PROGRAM - Feature modules reached through CPI
// =============================================================================
//
// A feature is an Anchor program exposing three instructions:
//
//   supports_capability(capability: Capability) -> bool
//   assert_is_settable(caller: Pubkey, soul_id: u64, value: [u8; 20])
//   assert_is_bindable(caller: Pubkey, soul_id: u64, token_id: u64)
//
// The accounts a feature needs for its checks are forwarded from the calling
// instruction's remaining accounts. A rejecting feature fails its instruction,
// which fails the whole transaction.
// =============================================================================

/// Anchor instruction discriminator for `name`
fn sighash(name: &str) -> [u8; 8] {
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(format!("global:{name}").as_bytes()).to_bytes()[..8]);
    discriminator
}

pub struct ProgramFeature<'a, 'info> {
    program: &'a AccountInfo<'info>,
    accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> ProgramFeature<'a, 'info> {
    pub fn new(program: &'a AccountInfo<'info>, accounts: &'a [AccountInfo<'info>]) -> Self {
        Self { program, accounts }
    }

    fn invoke<A: AnchorSerialize>(&self, name: &str, args: A) -> Result<()> {
        let mut data = sighash(name).to_vec();
        args.serialize(&mut data)
            .map_err(|_| ProgramError::InvalidInstructionData)?;

        let instruction = Instruction {
            program_id: *self.program.key,
            accounts: self
                .accounts
                .iter()
                .map(|account| AccountMeta {
                    pubkey: *account.key,
                    is_signer: account.is_signer,
                    is_writable: account.is_writable,
                })
                .collect(),
            data,
        };

        let mut infos = Vec::with_capacity(self.accounts.len() + 1);
        infos.extend_from_slice(self.accounts);
        infos.push(self.program.clone());

        invoke(&instruction, &infos)?;
        Ok(())
    }
}

impl FeatureModule for ProgramFeature<'_, '_> {
    fn key(&self) -> Pubkey {
        *self.program.key
    }

    fn is_executable(&self) -> bool {
        self.program.executable
    }

    fn supports_capability(&self, capability: Capability) -> Result<bool> {
        self.invoke("supports_capability", capability)?;

        // A program that does not answer does not support anything
        let Some((program_id, data)) = get_return_data() else {
            return Ok(false);
        };
        if program_id != self.key() {
            return Ok(false);
        }
        Ok(bool::try_from_slice(&data).unwrap_or(false))
    }

    fn assert_is_settable(
        &self,
        caller: &Pubkey,
        soul_id: u64,
        value: &AttributeValue,
    ) -> Result<()> {
        self.invoke("assert_is_settable", (*caller, soul_id, *value))
    }

    fn assert_is_bindable(&self, caller: &Pubkey, soul_id: u64, token_id: u64) -> Result<()> {
        self.invoke("assert_is_bindable", (*caller, soul_id, token_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sighash_matches_anchor_discriminator() {
        let expected = &hash(b"global:supports_capability").to_bytes()[..8];
        assert_eq!(&sighash("supports_capability")[..], expected);
        assert_ne!(sighash("assert_is_settable"), sighash("assert_is_bindable"));
    }

    #[test]
    fn reports_program_key_and_executable_flag() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 0u64;
        let mut data = Vec::new();
        let program =
            AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, true, 0);

        let feature = ProgramFeature::new(&program, &[]);
        assert_eq!(feature.key(), key);
        assert!(feature.is_executable());
    }
}
