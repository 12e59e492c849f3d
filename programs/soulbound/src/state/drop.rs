use anchor_lang::prelude::*;

use crate::errors::SoulboundError;
use crate::state::identity::SoulRegistry;

// =============================================================================
// RETRO DROP - One-off lamport allocations per soul
// =============================================================================
//
// The authority allocates lamports to souls and funds the drop account. From
// `start_time` on, the owner of any active address of a soul can claim the
// soul's allocation once; the allocation is then reset to zero.
// =============================================================================

#[account]
pub struct RetroDrop {
    /// Allocates and funds drops
    pub authority: Pubkey,
    pub soul_registry: Pubkey,
    /// Claims before this moment fail
    pub start_time: i64,
    /// PDA bump seed
    pub bump: u8,
}

/// Lamports waiting for one soul, `["drop", soul_id]`
#[account]
#[derive(Default)]
pub struct DropAllocation {
    pub soul_id: u64,
    pub amount: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl DropAllocation {
    pub const SIZE: usize = 8 + 8 + 8 + 1;
}

impl RetroDrop {
    pub const SIZE: usize = 8 + 32 + 32 + 8 + 1;

    /// Replace the allocation of `soul_id`, returning the previous amount
    pub fn allocate(
        &self,
        allocation: &mut DropAllocation,
        souls: &SoulRegistry,
        soul_id: u64,
        amount: u64,
    ) -> Result<u64> {
        require!(souls.is_soul(soul_id), SoulboundError::SoulNotFound);

        allocation.soul_id = soul_id;
        Ok(std::mem::replace(&mut allocation.amount, amount))
    }

    /// Take the allocation of `soul_id`, the soul owning the claimer (0 when
    /// the claimer owns none). Returns the lamports to pay out.
    pub fn claim(&self, allocation: &mut DropAllocation, soul_id: u64, now: i64) -> Result<u64> {
        require!(now >= self.start_time, SoulboundError::DropNotStarted);
        require!(soul_id != 0, SoulboundError::NotASoul);
        require!(allocation.amount > 0, SoulboundError::NothingToClaim);

        Ok(std::mem::take(&mut allocation.amount))
    }
}
