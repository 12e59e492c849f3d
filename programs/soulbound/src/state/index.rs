use anchor_lang::prelude::*;

use crate::errors::SoulboundError;

// =============================================================================
// INDEX SLOTS - Dense lists kept one account per position
// =============================================================================
//
// A list is owned by some account (a soul, a holder, a feature) that stores
// only its length. Item `i` lives in its own `IndexSlot` PDA:
//
//   seeds = ["slot", owner, i as u32 little endian]
//
// Appending writes slot `len`. Removing position `p` moves the item of slot
// `len - 1` into slot `p` and shrinks the length; the account of the old last
// slot stays allocated and is reused by the next append. Items remember their
// own position so a removal never scans the list.
// =============================================================================

/// Width of the largest item, a composite token id
pub const SLOT_ITEM_LEN: usize = 40;

pub type SlotBytes = [u8; SLOT_ITEM_LEN];

#[account]
pub struct IndexSlot {
    pub item: SlotBytes,
}

impl IndexSlot {
    pub const SIZE: usize = 8 + SLOT_ITEM_LEN;
}

/// Fixed-width encoding of a list item
pub trait SlotItem: Sized {
    fn to_slot(&self) -> SlotBytes;

    fn from_slot(bytes: &SlotBytes) -> Self;
}

impl SlotItem for u64 {
    fn to_slot(&self) -> SlotBytes {
        let mut bytes = [0u8; SLOT_ITEM_LEN];
        bytes[..8].copy_from_slice(&self.to_le_bytes());
        bytes
    }

    fn from_slot(bytes: &SlotBytes) -> Self {
        let mut id = [0u8; 8];
        id.copy_from_slice(&bytes[..8]);
        u64::from_le_bytes(id)
    }
}

impl SlotItem for Pubkey {
    fn to_slot(&self) -> SlotBytes {
        let mut bytes = [0u8; SLOT_ITEM_LEN];
        bytes[..32].copy_from_slice(self.as_ref());
        bytes
    }

    fn from_slot(bytes: &SlotBytes) -> Self {
        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes[..32]);
        Pubkey::new_from_array(key)
    }
}

/// Length of a slot list, stored inside the owning account
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotList {
    pub len: u32,
}

/// Bookkeeping of one removal: the item in `last` moves to `hole`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRemoval {
    pub hole: u32,
    pub last: u32,
}

impl SlotRemoval {
    /// False when the removed item was the last one
    pub fn moves(&self) -> bool {
        self.hole != self.last
    }
}

impl SlotList {
    pub const SIZE: usize = 4;

    /// Position the appended item takes
    pub fn push(&mut self) -> Result<u32> {
        let position = self.len;
        self.len = self
            .len
            .checked_add(1)
            .ok_or(error!(SoulboundError::MathOverflow))?;
        Ok(position)
    }

    pub fn remove(&mut self, position: u32) -> Result<SlotRemoval> {
        require!(position < self.len, SoulboundError::AccountMismatch);

        self.len -= 1;
        Ok(SlotRemoval {
            hole: position,
            last: self.len,
        })
    }
}
