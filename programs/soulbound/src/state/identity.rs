use anchor_lang::prelude::*;

use crate::errors::SoulboundError;
use crate::state::config::MAX_ADDRESSES_PER_SOUL_CAP;
use crate::state::index::SlotList;

// =============================================================================
// SOUL REGISTRY - Persistent identities owning many addresses
// =============================================================================
//
// A soul is created with a single primary address and can later collect more
// addresses up to the configured limit. Every address that has ever been
// assigned to a soul is "used" forever: revoking it retires it for good, it
// can never be assigned again, not even to the soul that revoked it.
//
// Accounts:
//   SoulRegistry   ["soul_registry"]         authority, config, last soul id
//   Soul           ["soul", id]              primary + active addresses
//   AddressRecord  ["address", address]      owner and status of one address
//   IndexSlot      ["slot", soul, i]         i-th revoked address of a soul
//
// The address record is the only place that knows whether an address is
// unused, active or revoked. Soul accounts keep the ordered lists.
// =============================================================================

/// Status of an address record
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressStatus {
    /// Never assigned to any soul
    #[default]
    Unused,
    /// Currently authenticates as its soul
    Active,
    /// Permanently retired, kept for provenance
    Revoked,
}

#[account]
#[derive(Default)]
pub struct AddressRecord {
    pub address: Pubkey,
    /// Soul that owns (or owned) the address, 0 while unused
    pub soul_id: u64,
    pub status: AddressStatus,
    /// PDA bump seed
    pub bump: u8,
}

impl AddressRecord {
    pub const SIZE: usize = 8 + 32 + 8 + 1 + 1;

    pub fn is_used(&self) -> bool {
        self.status != AddressStatus::Unused
    }

    /// Soul id while the address is active, 0 otherwise
    pub fn soul_of(&self) -> u64 {
        match self.status {
            AddressStatus::Active => self.soul_id,
            _ => 0,
        }
    }

    pub fn soul_of_revoked(&self) -> u64 {
        match self.status {
            AddressStatus::Revoked => self.soul_id,
            _ => 0,
        }
    }

    fn ensure_assignable(&self, address: &Pubkey) -> Result<()> {
        require!(*address != Pubkey::default(), SoulboundError::InvalidAddress);
        require!(!self.is_used(), SoulboundError::AddressAlreadyUsed);
        Ok(())
    }

    fn activate(&mut self, address: Pubkey, soul_id: u64) {
        self.address = address;
        self.soul_id = soul_id;
        self.status = AddressStatus::Active;
    }
}

#[account]
pub struct SoulRegistry {
    /// Administrator allowed to mutate the soul graph
    pub authority: Pubkey,
    /// Config account providing the addresses-per-soul limit
    pub config: Pubkey,
    /// Id of the most recently registered soul (0 when empty)
    pub last_soul_id: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl SoulRegistry {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // authority
        32 +                     // config
        8 +                      // last_soul_id
        1;                       // bump

    pub fn is_soul(&self, soul_id: u64) -> bool {
        (1..=self.last_soul_id).contains(&soul_id)
    }

    /// Register soul `last_soul_id + 1` owning `address` as its primary address.
    /// `soul` and `record` are the fresh accounts of the new soul and of `address`.
    pub fn register_soul(
        &mut self,
        soul: &mut Soul,
        record: &mut AddressRecord,
        address: Pubkey,
    ) -> Result<u64> {
        record.ensure_assignable(&address)?;

        let soul_id = self
            .last_soul_id
            .checked_add(1)
            .ok_or(error!(SoulboundError::MathOverflow))?;

        soul.id = soul_id;
        soul.primary_address = address;
        soul.active_addresses = vec![address];
        soul.revoked = SlotList::default();
        record.activate(address, soul_id);
        self.last_soul_id = soul_id;

        Ok(soul_id)
    }
}

#[account]
#[derive(Default)]
pub struct Soul {
    /// Sequential id starting at 1, 0 for an account that is not a soul
    pub id: u64,
    /// Always a member of `active_addresses`
    pub primary_address: Pubkey,
    /// Active addresses in assignment order
    pub active_addresses: Vec<Pubkey>,
    /// Revoked addresses in revocation order, one slot each
    pub revoked: SlotList,
    /// PDA bump seed
    pub bump: u8,
}

impl Soul {
    pub const SIZE: usize = 8 +                         // discriminator
        8 +                                             // id
        32 +                                            // primary_address
        4 + MAX_ADDRESSES_PER_SOUL_CAP as usize * 32 +  // active_addresses
        SlotList::SIZE +                                // revoked
        1;                                              // bump

    pub fn ensure_exists(&self) -> Result<()> {
        require!(self.id != 0, SoulboundError::SoulNotFound);
        Ok(())
    }

    /// Append a never used address to the active addresses
    pub fn assign_address(
        &mut self,
        record: &mut AddressRecord,
        address: Pubkey,
        max_addresses_per_soul: u32,
    ) -> Result<()> {
        self.ensure_exists()?;
        record.ensure_assignable(&address)?;
        require!(
            self.active_addresses.len() < max_addresses_per_soul as usize,
            SoulboundError::LimitExceeded
        );

        self.active_addresses.push(address);
        record.activate(address, self.id);
        Ok(())
    }

    /// Retire the active, non-primary address of `record`.
    /// Returns the position of the address in the revoked list.
    pub fn revoke_address(&mut self, record: &mut AddressRecord) -> Result<u32> {
        require!(
            record.soul_of() != 0 && record.soul_id == self.id,
            SoulboundError::NotAssigned
        );

        let address = record.address;
        require_keys_neq!(
            self.primary_address,
            address,
            SoulboundError::CannotRevokePrimary
        );

        let position = self.revoked.push()?;
        self.active_addresses.retain(|active| *active != address);
        record.status = AddressStatus::Revoked;

        Ok(position)
    }

    /// Make one of the active addresses primary.
    /// Returns the previous primary address, or `None` when nothing changed.
    pub fn change_primary_address(&mut self, address: Pubkey) -> Result<Option<Pubkey>> {
        self.ensure_exists()?;
        require!(
            self.active_addresses.contains(&address),
            SoulboundError::AddressNotMember
        );

        if self.primary_address == address {
            return Ok(None);
        }

        Ok(Some(std::mem::replace(&mut self.primary_address, address)))
    }

    pub fn revoked_count(&self) -> u32 {
        self.revoked.len
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use proptest::prelude::*;

    use super::*;
    use crate::state::config::DEFAULT_MAX_ADDRESSES_PER_SOUL;
    use crate::test_utils::{assert_error, is_error, key, soul_registry};

    const MAX: u32 = DEFAULT_MAX_ADDRESSES_PER_SOUL;

    /// The accounts of the soul graph. Every operation works on copies of the
    /// accounts its instruction touches and keeps them only when it succeeds.
    #[derive(Clone)]
    struct Graph {
        registry: SoulRegistry,
        souls: BTreeMap<u64, Soul>,
        records: BTreeMap<Pubkey, AddressRecord>,
        revoked_slots: BTreeMap<(u64, u32), Pubkey>,
    }

    impl Graph {
        fn new() -> Self {
            Self {
                registry: soul_registry(0),
                souls: BTreeMap::new(),
                records: BTreeMap::new(),
                revoked_slots: BTreeMap::new(),
            }
        }

        fn soul(&self, soul_id: u64) -> Soul {
            self.souls.get(&soul_id).cloned().unwrap_or_default()
        }

        fn record(&self, address: &Pubkey) -> AddressRecord {
            self.records.get(address).cloned().unwrap_or_default()
        }

        fn register(&mut self, address: Pubkey) -> Result<u64> {
            let mut registry = self.registry.clone();
            let mut soul = Soul::default();
            let mut record = self.record(&address);

            let soul_id = registry.register_soul(&mut soul, &mut record, address)?;

            self.registry = registry;
            self.souls.insert(soul_id, soul);
            self.records.insert(address, record);
            Ok(soul_id)
        }

        fn assign(&mut self, soul_id: u64, address: Pubkey, limit: u32) -> Result<()> {
            let mut soul = self.soul(soul_id);
            let mut record = self.record(&address);

            soul.assign_address(&mut record, address, limit)?;

            self.souls.insert(soul_id, soul);
            self.records.insert(address, record);
            Ok(())
        }

        fn revoke(&mut self, address: Pubkey) -> Result<u64> {
            let mut record = self.record(&address);
            let mut soul = self.soul(record.soul_id);

            let position = soul.revoke_address(&mut record)?;

            self.revoked_slots.insert((soul.id, position), address);
            self.souls.insert(soul.id, soul);
            self.records.insert(address, record);
            Ok(self.records[&address].soul_id)
        }

        fn change_primary(&mut self, soul_id: u64, address: Pubkey) -> Result<Option<Pubkey>> {
            let mut soul = self.soul(soul_id);
            let old = soul.change_primary_address(address)?;
            self.souls.insert(soul_id, soul);
            Ok(old)
        }

        fn soul_of(&self, address: &Pubkey) -> u64 {
            self.record(address).soul_of()
        }

        fn soul_of_revoked(&self, address: &Pubkey) -> u64 {
            self.record(address).soul_of_revoked()
        }

        fn is_address_used(&self, address: &Pubkey) -> bool {
            self.record(address).is_used()
        }

        fn revoked_addresses(&self, soul_id: u64) -> Vec<Pubkey> {
            (0..self.soul(soul_id).revoked_count())
                .map(|position| self.revoked_slots[&(soul_id, position)])
                .collect()
        }
    }

    fn assert_soul_state(
        graph: &Graph,
        id: u64,
        primary: Pubkey,
        active: &[Pubkey],
        revoked: &[Pubkey],
    ) {
        let soul = graph.soul(id);
        assert!(graph.registry.is_soul(id));
        assert_eq!(soul.primary_address, primary);
        assert_eq!(graph.soul_of(&primary), id);
        assert_eq!(soul.active_addresses, active);
        assert_eq!(graph.revoked_addresses(id), revoked);

        for address in active {
            assert_eq!(graph.soul_of(address), id);
            assert!(graph.is_address_used(address));
            assert_eq!(graph.soul_of_revoked(address), 0);
        }

        for address in revoked {
            assert_eq!(graph.soul_of(address), 0);
            assert!(graph.is_address_used(address));
            assert_eq!(graph.soul_of_revoked(address), id);
        }
    }

    #[test]
    fn registers_first_soul() {
        let mut graph = Graph::new();
        let p1 = key(1);

        assert_eq!(graph.register(p1).unwrap(), 1);
        assert_eq!(graph.registry.last_soul_id, 1);
        assert_eq!(graph.soul_of(&p1), 1);
        assert!(graph.registry.is_soul(1));
        assert!(!graph.registry.is_soul(0));
        assert!(!graph.registry.is_soul(2));
        assert_soul_state(&graph, 1, p1, &[p1], &[]);
    }

    #[test]
    fn soul_ids_are_sequential() {
        let mut graph = Graph::new();

        assert_eq!(graph.register(key(1)).unwrap(), 1);
        assert_eq!(graph.register(key(2)).unwrap(), 2);
        assert_eq!(graph.register(key(3)).unwrap(), 3);
        assert_eq!(graph.registry.last_soul_id, 3);
    }

    #[test]
    fn rejects_zero_and_used_addresses_on_registration() {
        let mut graph = Graph::new();

        assert_error(graph.register(Pubkey::default()), SoulboundError::InvalidAddress);
        assert_eq!(graph.registry.last_soul_id, 0);

        graph.register(key(1)).unwrap();
        assert_error(graph.register(key(1)), SoulboundError::AddressAlreadyUsed);

        graph.assign(1, key(2), MAX).unwrap();
        graph.revoke(key(2)).unwrap();
        assert_error(graph.register(key(2)), SoulboundError::AddressAlreadyUsed);
        assert_eq!(graph.registry.last_soul_id, 1);
    }

    #[test]
    fn follows_primary_rotation_and_revocation() {
        let mut graph = Graph::new();
        let (p1, s1) = (key(1), key(2));

        graph.register(p1).unwrap();
        graph.assign(1, s1, MAX).unwrap();
        assert_soul_state(&graph, 1, p1, &[p1, s1], &[]);

        assert_error(graph.revoke(p1), SoulboundError::CannotRevokePrimary);

        assert_eq!(graph.change_primary(1, p1).unwrap(), None);
        assert_eq!(graph.change_primary(1, s1).unwrap(), Some(p1));
        assert_soul_state(&graph, 1, s1, &[p1, s1], &[]);

        assert_eq!(graph.revoke(p1).unwrap(), 1);
        assert_eq!(graph.soul_of_revoked(&p1), 1);
        assert_soul_state(&graph, 1, s1, &[s1], &[p1]);

        assert_error(graph.assign(1, p1, MAX), SoulboundError::AddressAlreadyUsed);
        graph.register(key(3)).unwrap();
        assert_error(graph.assign(2, p1, MAX), SoulboundError::AddressAlreadyUsed);
        assert_error(graph.revoke(p1), SoulboundError::NotAssigned);
    }

    #[test]
    fn revoked_addresses_keep_revocation_order() {
        let mut graph = Graph::new();
        graph.register(key(1)).unwrap();
        for n in 2..=4 {
            graph.assign(1, key(n), MAX).unwrap();
        }

        graph.revoke(key(3)).unwrap();
        graph.revoke(key(2)).unwrap();
        graph.revoke(key(4)).unwrap();

        assert_soul_state(&graph, 1, key(1), &[key(1)], &[key(3), key(2), key(4)]);
        assert_eq!(graph.soul(1).revoked_count(), 3);
    }

    #[test]
    fn enforces_addresses_per_soul_limit() {
        let mut graph = Graph::new();
        graph.register(key(1)).unwrap();

        for n in 2..=5 {
            graph.assign(1, key(n), MAX).unwrap();
        }
        assert_eq!(graph.soul(1).active_addresses.len(), 5);

        assert_error(graph.assign(1, key(6), MAX), SoulboundError::LimitExceeded);
        assert!(!graph.is_address_used(&key(6)));

        // Revoking frees a slot, the revoked address stays used
        graph.revoke(key(3)).unwrap();
        graph.assign(1, key(6), MAX).unwrap();
        assert_eq!(
            graph.soul(1).active_addresses,
            vec![key(1), key(2), key(4), key(5), key(6)]
        );
    }

    #[test]
    fn assignment_failures() {
        let mut graph = Graph::new();

        assert_error(graph.assign(1, key(1), MAX), SoulboundError::SoulNotFound);

        graph.register(key(1)).unwrap();
        graph.register(key(2)).unwrap();
        graph.assign(2, key(3), MAX).unwrap();

        assert_error(graph.assign(1, Pubkey::default(), MAX), SoulboundError::InvalidAddress);
        assert_error(graph.assign(1, key(1), MAX), SoulboundError::AddressAlreadyUsed);
        assert_error(graph.assign(1, key(2), MAX), SoulboundError::AddressAlreadyUsed);
        assert_error(graph.assign(1, key(3), MAX), SoulboundError::AddressAlreadyUsed);

        graph.revoke(key(3)).unwrap();
        assert_error(graph.assign(1, key(3), MAX), SoulboundError::AddressAlreadyUsed);
    }

    #[test]
    fn change_primary_failures() {
        let mut graph = Graph::new();

        assert_error(graph.change_primary(1, key(1)), SoulboundError::SoulNotFound);

        graph.register(key(1)).unwrap();
        graph.register(key(2)).unwrap();
        graph.assign(2, key(3), MAX).unwrap();

        assert_error(
            graph.change_primary(1, Pubkey::default()),
            SoulboundError::AddressNotMember,
        );
        assert_error(graph.change_primary(1, key(3)), SoulboundError::AddressNotMember);

        graph.assign(1, key(4), MAX).unwrap();
        graph.revoke(key(4)).unwrap();
        assert_error(graph.change_primary(1, key(4)), SoulboundError::AddressNotMember);
    }

    #[test]
    fn revoke_requires_active_address() {
        let mut graph = Graph::new();

        assert_error(graph.revoke(key(1)), SoulboundError::NotAssigned);
        assert_error(graph.revoke(Pubkey::default()), SoulboundError::NotAssigned);
    }

    #[test]
    fn fresh_accounts_read_as_unknown() {
        let graph = Graph::new();
        let soul = graph.soul(7);

        assert!(soul.active_addresses.is_empty());
        assert_eq!(soul.revoked_count(), 0);
        assert_eq!(soul.primary_address, Pubkey::default());
        assert_error(soul.ensure_exists(), SoulboundError::SoulNotFound);
        assert_eq!(graph.soul_of(&key(1)), 0);
        assert_eq!(graph.soul_of_revoked(&key(1)), 0);
    }

    #[test]
    fn soul_account_holds_the_largest_address_list() {
        let soul = Soul {
            id: u64::MAX,
            primary_address: key(1),
            active_addresses: vec![key(1); MAX_ADDRESSES_PER_SOUL_CAP as usize],
            revoked: SlotList { len: u32::MAX },
            bump: 255,
        };

        let mut data = Vec::new();
        soul.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), Soul::SIZE);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Register(u8),
        Assign(u64, u8),
        Revoke(u8),
        ChangePrimary(u64, u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u8..=12).prop_map(Op::Register),
            (1u64..=4, 1u8..=12).prop_map(|(soul, address)| Op::Assign(soul, address)),
            (1u8..=12).prop_map(Op::Revoke),
            (1u64..=4, 1u8..=12).prop_map(|(soul, address)| Op::ChangePrimary(soul, address)),
        ]
    }

    proptest! {
        #[test]
        fn soul_graph_invariants_hold(ops in proptest::collection::vec(op(), 1..80)) {
            let mut graph = Graph::new();
            let mut touched = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Register(n) => {
                        if graph.register(key(n)).is_ok() {
                            prop_assert!(touched.insert(key(n)));
                        }
                    }
                    Op::Assign(soul, n) => {
                        if graph.assign(soul, key(n), MAX).is_ok() {
                            prop_assert!(touched.insert(key(n)));
                        }
                    }
                    Op::Revoke(n) => {
                        let _ = graph.revoke(key(n));
                    }
                    Op::ChangePrimary(soul, n) => {
                        let _ = graph.change_primary(soul, key(n));
                    }
                }

                // Permanent use: no touched address can ever come back
                for address in &touched {
                    let mut attempt = graph.clone();
                    prop_assert!(is_error(
                        attempt.register(*address),
                        SoulboundError::AddressAlreadyUsed
                    ));
                    for soul in 1..=graph.registry.last_soul_id {
                        prop_assert!(is_error(
                            attempt.assign(soul, *address, MAX_ADDRESSES_PER_SOUL_CAP),
                            SoulboundError::AddressAlreadyUsed
                        ));
                    }
                }

                let mut owners = BTreeMap::new();
                for soul_id in 1..=graph.registry.last_soul_id {
                    let soul = graph.soul(soul_id);

                    // Primary membership
                    prop_assert!(soul.active_addresses.contains(&soul.primary_address));
                    prop_assert!(soul.active_addresses.len() <= MAX as usize);

                    // Every address belongs to at most one soul
                    let revoked = graph.revoked_addresses(soul_id);
                    for address in soul.active_addresses.iter().chain(&revoked) {
                        prop_assert!(owners.insert(*address, soul_id).is_none());
                        prop_assert_eq!(graph.record(address).soul_id, soul_id);
                    }
                }
                prop_assert_eq!(owners.len(), touched.len());
            }
        }
    }
}
