use anchor_lang::prelude::*;

use crate::errors::SoulboundError;
use crate::state::feature::{Capability, Feature, FeatureModule, Holder};
use crate::state::identity::SoulRegistry;
use crate::state::index::SlotRemoval;

/// Opaque fixed-width attribute value, big-endian when read as an integer
pub type AttributeValue = [u8; 20];

pub const EMPTY_ATTRIBUTE_VALUE: AttributeValue = [0; 20];

/// Encode an integer into the low 16 bytes of an attribute value
pub fn attribute_value_from_u128(amount: u128) -> AttributeValue {
    let mut value = EMPTY_ATTRIBUTE_VALUE;
    value[4..].copy_from_slice(&amount.to_be_bytes());
    value
}

/// Decode an attribute value as an integer. Values wider than 128 bits are rejected.
pub fn attribute_value_to_u128(value: &AttributeValue) -> Result<u128> {
    let (high, low) = value.split_at(4);
    require!(high.iter().all(|byte| *byte == 0), SoulboundError::AmountOutOfRange);

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(low);
    Ok(u128::from_be_bytes(bytes))
}

/// Value of one feature for one soul, `["attribute", soul_id, feature]`.
/// An account holding the empty value reads exactly like a missing one.
#[account]
#[derive(Default)]
pub struct Attribute {
    pub soul_id: u64,
    pub feature: Pubkey,
    pub value: AttributeValue,
    /// When the value last went from empty to non-empty
    pub set_at: i64,
    /// When the value last changed
    pub updated_at: i64,
    /// Slot of `feature` in the holder list of the soul
    pub soul_position: u32,
    /// Slot of `soul_id` in the soul list of the feature
    pub feature_position: u32,
    /// PDA bump seed
    pub bump: u8,
}

impl Attribute {
    pub const SIZE: usize = 8 +  // discriminator
        8 +                      // soul_id
        32 +                     // feature
        20 +                     // value
        8 + 8 +                  // set_at, updated_at
        4 + 4 +                  // positions
        1;                       // bump

    pub fn is_set(&self) -> bool {
        self.value != EMPTY_ATTRIBUTE_VALUE
    }
}

/// How a successful `set_attribute` reshaped the soul <-> feature index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeChange {
    /// Empty -> non-empty, both lists grew by one
    Inserted {
        soul_position: u32,
        feature_position: u32,
    },
    /// Non-empty -> non-empty, index untouched
    Updated,
    /// Non-empty -> empty, both lists shrank by one
    Removed {
        by_soul: SlotRemoval,
        by_feature: SlotRemoval,
    },
}

#[account]
pub struct AttributeRegistry {
    /// Administrator of the feature lifecycle
    pub authority: Pubkey,
    /// Soul registry consulted for soul existence
    pub soul_registry: Pubkey,
    /// PDA bump seed
    pub bump: u8,
}

impl AttributeRegistry {
    pub const SIZE: usize = 8 + 32 + 32 + 1;

    pub const CAPABILITY: Capability = Capability::CanValidateSet;

    /// Set the attribute of `soul_id` provided by `module` to `value`.
    ///
    /// `feature`, `holder` and `attribute` are the accounts of `module`, of
    /// `soul_id` in this registry and of the pair. Returns the previous value
    /// and the index change the caller has to mirror into the slot accounts.
    #[allow(clippy::too_many_arguments)]
    pub fn set_attribute(
        &self,
        souls: &SoulRegistry,
        feature: &mut Feature,
        holder: &mut Holder,
        attribute: &mut Attribute,
        module: &impl FeatureModule,
        caller: &Pubkey,
        soul_id: u64,
        value: AttributeValue,
        now: i64,
    ) -> Result<(AttributeValue, AttributeChange)> {
        require!(souls.is_soul(soul_id), SoulboundError::SoulNotFound);
        feature.ensure_available()?;
        module.assert_is_settable(caller, soul_id, &value)?;

        let previous = attribute.value;
        require!(value != previous, SoulboundError::NoChange);

        let change = if value == EMPTY_ATTRIBUTE_VALUE {
            let by_soul = holder.keys.remove(attribute.soul_position)?;
            let by_feature = feature.souls.remove(attribute.feature_position)?;

            attribute.value = EMPTY_ATTRIBUTE_VALUE;
            attribute.set_at = 0;
            attribute.updated_at = 0;
            attribute.soul_position = 0;
            attribute.feature_position = 0;

            AttributeChange::Removed { by_soul, by_feature }
        } else if previous == EMPTY_ATTRIBUTE_VALUE {
            let soul_position = holder.keys.push()?;
            let feature_position = feature.souls.push()?;

            attribute.soul_id = soul_id;
            attribute.feature = module.key();
            attribute.value = value;
            attribute.set_at = now;
            attribute.updated_at = now;
            attribute.soul_position = soul_position;
            attribute.feature_position = feature_position;

            AttributeChange::Inserted {
                soul_position,
                feature_position,
            }
        } else {
            attribute.value = value;
            attribute.updated_at = now;

            AttributeChange::Updated
        };

        Ok((previous, change))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::state::feature::FeatureStatus;
    use crate::state::index::{SlotBytes, SlotItem};
    use crate::test_utils::{assert_error, key, soul_registry, MockFeature, MockFeatureError};

    const SOUL_ID: u64 = 1;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    enum Owner {
        Soul(u64),
        Feature(Pubkey),
    }

    /// Accounts of one attribute registry. `set` runs the state transition on
    /// copies and then moves slot items the way `set_attribute` does on chain.
    #[derive(Clone)]
    struct Book {
        registry: AttributeRegistry,
        souls: SoulRegistry,
        features: BTreeMap<Pubkey, Feature>,
        holders: BTreeMap<u64, Holder>,
        attributes: BTreeMap<(u64, Pubkey), Attribute>,
        slots: BTreeMap<(Owner, u32), SlotBytes>,
    }

    impl Book {
        fn new(modules: &[&MockFeature]) -> Self {
            let mut book = Self {
                registry: AttributeRegistry {
                    authority: key(100),
                    soul_registry: key(101),
                    bump: 255,
                },
                souls: soul_registry(2),
                features: BTreeMap::new(),
                holders: BTreeMap::new(),
                attributes: BTreeMap::new(),
                slots: BTreeMap::new(),
            };
            for module in modules {
                book.register(module);
            }
            book
        }

        fn register(&mut self, module: &MockFeature) {
            let mut feature = Feature::default();
            feature
                .register(key(100), module, AttributeRegistry::CAPABILITY)
                .unwrap();
            self.features.insert(module.key, feature);
        }

        fn feature(&self, feature: &Pubkey) -> Feature {
            self.features.get(feature).cloned().unwrap_or_default()
        }

        fn holder(&self, soul_id: u64) -> Holder {
            self.holders.get(&soul_id).cloned().unwrap_or_default()
        }

        fn attribute(&self, soul_id: u64, feature: &Pubkey) -> Attribute {
            self.attributes
                .get(&(soul_id, *feature))
                .cloned()
                .unwrap_or_default()
        }

        fn set(
            &mut self,
            soul_id: u64,
            module: &MockFeature,
            caller: &Pubkey,
            value: AttributeValue,
            now: i64,
        ) -> Result<AttributeValue> {
            let mut feature = self.feature(&module.key);
            let mut holder = self.holder(soul_id);
            let mut attribute = self.attribute(soul_id, &module.key);

            let (previous, change) = self.registry.set_attribute(
                &self.souls,
                &mut feature,
                &mut holder,
                &mut attribute,
                module,
                caller,
                soul_id,
                value,
                now,
            )?;

            self.features.insert(module.key, feature);
            self.holders.insert(soul_id, holder);
            self.attributes.insert((soul_id, module.key), attribute);

            match change {
                AttributeChange::Inserted {
                    soul_position,
                    feature_position,
                } => {
                    self.slots
                        .insert((Owner::Soul(soul_id), soul_position), module.key.to_slot());
                    self.slots
                        .insert((Owner::Feature(module.key), feature_position), soul_id.to_slot());
                }
                AttributeChange::Updated => {}
                AttributeChange::Removed { by_soul, by_feature } => {
                    if by_soul.moves() {
                        let item = self.fill(Owner::Soul(soul_id), by_soul);
                        let moved = Pubkey::from_slot(&item);
                        if let Some(attribute) = self.attributes.get_mut(&(soul_id, moved)) {
                            attribute.soul_position = by_soul.hole;
                        }
                    }
                    if by_feature.moves() {
                        let item = self.fill(Owner::Feature(module.key), by_feature);
                        let moved = u64::from_slot(&item);
                        if let Some(attribute) = self.attributes.get_mut(&(moved, module.key)) {
                            attribute.feature_position = by_feature.hole;
                        }
                    }
                }
            }

            Ok(previous)
        }

        fn fill(&mut self, owner: Owner, removal: SlotRemoval) -> SlotBytes {
            let item = self.slots[&(owner, removal.last)];
            self.slots.insert((owner, removal.hole), item);
            item
        }

        fn attributes_count_by_soul(&self, soul_id: u64) -> u32 {
            self.holder(soul_id).keys.len
        }

        fn souls_count_by_attribute(&self, feature: &Pubkey) -> u32 {
            self.feature(feature).souls.len
        }

        fn attribute_by_soul_at_index(&self, soul_id: u64, index: u32) -> Option<Pubkey> {
            (index < self.attributes_count_by_soul(soul_id))
                .then(|| Pubkey::from_slot(&self.slots[&(Owner::Soul(soul_id), index)]))
        }

        fn soul_by_attribute_at_index(&self, feature: &Pubkey, index: u32) -> Option<u64> {
            (index < self.souls_count_by_attribute(feature))
                .then(|| u64::from_slot(&self.slots[&(Owner::Feature(*feature), index)]))
        }
    }

    #[test]
    fn value_encoding_is_big_endian() {
        let ten_units = 10_000_000_000_000_000_000u128;
        let value = attribute_value_from_u128(ten_units);

        assert_eq!(&value[12..], &[0x8a, 0xc7, 0x23, 0x04, 0x89, 0xe8, 0x00, 0x00]);
        assert_eq!(attribute_value_to_u128(&value).unwrap(), ten_units);
        assert_eq!(attribute_value_to_u128(&EMPTY_ATTRIBUTE_VALUE).unwrap(), 0);

        let mut wide = EMPTY_ATTRIBUTE_VALUE;
        wide[3] = 1;
        assert_error(attribute_value_to_u128(&wide), SoulboundError::AmountOutOfRange);
    }

    #[test]
    fn initial_state_is_empty() {
        let module = MockFeature::attribute(key(10), key(11));
        let book = Book::new(&[&module]);
        let attribute = book.attribute(SOUL_ID, &module.key);

        assert!(!attribute.is_set());
        assert_eq!(attribute.value, EMPTY_ATTRIBUTE_VALUE);
        assert_eq!(attribute.set_at, 0);
        assert_eq!(attribute.updated_at, 0);
        assert_eq!(book.attributes_count_by_soul(SOUL_ID), 0);
        assert_eq!(book.souls_count_by_attribute(&module.key), 0);
        assert_eq!(book.attribute_by_soul_at_index(SOUL_ID, 0), None);
    }

    #[test]
    fn updates_value_timestamps_and_index() {
        let module = MockFeature::attribute(key(10), key(11));
        let mut book = Book::new(&[&module]);
        let operator = module.operator;
        let (v1, v2) = (attribute_value_from_u128(1), attribute_value_from_u128(2));

        let previous = book.set(SOUL_ID, &module, &operator, v1, 1_000).unwrap();
        assert_eq!(previous, EMPTY_ATTRIBUTE_VALUE);
        assert_eq!(book.attributes_count_by_soul(SOUL_ID), 1);
        assert_eq!(book.souls_count_by_attribute(&module.key), 1);
        assert_eq!(book.attribute_by_soul_at_index(SOUL_ID, 0), Some(module.key));
        assert_eq!(book.soul_by_attribute_at_index(&module.key, 0), Some(SOUL_ID));

        let attribute = book.attribute(SOUL_ID, &module.key);
        assert_eq!(attribute.value, v1);
        assert_eq!(attribute.soul_id, SOUL_ID);
        assert_eq!(attribute.feature, module.key);
        assert_eq!((attribute.set_at, attribute.updated_at), (1_000, 1_000));

        assert_error(
            book.set(SOUL_ID, &module, &operator, v1, 1_500),
            SoulboundError::NoChange,
        );
        assert_eq!(book.attribute(SOUL_ID, &module.key).updated_at, 1_000);

        let previous = book.set(SOUL_ID, &module, &operator, v2, 2_000).unwrap();
        assert_eq!(previous, v1);
        assert_eq!(book.attributes_count_by_soul(SOUL_ID), 1);
        assert_eq!(book.souls_count_by_attribute(&module.key), 1);
        let attribute = book.attribute(SOUL_ID, &module.key);
        assert_eq!(attribute.value, v2);
        assert_eq!((attribute.set_at, attribute.updated_at), (1_000, 2_000));

        let previous = book
            .set(SOUL_ID, &module, &operator, EMPTY_ATTRIBUTE_VALUE, 3_000)
            .unwrap();
        assert_eq!(previous, v2);
        let attribute = book.attribute(SOUL_ID, &module.key);
        assert!(!attribute.is_set());
        assert_eq!((attribute.set_at, attribute.updated_at), (0, 0));
        assert_eq!(book.attributes_count_by_soul(SOUL_ID), 0);
        assert_eq!(book.souls_count_by_attribute(&module.key), 0);

        // A fresh empty -> non-empty transition stamps set_at again
        book.set(SOUL_ID, &module, &operator, v1, 4_000).unwrap();
        assert_eq!(book.attribute(SOUL_ID, &module.key).set_at, 4_000);
    }

    #[test]
    fn removal_moves_last_entry_into_the_hole() {
        let first = MockFeature::attribute(key(10), key(11));
        let second = MockFeature::attribute(key(20), key(11));
        let mut book = Book::new(&[&first, &second]);
        let operator = first.operator;

        let value = attribute_value_from_u128(3);
        book.set(1, &first, &operator, value, 10).unwrap();
        book.set(2, &first, &operator, value, 10).unwrap();
        book.set(1, &second, &operator, value, 10).unwrap();

        assert_eq!(book.souls_count_by_attribute(&first.key), 2);
        assert_eq!(book.attributes_count_by_soul(1), 2);
        assert_eq!(book.attributes_count_by_soul(2), 1);

        book.set(1, &first, &operator, EMPTY_ATTRIBUTE_VALUE, 11).unwrap();

        assert_eq!(book.soul_by_attribute_at_index(&first.key, 0), Some(2));
        assert_eq!(book.soul_by_attribute_at_index(&first.key, 1), None);
        assert_eq!(book.attribute(2, &first.key).feature_position, 0);

        assert_eq!(book.attribute_by_soul_at_index(1, 0), Some(second.key));
        assert_eq!(book.attribute_by_soul_at_index(1, 1), None);
        assert_eq!(book.attribute(1, &second.key).soul_position, 0);

        // The freed slots are reused
        book.set(1, &first, &operator, value, 12).unwrap();
        assert_eq!(book.attribute_by_soul_at_index(1, 1), Some(first.key));
        assert_eq!(book.soul_by_attribute_at_index(&first.key, 1), Some(1));
    }

    #[test]
    fn rejects_unavailable_features_and_unknown_souls() {
        let module = MockFeature::attribute(key(10), key(11));
        let mut book = Book::new(&[&module]);
        let operator = module.operator;
        let value = attribute_value_from_u128(1);

        let unknown = MockFeature::attribute(key(30), operator);
        assert_error(
            book.set(SOUL_ID, &unknown, &operator, value, 1),
            SoulboundError::FeatureUnavailable,
        );

        assert_error(
            book.set(0, &module, &operator, value, 1),
            SoulboundError::SoulNotFound,
        );
        assert_error(
            book.set(3, &module, &operator, value, 1),
            SoulboundError::SoulNotFound,
        );

        book.features.get_mut(&module.key).unwrap().pause(1).unwrap();
        assert_eq!(book.feature(&module.key).status, FeatureStatus::Paused);
        assert_error(
            book.set(SOUL_ID, &module, &operator, value, 2),
            SoulboundError::FeatureUnavailable,
        );
        assert_eq!(book.attributes_count_by_soul(SOUL_ID), 0);
    }

    #[test]
    fn delegates_legality_to_feature() {
        let module = MockFeature::attribute(key(10), key(11));
        let mut book = Book::new(&[&module]);
        let operator = module.operator;

        assert_error(
            book.set(SOUL_ID, &module, &key(99), attribute_value_from_u128(1), 1),
            MockFeatureError::PermissionDenied,
        );
        assert_error(
            book.set(SOUL_ID, &module, &operator, attribute_value_from_u128(12), 1),
            MockFeatureError::InvalidValue,
        );

        // Capability check runs before the no-op check
        assert_error(
            book.set(SOUL_ID, &module, &key(99), EMPTY_ATTRIBUTE_VALUE, 1),
            MockFeatureError::PermissionDenied,
        );
        assert_error(
            book.set(SOUL_ID, &module, &operator, EMPTY_ATTRIBUTE_VALUE, 1),
            SoulboundError::NoChange,
        );
    }

    #[test]
    fn attribute_fits_its_account() {
        let attribute = Attribute {
            soul_id: u64::MAX,
            feature: key(1),
            value: [0xff; 20],
            set_at: i64::MAX,
            updated_at: i64::MAX,
            soul_position: u32::MAX,
            feature_position: u32::MAX,
            bump: 255,
        };

        let mut data = Vec::new();
        attribute.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), Attribute::SIZE);
    }

    proptest! {
        #[test]
        fn soul_and_feature_lists_stay_inverse(
            ops in proptest::collection::vec((1u64..=2, 0usize..3, 0u128..=3), 1..120)
        ) {
            let modules: Vec<MockFeature> = (0..3)
                .map(|n| MockFeature::attribute(key(10 + n), key(9)))
                .collect();
            let mut book = Book::new(&modules.iter().collect::<Vec<_>>());

            for (now, (soul_id, feature, amount)) in (1i64..).zip(ops) {
                let module = &modules[feature];
                let value = attribute_value_from_u128(amount);
                let _ = book.set(soul_id, module, &module.operator, value, now);

                let mut by_soul = 0;
                for soul_id in 1..=2u64 {
                    let count = book.attributes_count_by_soul(soul_id);
                    for index in 0..count {
                        let feature = book.attribute_by_soul_at_index(soul_id, index).unwrap();
                        let attribute = book.attribute(soul_id, &feature);
                        prop_assert!(attribute.is_set());
                        prop_assert_eq!(attribute.soul_position, index);
                        prop_assert_eq!(
                            book.soul_by_attribute_at_index(&feature, attribute.feature_position),
                            Some(soul_id)
                        );
                    }
                    by_soul += count;
                }

                let mut by_feature = 0;
                for module in &modules {
                    let count = book.souls_count_by_attribute(&module.key);
                    for index in 0..count {
                        let soul_id = book.soul_by_attribute_at_index(&module.key, index).unwrap();
                        let attribute = book.attribute(soul_id, &module.key);
                        prop_assert_eq!(attribute.feature_position, index);
                    }
                    by_feature += count;
                }

                let set = book.attributes.values().filter(|attribute| attribute.is_set()).count();
                prop_assert_eq!(by_soul, by_feature);
                prop_assert_eq!(by_soul as usize, set);
            }
        }
    }
}
