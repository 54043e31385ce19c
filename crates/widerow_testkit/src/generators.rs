//! Property-based test generators using proptest.
//!
//! Provides strategies for metadata, backing collections and sequences of
//! proxy mutations.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use widerow_core::{ConsistencyLevel, EntityMeta, PropertyMeta, PropertyType};

const ALL_PROPERTY_TYPES: [PropertyType; 11] = [
    PropertyType::Id,
    PropertyType::EmbeddedId,
    PropertyType::Simple,
    PropertyType::List,
    PropertyType::Set,
    PropertyType::Map,
    PropertyType::LazySimple,
    PropertyType::LazyList,
    PropertyType::LazySet,
    PropertyType::LazyMap,
    PropertyType::Counter,
];

/// Strategy for any property type.
pub fn property_type_strategy() -> impl Strategy<Value = PropertyType> {
    prop::sample::select(ALL_PROPERTY_TYPES.to_vec())
}

/// Strategy for property types that are not identifiers.
pub fn value_property_type_strategy() -> impl Strategy<Value = PropertyType> {
    property_type_strategy().prop_filter("identifier types excluded", |ty| !ty.is_id())
}

/// Strategy for any consistency level.
pub fn consistency_level_strategy() -> impl Strategy<Value = ConsistencyLevel> {
    prop::sample::select(vec![
        ConsistencyLevel::Any,
        ConsistencyLevel::One,
        ConsistencyLevel::Two,
        ConsistencyLevel::Three,
        ConsistencyLevel::Quorum,
        ConsistencyLevel::LocalQuorum,
        ConsistencyLevel::EachQuorum,
        ConsistencyLevel::All,
    ])
}

/// Strategy for valid field names.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-zA-Z0-9]{0,15}").expect("Invalid regex")
}

/// Strategy for property metadata of `class_name` with a generated type.
pub fn property_meta_strategy(class_name: &'static str) -> impl Strategy<Value = PropertyMeta> {
    (field_name_strategy(), value_property_type_strategy()).prop_map(move |(field, ty)| {
        PropertyMeta::builder(class_name)
            .field(field)
            .property_type(ty)
            .build()
            .expect("generated property metadata is complete")
    })
}

/// Strategy for entity metadata with up to `max_properties` properties.
///
/// The id meta is an `ID` or an `EMBEDDED_ID`; `clustered` is generated.
pub fn entity_meta_strategy(max_properties: usize) -> impl Strategy<Value = EntityMeta> {
    (
        prop::bool::ANY,
        prop::sample::select(vec![PropertyType::Id, PropertyType::EmbeddedId]),
        prop::collection::btree_map(
            field_name_strategy(),
            value_property_type_strategy(),
            0..=max_properties,
        ),
    )
        .prop_map(|(clustered, id_type, fields)| {
            let id = PropertyMeta::builder("GeneratedEntity")
                .field("id")
                .property_type(id_type)
                .value_type("Long")
                .build()
                .expect("generated id metadata is complete");
            fields
                .into_iter()
                .fold(
                    EntityMeta::builder("GeneratedEntity")
                        .id_meta(id)
                        .clustered(clustered),
                    |builder, (field, ty)| {
                        builder.property(Arc::new(
                            PropertyMeta::builder("GeneratedEntity")
                                .field(field)
                                .property_type(ty)
                                .build()
                                .expect("generated property metadata is complete"),
                        ))
                    },
                )
                .build()
                .expect("generated entity metadata is complete")
        })
}

/// Strategy for a backing map with small keys, so operations collide often.
pub fn int_string_map_strategy() -> impl Strategy<Value = HashMap<i32, String>> {
    prop::collection::hash_map(0..16i32, "[a-z]{0,6}", 0..12)
}

/// Strategy for a backing set with small elements.
pub fn string_set_strategy() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set("[a-d]{1,2}", 0..10)
}

/// A mutation applied to a map proxy.
#[derive(Debug, Clone)]
pub enum MapOperation {
    /// `put(key, value)`
    Put {
        /// Key
        key: i32,
        /// Value
        value: String,
    },
    /// `put_all(entries)`
    PutAll {
        /// Entries to copy in
        entries: Vec<(i32, String)>,
    },
    /// `remove(key)`
    Remove {
        /// Key
        key: i32,
    },
    /// `key_set().remove(key)`
    RemoveKey {
        /// Key
        key: i32,
    },
    /// `values().remove(value)`
    RemoveValue {
        /// Value
        value: String,
    },
    /// `retain(|k, _| k % modulus != 0)`
    RetainKeys {
        /// Keys divisible by this are dropped
        modulus: i32,
    },
    /// `clear()`
    Clear,
}

/// Strategy for one map mutation.
pub fn map_operation_strategy() -> impl Strategy<Value = MapOperation> {
    prop_oneof![
        4 => (0..16i32, "[a-z]{0,6}").prop_map(|(key, value)| MapOperation::Put { key, value }),
        2 => prop::collection::vec((0..16i32, "[a-z]{0,6}"), 0..4)
            .prop_map(|entries| MapOperation::PutAll { entries }),
        3 => (0..16i32).prop_map(|key| MapOperation::Remove { key }),
        2 => (0..16i32).prop_map(|key| MapOperation::RemoveKey { key }),
        2 => "[a-z]{0,2}".prop_map(|value| MapOperation::RemoveValue { value }),
        1 => (2..5i32).prop_map(|modulus| MapOperation::RetainKeys { modulus }),
        1 => Just(MapOperation::Clear),
    ]
}

/// Strategy for a sequence of map mutations.
pub fn map_operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<MapOperation>> {
    prop::collection::vec(map_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
