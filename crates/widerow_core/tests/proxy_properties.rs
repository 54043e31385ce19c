//! Property tests for the mark-iff-changed rule of the proxies.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use widerow_core::{DirtyTarget, ListProxy, MapProxy, PropertyType, SetProxy};
use widerow_testkit::prelude::*;

fn expected_marks(map: &HashMap<i32, String>, op: &MapOperation) -> usize {
    let changed = match op {
        MapOperation::Put { .. } => true,
        MapOperation::PutAll { entries } => !entries.is_empty(),
        MapOperation::Remove { key } | MapOperation::RemoveKey { key } => map.contains_key(key),
        MapOperation::RemoveValue { value } => map.values().any(|v| v == value),
        MapOperation::RetainKeys { modulus } => map.keys().any(|k| k % modulus == 0),
        MapOperation::Clear => !map.is_empty(),
    };
    usize::from(changed)
}

fn apply(proxy: &mut MapProxy<'_, HashMap<i32, String>>, op: &MapOperation) {
    match op {
        MapOperation::Put { key, value } => {
            proxy.put(*key, value.clone());
        }
        MapOperation::PutAll { entries } => {
            proxy.put_all(entries.iter().cloned());
        }
        MapOperation::Remove { key } => {
            proxy.remove(key);
        }
        MapOperation::RemoveKey { key } => {
            proxy.key_set().remove(key);
        }
        MapOperation::RemoveValue { value } => {
            proxy.values_view().remove(value);
        }
        MapOperation::RetainKeys { modulus } => {
            proxy.retain(|k, _| k % modulus != 0);
        }
        MapOperation::Clear => proxy.clear(),
    }
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn map_marks_once_per_changing_mutation(
        initial in int_string_map_strategy(),
        ops in map_operation_sequence_strategy(1, 24),
    ) {
        let listener = RecordingListener::new();
        let meta = property_meta("preferences", PropertyType::Map);
        let mut target = initial;
        let mut proxy = MapProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta));

        for op in &ops {
            let before = listener.count();
            let expected = expected_marks(proxy.backing(), op);
            apply(&mut proxy, op);
            prop_assert_eq!(listener.count() - before, expected, "after {:?}", op);
        }
    }

    #[test]
    fn map_reads_never_mark(initial in int_string_map_strategy(), key in 0..16i32) {
        let listener = RecordingListener::new();
        let meta = property_meta("preferences", PropertyType::Map);
        let mut target = initial.clone();
        let mut proxy = MapProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta));

        let _ = proxy.get(&key);
        let _ = proxy.contains_key(&key);
        let _ = proxy.iter().count();
        let _ = proxy.keys().count();
        let _ = proxy.values().count();
        let _ = proxy.key_set().len();
        let _ = proxy.values_view().is_empty();
        let _ = proxy.entry_set().iter().count();
        let _ = proxy.entry_set().iter_mut().count();
        let _ = proxy.key_set().cursor().count();
        let _ = proxy.entry_set().cursor().count();
        let _ = proxy.values_view().contains(&"a".to_string());
        let _ = proxy.entry_set().contains(&key, &"a".to_string());

        prop_assert_eq!(listener.count(), 0);
        prop_assert_eq!(target, initial);
    }

    #[test]
    fn map_changes_land_in_the_backing_map(
        initial in int_string_map_strategy(),
        key in 0..16i32,
        value in "[a-z]{1,4}",
    ) {
        let listener = RecordingListener::new();
        let meta = property_meta("preferences", PropertyType::Map);
        let expected_previous = initial.get(&key).cloned();
        let mut target = initial;

        let previous = MapProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta))
            .put(key, value.clone());

        prop_assert_eq!(previous, expected_previous);
        prop_assert_eq!(target.get(&key), Some(&value));
        prop_assert_eq!(listener.count(), 1);
    }

    #[test]
    fn set_insert_and_remove_mark_iff_changed(
        initial in string_set_strategy(),
        inserts in prop::collection::vec("[a-d]{1,2}", 0..6),
        removes in prop::collection::vec("[a-d]{1,2}", 0..6),
    ) {
        let listener = RecordingListener::new();
        let meta = property_meta("followers", PropertyType::Set);
        let mut target: HashSet<String> = initial;
        let mut proxy = SetProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta));

        for value in inserts {
            let before = listener.count();
            let fresh = !proxy.contains(&value);
            prop_assert_eq!(proxy.insert(value), fresh);
            prop_assert_eq!(listener.count() - before, usize::from(fresh));
        }
        for value in removes {
            let before = listener.count();
            let present = proxy.contains(&value);
            prop_assert_eq!(proxy.remove(&value), present);
            prop_assert_eq!(listener.count() - before, usize::from(present));
        }
    }

    #[test]
    fn list_clear_marks_iff_non_empty(initial in prop::collection::vec("[a-z]{0,4}", 0..8)) {
        let listener = RecordingListener::new();
        let meta = property_meta("friends", PropertyType::List);
        let was_empty = initial.is_empty();
        let mut target = initial;

        ListProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta)).clear();

        prop_assert!(target.is_empty());
        prop_assert_eq!(listener.count(), usize::from(!was_empty));
    }
}
