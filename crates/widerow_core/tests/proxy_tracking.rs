//! Integration tests driving proxies through an entity's getters.

use std::collections::HashMap;
use std::sync::Arc;
use widerow_core::{
    AttributeId, CoreError, DirtyTarget, ListProxy, MapProxy, PropertyType, WriteKind,
};
use widerow_testkit::{complete_bean_meta, property_meta, CompleteBean, RecordingListener};

fn bean() -> CompleteBean {
    CompleteBean::with_preferences(1, Arc::new(complete_bean_meta()))
}

fn preferences_id() -> AttributeId {
    AttributeId::for_field("CompleteBean", "preferences")
}

fn prepare_map() -> HashMap<i32, String> {
    HashMap::from([
        (1, "FR".to_string()),
        (2, "Paris".to_string()),
        (3, "75014".to_string()),
    ])
}

#[test]
fn clear_empties_the_map_with_one_mark() {
    let listener = RecordingListener::new();
    let meta = property_meta("preferences", PropertyType::Map);
    let mut target = prepare_map();

    MapProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta)).clear();

    assert!(target.is_empty());
    assert_eq!(listener.count(), 1);
    assert_eq!(listener.count_for(&preferences_id()), 1);
}

#[test]
fn remove_of_absent_key_does_not_mark() {
    let listener = RecordingListener::new();
    let meta = property_meta("preferences", PropertyType::Map);
    let mut target = prepare_map();

    let removed = MapProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta)).remove(&10);

    assert_eq!(removed, None);
    assert_eq!(listener.count(), 0);
    assert_eq!(target.len(), 3);
}

#[test]
fn entry_set_value_writes_through_with_one_mark() {
    let listener = RecordingListener::new();
    let meta = property_meta("preferences", PropertyType::Map);
    let mut target = prepare_map();

    let key = {
        let mut proxy = MapProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta));
        let mut entries = proxy.entry_set();
        let mut iter = entries.iter_mut();
        let mut entry = iter.next().expect("map is not empty");
        entry.set_value("x".to_string());
        *entry.key()
    };

    assert_eq!(listener.count(), 1);
    assert_eq!(target[&key], "x");
}

#[test]
fn entry_set_add_is_rejected() {
    let listener = RecordingListener::new();
    let meta = property_meta("preferences", PropertyType::Map);
    let mut target = prepare_map();

    let result = {
        let mut proxy = MapProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta));
        let mut entries = proxy.entry_set();
        entries.add((4, "Lyon".to_string()))
    };

    assert!(matches!(result, Err(CoreError::UnsupportedMutation { .. })));
    assert_eq!(listener.count(), 0);
    assert_eq!(target.len(), 3);
}

#[test]
fn cursor_remove_before_next_fails() {
    let listener = RecordingListener::new();
    let meta = property_meta("preferences", PropertyType::Map);
    let mut target = prepare_map();

    {
        let mut proxy = MapProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta));
        let mut keys = proxy.key_set();
        let first = {
            let mut cursor = keys.cursor();
            assert_eq!(cursor.remove(), Err(CoreError::NoCurrentElement));
            let first = cursor.next().expect("map is not empty");
            cursor.remove().expect("current element exists");
            assert_eq!(cursor.remove(), Err(CoreError::NoCurrentElement));
            first
        };
        assert!(!keys.contains(&first));
    }

    assert_eq!(listener.count(), 1);
    assert_eq!(target.len(), 2);
}

#[test]
fn getters_share_the_entity_registry() {
    let mut bean = bean();

    assert_eq!(bean.preferences().get(&1).map(String::as_str), Some("FR"));
    assert!(bean.dirty().is_empty());

    bean.preferences().put(4, "Lyon".to_string());
    bean.preferences().key_set().remove(&1);
    bean.preferences().values_view().remove(&"Paris".to_string());

    assert_eq!(bean.dirty().len(), 1);
    assert!(bean.dirty().is_dirty(&preferences_id()));
    assert_eq!(bean.raw_preferences().len(), 2);
}

#[test]
fn unchanged_mutations_leave_entity_clean() {
    let mut bean = bean();

    bean.preferences().put_all(Vec::new());
    bean.preferences().remove(&42);
    bean.preferences().retain(|_, _| true);
    bean.friends().clear();
    bean.followers().remove(&"nobody".to_string());
    assert!(bean.friends().remove(0).is_err());

    assert!(bean.dirty().is_empty());
    assert!(bean.flush().is_empty());
}

#[test]
fn flush_classifies_and_drains() {
    let mut bean = bean();
    bean.set_name("DuyHai");
    bean.incr_visits(3);
    bean.friends().push("alice".to_string());
    bean.followers().insert("bob".to_string());
    bean.preferences().clear();

    let plan = bean.flush();

    assert_eq!(plan.class_name(), "CompleteBean");
    assert_eq!(plan.len(), 5);
    assert_eq!(plan.of_kind(WriteKind::CollectionOverwrite).count(), 3);
    assert_eq!(plan.of_kind(WriteKind::ValueOverwrite).count(), 1);
    assert_eq!(plan.of_kind(WriteKind::CounterDelta).count(), 1);
    assert_eq!(plan.of_kind(WriteKind::ClusteredCounter).count(), 0);
    assert!(bean.dirty().is_empty());
    assert_eq!(bean.name(), "DuyHai");
    assert_eq!(bean.visits(), 3);
}

#[test]
fn marks_after_flush_start_a_new_plan() {
    let mut bean = bean();
    bean.friends().push("alice".to_string());
    assert_eq!(bean.flush().len(), 1);

    bean.friends().push("carol".to_string());
    let plan = bean.flush();
    let attributes: Vec<_> = plan
        .writes()
        .iter()
        .map(|write| write.attribute.as_str())
        .collect();

    assert_eq!(attributes, vec!["CompleteBean.friends"]);
}

#[test]
fn views_mark_the_owning_attribute() {
    let listener = RecordingListener::new();
    let meta = property_meta("preferences", PropertyType::Map);
    let mut target = prepare_map();

    {
        let mut proxy = MapProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta));
        proxy.key_set().remove(&1);
        proxy.values_view().remove(&"Paris".to_string());
        proxy.entry_set().remove(&3, &"75014".to_string());
    }

    assert_eq!(listener.attributes(), vec![preferences_id(); 3]);
    assert!(target.is_empty());
}

#[test]
fn list_cursor_removes_through_the_entity() {
    let mut bean = bean();
    bean.friends().extend_from(["alice", "bob", "carol"].map(String::from));
    bean.flush();

    {
        let mut friends = bean.friends();
        let mut cursor = friends.cursor();
        while let Some(friend) = cursor.next() {
            if friend != "bob" {
                cursor.remove().expect("current element exists");
            }
        }
    }

    assert_eq!(bean.friends().as_slice(), ["bob"]);
    assert_eq!(bean.dirty().len(), 1);
    assert!(bean
        .dirty()
        .is_dirty(&AttributeId::for_field("CompleteBean", "friends")));
}

#[test]
fn list_cursor_remove_requires_next() {
    let listener = RecordingListener::new();
    let meta = property_meta("friends", PropertyType::List);
    let mut target = vec!["alice".to_string()];

    {
        let mut proxy = ListProxy::new(&mut target, DirtyTarget::for_property(&listener, &meta));
        let mut cursor = proxy.cursor();
        assert_eq!(cursor.remove(), Err(CoreError::NoCurrentElement));
    }

    assert_eq!(listener.count(), 0);
    assert_eq!(target.len(), 1);
}
