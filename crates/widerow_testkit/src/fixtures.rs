//! Test fixtures: a mapped sample entity and a recording listener.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use widerow_core::{
    AttributeId, Consistency, ConsistencyLevel, DirtyListener, DirtyRegistry, DirtyTarget,
    EntityMeta, FlushPlan, ListProxy, MapProxy, PropertyMeta, PropertyType, SetProxy,
};

/// Class name of the sample entity.
pub const COMPLETE_BEAN: &str = "CompleteBean";

/// Builds property metadata for a field of the sample entity.
pub fn property_meta(field: &str, property_type: PropertyType) -> Arc<PropertyMeta> {
    Arc::new(
        PropertyMeta::builder(COMPLETE_BEAN)
            .field(field)
            .property_type(property_type)
            .build()
            .expect("fixture property metadata is complete"),
    )
}

/// Builds the metadata of the sample entity.
///
/// Fields: `id` (ID), `name` (SIMPLE), `friends` (LIST), `followers` (SET),
/// `preferences` (MAP), `visits` (COUNTER).
pub fn complete_bean_meta() -> EntityMeta {
    EntityMeta::builder(COMPLETE_BEAN)
        .table_name("complete_bean")
        .id_type("Long")
        .id_meta(property_meta("id", PropertyType::Id))
        .property(property_meta("name", PropertyType::Simple))
        .property(property_meta("friends", PropertyType::List))
        .property(property_meta("followers", PropertyType::Set))
        .property(property_meta("preferences", PropertyType::Map))
        .property(property_meta("visits", PropertyType::Counter))
        .consistency(Consistency::uniform(ConsistencyLevel::One))
        .build()
        .expect("fixture entity metadata is complete")
}

/// Sample entity whose getters hand out collection proxies.
pub struct CompleteBean {
    meta: Arc<EntityMeta>,
    dirty: DirtyRegistry,
    id: i64,
    name: String,
    friends: Vec<String>,
    followers: HashSet<String>,
    preferences: HashMap<i32, String>,
    visits: i64,
}

impl CompleteBean {
    /// Creates a loaded, clean instance.
    pub fn new(id: i64, meta: Arc<EntityMeta>) -> Self {
        Self {
            meta,
            dirty: DirtyRegistry::new(),
            id,
            name: String::new(),
            friends: Vec::new(),
            followers: HashSet::new(),
            preferences: HashMap::new(),
            visits: 0,
        }
    }

    /// Creates an instance whose preferences hold `{1: "FR", 2: "Paris", 3: "75014"}`.
    pub fn with_preferences(id: i64, meta: Arc<EntityMeta>) -> Self {
        let mut bean = Self::new(id, meta);
        bean.preferences = HashMap::from([
            (1, "FR".to_string()),
            (2, "Paris".to_string()),
            (3, "75014".to_string()),
        ]);
        bean
    }

    fn meta_of(&self, field: &str) -> &Arc<PropertyMeta> {
        self.meta
            .property_meta(field)
            .expect("fixture field is mapped")
    }

    /// Returns the id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the name and marks it dirty.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        let meta = Arc::clone(self.meta_of("name"));
        self.dirty.mark(meta.attribute_id().clone(), meta);
    }

    /// Returns the visit counter.
    pub fn visits(&self) -> i64 {
        self.visits
    }

    /// Adds `delta` to the visit counter and marks it dirty.
    pub fn incr_visits(&mut self, delta: i64) {
        self.visits += delta;
        let meta = Arc::clone(self.meta_of("visits"));
        self.dirty.mark(meta.attribute_id().clone(), meta);
    }

    /// Returns the friends list proxy.
    pub fn friends(&mut self) -> ListProxy<'_, String> {
        let meta = self.meta.property_meta("friends").expect("fixture field is mapped");
        ListProxy::new(
            &mut self.friends,
            DirtyTarget::for_property(&self.dirty, meta),
        )
    }

    /// Returns the followers set proxy.
    pub fn followers(&mut self) -> SetProxy<'_, HashSet<String>> {
        let meta = self.meta.property_meta("followers").expect("fixture field is mapped");
        SetProxy::new(
            &mut self.followers,
            DirtyTarget::for_property(&self.dirty, meta),
        )
    }

    /// Returns the preferences map proxy.
    pub fn preferences(&mut self) -> MapProxy<'_, HashMap<i32, String>> {
        let meta = self.meta.property_meta("preferences").expect("fixture field is mapped");
        MapProxy::new(
            &mut self.preferences,
            DirtyTarget::for_property(&self.dirty, meta),
        )
    }

    /// Returns the raw preferences, bypassing the proxy.
    pub fn raw_preferences(&self) -> &HashMap<i32, String> {
        &self.preferences
    }

    /// Returns the dirty registry of this instance.
    pub fn dirty(&self) -> &DirtyRegistry {
        &self.dirty
    }

    /// Plans the flush and clears the registry.
    pub fn flush(&self) -> FlushPlan {
        FlushPlan::drain(&self.meta, &self.dirty)
    }
}

/// A listener that keeps every mark, duplicates included.
///
/// Where [`DirtyRegistry`] collapses repeated marks, this records each call
/// so tests can assert "exactly one mark".
#[derive(Default)]
pub struct RecordingListener {
    marks: Mutex<Vec<(AttributeId, Arc<PropertyMeta>)>>,
}

impl RecordingListener {
    /// Creates an empty listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of marks received.
    pub fn count(&self) -> usize {
        self.marks.lock().len()
    }

    /// Returns the number of marks received for `attribute`.
    pub fn count_for(&self, attribute: &AttributeId) -> usize {
        self.marks
            .lock()
            .iter()
            .filter(|(id, _)| id == attribute)
            .count()
    }

    /// Returns the attribute ids marked, in call order.
    pub fn attributes(&self) -> Vec<AttributeId> {
        self.marks.lock().iter().map(|(id, _)| id.clone()).collect()
    }

    /// Forgets every mark.
    pub fn reset(&self) {
        self.marks.lock().clear();
    }
}

impl DirtyListener for RecordingListener {
    fn mark_dirty(&self, attribute: &AttributeId, meta: &Arc<PropertyMeta>) {
        self.marks
            .lock()
            .push((attribute.clone(), Arc::clone(meta)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_meta_is_consistent() {
        let meta = complete_bean_meta();
        assert_eq!(meta.property_metas().len(), 5);
        assert!(!meta.is_valueless());
        assert!(!meta.is_clustered_counter());
        assert!(meta.has_counter());
    }

    #[test]
    fn getters_mark_the_owning_attribute() {
        let mut bean = CompleteBean::new(1, Arc::new(complete_bean_meta()));
        bean.friends().push("alice".to_string());
        bean.followers().insert("bob".to_string());

        assert_eq!(bean.dirty().len(), 2);
        assert!(bean
            .dirty()
            .is_dirty(&AttributeId::for_field(COMPLETE_BEAN, "friends")));
    }

    #[test]
    fn recording_listener_keeps_duplicates() {
        let listener = RecordingListener::new();
        let meta = property_meta("friends", PropertyType::List);
        listener.mark_dirty(meta.attribute_id(), &meta);
        listener.mark_dirty(meta.attribute_id(), &meta);

        assert_eq!(listener.count(), 2);
        assert_eq!(listener.count_for(meta.attribute_id()), 2);
        listener.reset();
        assert_eq!(listener.count(), 0);
    }
}
