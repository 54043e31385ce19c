//! Dirty-tracking proxy over a map attribute.

use super::backing::BackingMap;
use super::map_views::{EntrySet, KeySet, Values};
use crate::dirty::DirtyTarget;
use std::fmt;

/// Wraps the backing map of one attribute.
///
/// Reads are forwarded untouched. Each mutation runs against the backing
/// map and marks the attribute dirty once if it changed the contents:
///
/// | operation | marks when |
/// |---|---|
/// | [`put`](Self::put) | always |
/// | [`put_all`](Self::put_all) | the source yielded at least one entry |
/// | [`remove`](Self::remove) | the key was present |
/// | [`clear`](Self::clear) | the map was non-empty |
/// | [`retain`](Self::retain) | at least one entry was dropped |
///
/// The [`key_set`](Self::key_set), [`values_view`](Self::values_view) and
/// [`entry_set`](Self::entry_set) views borrow this proxy's target, so
/// marks made through them land on the same attribute.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use widerow_core::{DirtyRegistry, DirtyTarget, MapProxy, PropertyMeta, PropertyType};
///
/// let meta = Arc::new(
///     PropertyMeta::builder("User")
///         .field("preferences")
///         .property_type(PropertyType::Map)
///         .build()
///         .unwrap(),
/// );
/// let registry = DirtyRegistry::new();
/// let mut preferences: HashMap<i32, String> = HashMap::new();
///
/// let mut proxy = MapProxy::new(&mut preferences, DirtyTarget::for_property(&registry, &meta));
/// assert!(proxy.remove(&10).is_none());
/// assert!(registry.is_empty());
///
/// proxy.put(1, "FR".to_string());
/// assert!(registry.is_dirty(meta.attribute_id()));
/// ```
pub struct MapProxy<'a, M: BackingMap> {
    map: &'a mut M,
    target: DirtyTarget<'a>,
}

impl<'a, M: BackingMap> MapProxy<'a, M> {
    /// Wraps `map`, recording marks through `target`.
    pub fn new(map: &'a mut M, target: DirtyTarget<'a>) -> Self {
        Self { map, target }
    }

    /// Returns the dirty target.
    #[must_use]
    pub fn target(&self) -> &DirtyTarget<'a> {
        &self.target
    }

    /// Returns the backing map for reading.
    #[must_use]
    pub fn backing(&self) -> &M {
        &*self.map
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &M::Key) -> Option<&M::Value> {
        self.map.get(key)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &M::Key) -> bool {
        self.map.contains_key(key)
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> M::Iter<'_> {
        self.map.iter()
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &M::Key> + '_ {
        self.map.iter().map(|(key, _)| key)
    }

    /// Iterates over the values.
    pub fn values(&self) -> impl Iterator<Item = &M::Value> + '_ {
        self.map.iter().map(|(_, value)| value)
    }

    /// Stores `value` under `key` and marks the attribute.
    pub fn put(&mut self, key: M::Key, value: M::Value) -> Option<M::Value> {
        let previous = self.map.insert(key, value);
        self.target.mark();
        previous
    }

    /// Stores every entry of `entries`; marks once if there was any.
    pub fn put_all<I>(&mut self, entries: I) -> bool
    where
        I: IntoIterator<Item = (M::Key, M::Value)>,
    {
        let mut written = false;
        for (key, value) in entries {
            self.map.insert(key, value);
            written = true;
        }
        self.target.mark_if(written)
    }

    /// Removes `key`; marks if it was present.
    pub fn remove(&mut self, key: &M::Key) -> Option<M::Value> {
        let removed = self.map.remove(key);
        self.target.mark_if(removed.is_some());
        removed
    }

    /// Removes every entry; marks if the map was non-empty.
    pub fn clear(&mut self) {
        let had_entries = !self.map.is_empty();
        self.map.clear();
        self.target.mark_if(had_entries);
    }

    /// Keeps the entries for which `f` returns true; marks if any was dropped.
    pub fn retain<F>(&mut self, f: F) -> bool
    where
        F: FnMut(&M::Key, &mut M::Value) -> bool,
    {
        let before = self.map.len();
        self.map.retain(f);
        self.target.mark_if(self.map.len() != before)
    }

    /// Returns a proxied view of the keys.
    pub fn key_set(&mut self) -> KeySet<'_, M> {
        KeySet::new(&mut *self.map, &self.target)
    }

    /// Returns a proxied view of the values.
    pub fn values_view(&mut self) -> Values<'_, M> {
        Values::new(&mut *self.map, &self.target)
    }

    /// Returns a proxied view of the entries.
    pub fn entry_set(&mut self) -> EntrySet<'_, M> {
        EntrySet::new(&mut *self.map, &self.target)
    }
}

impl<M: BackingMap> Extend<(M::Key, M::Value)> for MapProxy<'_, M> {
    fn extend<I: IntoIterator<Item = (M::Key, M::Value)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<M: BackingMap + fmt::Debug> fmt::Debug for MapProxy<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapProxy")
            .field("attribute", self.target.attribute())
            .field("map", &self.map)
            .finish()
    }
}
