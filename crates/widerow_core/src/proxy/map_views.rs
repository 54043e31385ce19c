//! Key, value and entry views of a [`MapProxy`](super::MapProxy).
//!
//! Each view borrows the backing map and the dirty target of the proxy it
//! came from; none of them copies either.

use super::backing::BackingMap;
use super::cursor::Snapshot;
use crate::dirty::DirtyTarget;
use crate::error::{CoreError, CoreResult};
use std::mem;

/// Proxied view of the keys of a map attribute.
pub struct KeySet<'p, M: BackingMap> {
    map: &'p mut M,
    target: &'p DirtyTarget<'p>,
}

impl<'p, M: BackingMap> KeySet<'p, M> {
    pub(crate) fn new(map: &'p mut M, target: &'p DirtyTarget<'p>) -> Self {
        Self { map, target }
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &M::Key) -> bool {
        self.map.contains_key(key)
    }

    /// Iterates over the keys.
    pub fn iter(&self) -> impl Iterator<Item = &M::Key> + '_ {
        self.map.iter().map(|(key, _)| key)
    }

    /// Removes `key` and its value; marks if it was present.
    pub fn remove(&mut self, key: &M::Key) -> bool {
        self.target.mark_if(self.map.remove(key).is_some())
    }

    /// Keeps the keys for which `f` returns true; marks if any was dropped.
    pub fn retain<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(&M::Key) -> bool,
    {
        let before = self.map.len();
        self.map.retain(|key, _| f(key));
        self.target.mark_if(self.map.len() != before)
    }

    /// Removes every entry; marks if the map was non-empty.
    pub fn clear(&mut self) {
        let had_entries = !self.map.is_empty();
        self.map.clear();
        self.target.mark_if(had_entries);
    }
}

impl<M> KeySet<'_, M>
where
    M: BackingMap,
    M::Key: Clone,
{
    /// Returns a cursor that can remove the key it last yielded.
    pub fn cursor(&mut self) -> KeyCursor<'_, M> {
        let keys = self.map.iter().map(|(key, _)| key.clone()).collect();
        KeyCursor {
            map: &mut *self.map,
            target: self.target,
            snapshot: Snapshot::new(keys),
        }
    }
}

/// Cursor over the keys of a map attribute.
///
/// Yields owned keys. [`remove`](Self::remove) deletes the key returned by
/// the last call to `next` from the backing map and always marks.
pub struct KeyCursor<'c, M: BackingMap> {
    map: &'c mut M,
    target: &'c DirtyTarget<'c>,
    snapshot: Snapshot<M::Key>,
}

impl<M> KeyCursor<'_, M>
where
    M: BackingMap,
    M::Key: Clone,
{
    /// Removes the last yielded key.
    ///
    /// Fails with [`CoreError::NoCurrentElement`] before the first `next`
    /// or when called twice for the same key.
    pub fn remove(&mut self) -> CoreResult<()> {
        let key = self.snapshot.take_current()?;
        self.map.remove(&key);
        self.target.mark();
        Ok(())
    }
}

impl<M> Iterator for KeyCursor<'_, M>
where
    M: BackingMap,
    M::Key: Clone,
{
    type Item = M::Key;

    fn next(&mut self) -> Option<M::Key> {
        self.snapshot.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.snapshot.remaining();
        (remaining, Some(remaining))
    }
}

/// Proxied view of the values of a map attribute.
pub struct Values<'p, M: BackingMap> {
    map: &'p mut M,
    target: &'p DirtyTarget<'p>,
}

impl<'p, M: BackingMap> Values<'p, M> {
    pub(crate) fn new(map: &'p mut M, target: &'p DirtyTarget<'p>) -> Self {
        Self { map, target }
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the values.
    pub fn iter(&self) -> impl Iterator<Item = &M::Value> + '_ {
        self.map.iter().map(|(_, value)| value)
    }

    /// Keeps the values for which `f` returns true; marks if any was dropped.
    pub fn retain<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(&M::Value) -> bool,
    {
        let before = self.map.len();
        self.map.retain(|_, value| f(value));
        self.target.mark_if(self.map.len() != before)
    }

    /// Removes every entry; marks if the map was non-empty.
    pub fn clear(&mut self) {
        let had_entries = !self.map.is_empty();
        self.map.clear();
        self.target.mark_if(had_entries);
    }
}

impl<M> Values<'_, M>
where
    M: BackingMap,
    M::Value: PartialEq,
{
    /// Returns true if some entry holds `value`.
    #[must_use]
    pub fn contains(&self, value: &M::Value) -> bool {
        self.map.iter().any(|(_, candidate)| candidate == value)
    }
}

impl<M> Values<'_, M>
where
    M: BackingMap,
    M::Key: Clone,
    M::Value: PartialEq,
{
    /// Removes one entry holding `value`; marks if there was one.
    ///
    /// When several entries hold `value`, which one goes is up to the
    /// iteration order of the backing map.
    pub fn remove(&mut self, value: &M::Value) -> bool {
        let key = self
            .map
            .iter()
            .find(|(_, candidate)| *candidate == value)
            .map(|(key, _)| key.clone());
        match key {
            Some(key) => {
                self.map.remove(&key);
                self.target.mark();
                true
            }
            None => false,
        }
    }
}

/// Proxied view of the entries of a map attribute.
pub struct EntrySet<'p, M: BackingMap> {
    map: &'p mut M,
    target: &'p DirtyTarget<'p>,
}

impl<'p, M: BackingMap> EntrySet<'p, M> {
    pub(crate) fn new(map: &'p mut M, target: &'p DirtyTarget<'p>) -> Self {
        Self { map, target }
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

    /// Iterates over the entries.
    pub fn iter(&self) -> M::Iter<'_> {
        self.map.iter()
    }

    /// Always fails: a detached entry has no dirty target.
    ///
    /// Insert through [`MapProxy::put`](super::MapProxy::put) instead.
    pub fn add(&mut self, _entry: (M::Key, M::Value)) -> CoreResult<()> {
        Err(CoreError::unsupported_mutation("entry_set.add"))
    }

    /// Keeps the entries for which `f` returns true; marks if any was dropped.
    pub fn retain<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(&M::Key, &M::Value) -> bool,
    {
        let before = self.map.len();
        self.map.retain(|key, value| f(key, value));
        self.target.mark_if(self.map.len() != before)
    }

    /// Removes every entry; marks if the map was non-empty.
    pub fn clear(&mut self) {
        let had_entries = !self.map.is_empty();
        self.map.clear();
        self.target.mark_if(had_entries);
    }

    /// Iterates over the entries with proxied, writable values.
    pub fn iter_mut(&mut self) -> EntryIterMut<'_, M> {
        EntryIterMut {
            inner: self.map.iter_mut(),
            target: self.target,
        }
    }
}

impl<M> EntrySet<'_, M>
where
    M: BackingMap,
    M::Value: PartialEq,
{
    /// Returns true if `key` is present and holds `value`.
    #[must_use]
    pub fn contains(&self, key: &M::Key, value: &M::Value) -> bool {
        self.map.get(key).is_some_and(|current| current == value)
    }

    /// Removes the entry if `key` holds `value`; marks if it did.
    pub fn remove(&mut self, key: &M::Key, value: &M::Value) -> bool {
        if !self.contains(key, value) {
            return false;
        }
        self.map.remove(key);
        self.target.mark();
        true
    }
}

impl<M> EntrySet<'_, M>
where
    M: BackingMap,
    M::Key: Clone,
    M::Value: Clone,
{
    /// Returns a cursor that can remove the entry it last yielded.
    pub fn cursor(&mut self) -> EntryCursor<'_, M> {
        let entries = self
            .map
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        EntryCursor {
            map: &mut *self.map,
            target: self.target,
            snapshot: Snapshot::new(entries),
        }
    }
}

/// Iterator over [`EntryProxy`] items.
pub struct EntryIterMut<'i, M: BackingMap + 'i> {
    inner: M::IterMut<'i>,
    target: &'i DirtyTarget<'i>,
}

impl<'i, M: BackingMap + 'i> Iterator for EntryIterMut<'i, M> {
    type Item = EntryProxy<'i, M::Key, M::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let target = self.target;
        self.inner
            .next()
            .map(|(key, value)| EntryProxy { key, value, target })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// One live entry of a map attribute, obtained by iteration.
pub struct EntryProxy<'i, K, V> {
    key: &'i K,
    value: &'i mut V,
    target: &'i DirtyTarget<'i>,
}

impl<K, V> EntryProxy<'_, K, V> {
    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &K {
        self.key
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> &V {
        &*self.value
    }

    /// Replaces the value in the backing map and marks; returns the old value.
    pub fn set_value(&mut self, value: V) -> V {
        let previous = mem::replace(self.value, value);
        self.target.mark();
        previous
    }
}

/// Cursor over the entries of a map attribute.
///
/// Yields owned `(key, value)` pairs. [`remove`](Self::remove) deletes the
/// entry last yielded and always marks.
pub struct EntryCursor<'c, M: BackingMap> {
    map: &'c mut M,
    target: &'c DirtyTarget<'c>,
    snapshot: Snapshot<(M::Key, M::Value)>,
}

impl<M> EntryCursor<'_, M>
where
    M: BackingMap,
    M::Key: Clone,
    M::Value: Clone,
{
    /// Removes the last yielded entry.
    pub fn remove(&mut self) -> CoreResult<()> {
        let (key, _) = self.snapshot.take_current()?;
        self.map.remove(&key);
        self.target.mark();
        Ok(())
    }
}

impl<M> Iterator for EntryCursor<'_, M>
where
    M: BackingMap,
    M::Key: Clone,
    M::Value: Clone,
{
    type Item = (M::Key, M::Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.snapshot.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.snapshot.remaining();
        (remaining, Some(remaining))
    }
}
