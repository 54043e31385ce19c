//! Capability traits over the collections a proxy can wrap.

use std::collections::{btree_map, hash_map, BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

/// A key/value collection that a [`MapProxy`](super::MapProxy) can wrap.
///
/// Implemented for `HashMap` and `BTreeMap`.
pub trait BackingMap {
    /// Key type.
    type Key;

    /// Value type.
    type Value;

    /// Iterator over shared entries.
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// Iterator over entries with mutable values.
    type IterMut<'a>: Iterator<Item = (&'a Self::Key, &'a mut Self::Value)>
    where
        Self: 'a;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns true if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value stored under `key`.
    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Returns true if `key` is present.
    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, returning the previous value.
    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    /// Removes `key`, returning its value.
    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Keeps only the entries for which `f` returns true.
    fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Self::Key, &mut Self::Value) -> bool;

    /// Iterates over the entries.
    fn iter(&self) -> Self::Iter<'_>;

    /// Iterates over the entries with mutable values.
    fn iter_mut(&mut self) -> Self::IterMut<'_>;
}

impl<K, V, S> BackingMap for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    type Iter<'a>
        = hash_map::Iter<'a, K, V>
    where
        Self: 'a;

    type IterMut<'a>
        = hash_map::IterMut<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        HashMap::retain(self, f);
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashMap::iter(self)
    }

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        HashMap::iter_mut(self)
    }
}

impl<K, V> BackingMap for BTreeMap<K, V>
where
    K: Ord,
{
    type Key = K;
    type Value = V;

    type Iter<'a>
        = btree_map::Iter<'a, K, V>
    where
        Self: 'a;

    type IterMut<'a>
        = btree_map::IterMut<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        BTreeMap::retain(self, f);
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        BTreeMap::iter_mut(self)
    }
}

/// A unique-element collection that a [`SetProxy`](super::SetProxy) can wrap.
///
/// Implemented for `HashSet` and `BTreeSet`.
pub trait BackingSet {
    /// Element type.
    type Item;

    /// Iterator over the elements.
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns true if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `value` is present.
    fn contains(&self, value: &Self::Item) -> bool;

    /// Adds `value`, returning true if it was not present.
    fn insert(&mut self, value: Self::Item) -> bool;

    /// Removes `value`, returning true if it was present.
    fn remove(&mut self, value: &Self::Item) -> bool;

    /// Removes every element.
    fn clear(&mut self);

    /// Keeps only the elements for which `f` returns true.
    fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Self::Item) -> bool;

    /// Iterates over the elements.
    fn iter(&self) -> Self::Iter<'_>;
}

impl<T, S> BackingSet for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    type Item = T;

    type Iter<'a>
        = std::collections::hash_set::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn insert(&mut self, value: T) -> bool {
        HashSet::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        HashSet::remove(self, value)
    }

    fn clear(&mut self) {
        HashSet::clear(self);
    }

    fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        HashSet::retain(self, f);
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashSet::iter(self)
    }
}

impl<T> BackingSet for BTreeSet<T>
where
    T: Ord,
{
    type Item = T;

    type Iter<'a>
        = std::collections::btree_set::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        BTreeSet::contains(self, value)
    }

    fn insert(&mut self, value: T) -> bool {
        BTreeSet::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        BTreeSet::remove(self, value)
    }

    fn clear(&mut self) {
        BTreeSet::clear(self);
    }

    fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        BTreeSet::retain(self, f);
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeSet::iter(self)
    }
}
