//! Dirty-tracking proxy over a set attribute.

use super::backing::BackingSet;
use super::cursor::Snapshot;
use crate::dirty::DirtyTarget;
use crate::error::CoreResult;
use std::fmt;

/// Wraps the backing set of one attribute.
///
/// Reads are forwarded untouched; a mutation marks the attribute once iff
/// it changed the membership of the set.
pub struct SetProxy<'a, S: BackingSet> {
    set: &'a mut S,
    target: DirtyTarget<'a>,
}

impl<'a, S: BackingSet> SetProxy<'a, S> {
    /// Wraps `set`, recording marks through `target`.
    pub fn new(set: &'a mut S, target: DirtyTarget<'a>) -> Self {
        Self { set, target }
    }

    /// Returns the dirty target.
    #[must_use]
    pub fn target(&self) -> &DirtyTarget<'a> {
        &self.target
    }

    /// Returns the backing set for reading.
    #[must_use]
    pub fn backing(&self) -> &S {
        &*self.set
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns true if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns true if `value` is present.
    #[must_use]
    pub fn contains(&self, value: &S::Item) -> bool {
        self.set.contains(value)
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> S::Iter<'_> {
        self.set.iter()
    }

    /// Adds `value`; marks if it was not present.
    pub fn insert(&mut self, value: S::Item) -> bool {
        let added = self.set.insert(value);
        self.target.mark_if(added)
    }

    /// Adds every element of `values`; marks once if any was new.
    pub fn insert_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = S::Item>,
    {
        let mut added = false;
        for value in values {
            added |= self.set.insert(value);
        }
        self.target.mark_if(added)
    }

    /// Removes `value`; marks if it was present.
    pub fn remove(&mut self, value: &S::Item) -> bool {
        let removed = self.set.remove(value);
        self.target.mark_if(removed)
    }

    /// Keeps the elements for which `f` returns true; marks if any was dropped.
    pub fn retain<F>(&mut self, f: F) -> bool
    where
        F: FnMut(&S::Item) -> bool,
    {
        let before = self.set.len();
        self.set.retain(f);
        self.target.mark_if(self.set.len() != before)
    }

    /// Removes every element; marks if the set was non-empty.
    pub fn clear(&mut self) {
        let had_elements = !self.set.is_empty();
        self.set.clear();
        self.target.mark_if(had_elements);
    }
}

impl<S> SetProxy<'_, S>
where
    S: BackingSet,
    S::Item: Clone,
{
    /// Returns a cursor that can remove the element it last yielded.
    pub fn cursor(&mut self) -> SetCursor<'_, S> {
        let elements = self.set.iter().cloned().collect();
        SetCursor {
            set: &mut *self.set,
            target: &self.target,
            snapshot: Snapshot::new(elements),
        }
    }
}

impl<S: BackingSet> Extend<S::Item> for SetProxy<'_, S> {
    fn extend<I: IntoIterator<Item = S::Item>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<S: BackingSet + fmt::Debug> fmt::Debug for SetProxy<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetProxy")
            .field("attribute", self.target.attribute())
            .field("set", &self.set)
            .finish()
    }
}

/// Cursor over the elements of a set attribute.
///
/// [`remove`](Self::remove) deletes the element last yielded and always marks.
pub struct SetCursor<'c, S: BackingSet> {
    set: &'c mut S,
    target: &'c DirtyTarget<'c>,
    snapshot: Snapshot<S::Item>,
}

impl<S> SetCursor<'_, S>
where
    S: BackingSet,
    S::Item: Clone,
{
    /// Removes the last yielded element.
    pub fn remove(&mut self) -> CoreResult<()> {
        let value = self.snapshot.take_current()?;
        self.set.remove(&value);
        self.target.mark();
        Ok(())
    }
}

impl<S> Iterator for SetCursor<'_, S>
where
    S: BackingSet,
    S::Item: Clone,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        self.snapshot.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.snapshot.remaining();
        (remaining, Some(remaining))
    }
}
