//! Dirty-tracking proxy over a list attribute.

use crate::dirty::DirtyTarget;
use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::mem;
use std::slice;

/// Wraps the backing list of one attribute.
///
/// Appends and positional writes always mark. Removals and bulk operations
/// mark iff they changed the list. Positional calls beyond the end fail
/// with [`CoreError::IndexOutOfBounds`] and leave the registry alone.
pub struct ListProxy<'a, T> {
    list: &'a mut Vec<T>,
    target: DirtyTarget<'a>,
}

impl<'a, T> ListProxy<'a, T> {
    /// Wraps `list`, recording marks through `target`.
    pub fn new(list: &'a mut Vec<T>, target: DirtyTarget<'a>) -> Self {
        Self { list, target }
    }

    /// Returns the dirty target.
    #[must_use]
    pub fn target(&self) -> &DirtyTarget<'a> {
        &self.target
    }

    /// Returns the backing list for reading.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.list.as_slice()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.list.get(index)
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.list.iter()
    }

    /// Appends `value` and marks.
    pub fn push(&mut self, value: T) {
        self.list.push(value);
        self.target.mark();
    }

    /// Inserts `value` at `index` and marks.
    pub fn insert(&mut self, index: usize, value: T) -> CoreResult<()> {
        let len = self.list.len();
        if index > len {
            return Err(CoreError::index_out_of_bounds(index, len));
        }
        self.list.insert(index, value);
        self.target.mark();
        Ok(())
    }

    /// Replaces the element at `index` and marks; returns the old element.
    pub fn set(&mut self, index: usize, value: T) -> CoreResult<T> {
        let len = self.list.len();
        let slot = self
            .list
            .get_mut(index)
            .ok_or_else(|| CoreError::index_out_of_bounds(index, len))?;
        let previous = mem::replace(slot, value);
        self.target.mark();
        Ok(previous)
    }

    /// Removes the element at `index` and marks.
    pub fn remove(&mut self, index: usize) -> CoreResult<T> {
        let len = self.list.len();
        if index >= len {
            return Err(CoreError::index_out_of_bounds(index, len));
        }
        let removed = self.list.remove(index);
        self.target.mark();
        Ok(removed)
    }

    /// Appends every element of `values`; marks once if there was any.
    pub fn extend_from<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.list.len();
        self.list.extend(values);
        self.target.mark_if(self.list.len() != before)
    }

    /// Keeps the elements for which `f` returns true; marks if any was dropped.
    pub fn retain<F>(&mut self, f: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.list.len();
        self.list.retain(f);
        self.target.mark_if(self.list.len() != before)
    }

    /// Shortens the list to `len` elements; marks if it was longer.
    pub fn truncate(&mut self, len: usize) -> bool {
        let before = self.list.len();
        self.list.truncate(len);
        self.target.mark_if(self.list.len() != before)
    }

    /// Removes every element; marks if the list was non-empty.
    pub fn clear(&mut self) {
        let had_elements = !self.list.is_empty();
        self.list.clear();
        self.target.mark_if(had_elements);
    }

    /// Iterates over the elements with proxied, writable slots.
    pub fn iter_mut(&mut self) -> ElementIterMut<'_, T> {
        ElementIterMut {
            inner: self.list.iter_mut(),
            target: &self.target,
        }
    }
}

impl<T: PartialEq> ListProxy<'_, T> {
    /// Returns true if some element equals `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.list.contains(value)
    }

    /// Returns the position of the first element equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.list.iter().position(|candidate| candidate == value)
    }

    /// Removes the first element equal to `value`; marks if there was one.
    pub fn remove_item(&mut self, value: &T) -> bool {
        match self.index_of(value) {
            Some(index) => {
                self.list.remove(index);
                self.target.mark();
                true
            }
            None => false,
        }
    }
}

impl<T: Clone> ListProxy<'_, T> {
    /// Returns a cursor that can remove the element it last yielded.
    pub fn cursor(&mut self) -> ListCursor<'_, T> {
        ListCursor {
            list: &mut *self.list,
            target: &self.target,
            next: 0,
            current: None,
        }
    }
}

impl<T> Extend<T> for ListProxy<'_, T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.extend_from(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for ListProxy<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListProxy")
            .field("attribute", self.target.attribute())
            .field("list", &self.list)
            .finish()
    }
}

/// Cursor over the elements of a list attribute.
///
/// Yields owned elements in list order. [`remove`](Self::remove) deletes the
/// element last yielded, by position, and always marks.
pub struct ListCursor<'c, T> {
    list: &'c mut Vec<T>,
    target: &'c DirtyTarget<'c>,
    next: usize,
    current: Option<usize>,
}

impl<T> ListCursor<'_, T> {
    /// Removes the last yielded element.
    ///
    /// Fails with [`CoreError::NoCurrentElement`] before the first `next`
    /// or when called twice for the same element.
    pub fn remove(&mut self) -> CoreResult<()> {
        let index = self.current.take().ok_or(CoreError::NoCurrentElement)?;
        self.list.remove(index);
        self.next = index;
        self.target.mark();
        Ok(())
    }
}

impl<T: Clone> Iterator for ListCursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let element = self.list.get(self.next).cloned()?;
        self.current = Some(self.next);
        self.next += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

/// Iterator over [`ElementProxy`] items.
pub struct ElementIterMut<'i, T> {
    inner: slice::IterMut<'i, T>,
    target: &'i DirtyTarget<'i>,
}

impl<'i, T> Iterator for ElementIterMut<'i, T> {
    type Item = ElementProxy<'i, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let target = self.target;
        self.inner.next().map(|slot| ElementProxy { slot, target })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// One live slot of a list attribute, obtained by iteration.
pub struct ElementProxy<'i, T> {
    slot: &'i mut T,
    target: &'i DirtyTarget<'i>,
}

impl<T> ElementProxy<'_, T> {
    /// Returns the current element.
    #[must_use]
    pub fn get(&self) -> &T {
        &*self.slot
    }

    /// Replaces the element in the backing list and marks; returns the old one.
    pub fn set(&mut self, value: T) -> T {
        let previous = mem::replace(self.slot, value);
        self.target.mark();
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PropertyType;
    use crate::proxy::testing::{meta, Recorder};

    fn prepare_list() -> Vec<String> {
        vec!["FR".to_string(), "Paris".to_string(), "75014".to_string()]
    }

    #[test]
    fn push_always_marks() {
        let recorder = Recorder::default();
        let meta = meta("friends", PropertyType::List);
        let mut target = Vec::new();
        let mut proxy = ListProxy::new(&mut target, DirtyTarget::for_property(&recorder, &meta));

        proxy.push("FR".to_string());
        proxy.push("FR".to_string());
        assert_eq!(recorder.count(), 2);
        assert_eq!(target, vec!["FR", "FR"]);
    }

    #[test]
    fn positional_writes() {
        let recorder = Recorder::default();
        let meta = meta("friends", PropertyType::List);
        let mut target = prepare_list();
        let mut proxy = ListProxy::new(&mut target, DirtyTarget::for_property(&recorder, &meta));

        proxy.insert(0, "first".to_string()).unwrap();
        assert_eq!(proxy.set(1, "France".to_string()).unwrap(), "FR");
        assert_eq!(proxy.remove(3).unwrap(), "75014");
        assert_eq!(recorder.count(), 3);
        assert_eq!(proxy.as_slice(), ["first", "France", "Paris"]);
    }

    #[test]
    fn out_of_bounds_fails_without_mark() {
        let recorder = Recorder::default();
        let meta = meta("friends", PropertyType::List);
        let mut target = prepare_list();
        let mut proxy = ListProxy::new(&mut target, DirtyTarget::for_property(&recorder, &meta));

        assert_eq!(
            proxy.insert(4, "x".to_string()),
            Err(CoreError::index_out_of_bounds(4, 3))
        );
        assert_eq!(
            proxy.set(3, "x".to_string()),
            Err(CoreError::index_out_of_bounds(3, 3))
        );
        assert_eq!(proxy.remove(7), Err(CoreError::index_out_of_bounds(7, 3)));
        assert_eq!(recorder.count(), 0);
        assert_eq!(proxy.len(), 3);
    }

    #[test]
    fn remove_item_marks_iff_found() {
        let recorder = Recorder::default();
        let meta = meta("friends", PropertyType::List);
        let mut target = prepare_list();
        let mut proxy = ListProxy::new(&mut target, DirtyTarget::for_property(&recorder, &meta));

        assert!(!proxy.remove_item(&"Lyon".to_string()));
        assert_eq!(recorder.count(), 0);

        assert!(proxy.remove_item(&"Paris".to_string()));
        assert_eq!(recorder.count(), 1);
        assert_eq!(proxy.index_of(&"75014".to_string()), Some(1));
    }

    #[test]
    fn bulk_operations_mark_iff_changed() {
        let recorder = Recorder::default();
        let meta = meta("friends", PropertyType::List);
        let mut target = prepare_list();
        let mut proxy = ListProxy::new(&mut target, DirtyTarget::for_property(&recorder, &meta));

        assert!(!proxy.extend_from(Vec::new()));
        assert!(!proxy.truncate(10));
        assert!(!proxy.retain(|_| true));
        assert_eq!(recorder.count(), 0);

        proxy.extend(vec!["Lyon".to_string()]);
        assert!(proxy.truncate(2));
        assert!(proxy.retain(|value| value != "FR"));
        assert_eq!(recorder.count(), 3);

        proxy.clear();
        proxy.clear();
        assert_eq!(recorder.count(), 4);
    }

    #[test]
    fn element_set_marks_and_writes_through() {
        let recorder = Recorder::default();
        let meta = meta("friends", PropertyType::List);
        let mut target = prepare_list();
        let mut proxy = ListProxy::new(&mut target, DirtyTarget::for_property(&recorder, &meta));

        for mut element in proxy.iter_mut() {
            if element.get() == "Paris" {
                element.set("Lyon".to_string());
            }
        }

        assert_eq!(recorder.count(), 1);
        assert_eq!(target[1], "Lyon");
    }

    #[test]
    fn reads_do_not_mark() {
        let recorder = Recorder::default();
        let meta = meta("friends", PropertyType::List);
        let mut target = prepare_list();
        let mut proxy = ListProxy::new(&mut target, DirtyTarget::for_property(&recorder, &meta));

        assert_eq!(proxy.get(0).map(String::as_str), Some("FR"));
        assert!(proxy.contains(&"Paris".to_string()));
        assert_eq!(proxy.iter().count(), 3);
        assert_eq!(proxy.iter_mut().count(), 3);
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn cursor_remove_marks_and_keeps_position() {
        let recorder = Recorder::default();
        let meta = meta("friends", PropertyType::List);
        let mut target = prepare_list();

        {
            let mut proxy =
                ListProxy::new(&mut target, DirtyTarget::for_property(&recorder, &meta));
            let mut cursor = proxy.cursor();
            assert_eq!(cursor.remove(), Err(CoreError::NoCurrentElement));
            assert_eq!(cursor.next().as_deref(), Some("FR"));
            cursor.remove().unwrap();
            assert_eq!(cursor.remove(), Err(CoreError::NoCurrentElement));
            assert_eq!(cursor.next().as_deref(), Some("Paris"));
            assert_eq!(cursor.next().as_deref(), Some("75014"));
            cursor.remove().unwrap();
            assert_eq!(cursor.next(), None);
        }

        assert_eq!(recorder.count(), 2);
        assert_eq!(target, vec!["Paris"]);
    }

    #[test]
    fn cursor_iteration_alone_does_not_mark() {
        let recorder = Recorder::default();
        let meta = meta("friends", PropertyType::List);
        let mut target = prepare_list();
        let mut proxy = ListProxy::new(&mut target, DirtyTarget::for_property(&recorder, &meta));

        assert_eq!(proxy.cursor().count(), 3);
        assert_eq!(recorder.count(), 0);
    }
}
