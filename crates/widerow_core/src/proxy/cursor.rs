//! Snapshot bookkeeping shared by the removing cursors.

use crate::error::{CoreError, CoreResult};
use std::vec;

/// Elements still to yield, plus the last one yielded.
///
/// A cursor takes a snapshot of the keys (or elements) when it is created,
/// so that the backing collection stays free for removals between calls to
/// `next`.
#[derive(Debug)]
pub(crate) struct Snapshot<T> {
    pending: vec::IntoIter<T>,
    current: Option<T>,
}

impl<T: Clone> Snapshot<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            pending: items.into_iter(),
            current: None,
        }
    }

    pub(crate) fn advance(&mut self) -> Option<T> {
        let next = self.pending.next();
        self.current.clone_from(&next);
        next
    }

    /// Takes the last yielded element; a second call fails until the next advance.
    pub(crate) fn take_current(&mut self) -> CoreResult<T> {
        self.current.take().ok_or(CoreError::NoCurrentElement)
    }

    pub(crate) fn remaining(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_requires_advance() {
        let mut snapshot = Snapshot::new(vec![1, 2]);
        assert_eq!(snapshot.take_current(), Err(CoreError::NoCurrentElement));

        assert_eq!(snapshot.advance(), Some(1));
        assert_eq!(snapshot.take_current(), Ok(1));
        assert_eq!(snapshot.take_current(), Err(CoreError::NoCurrentElement));
        assert_eq!(snapshot.remaining(), 1);
    }
}
