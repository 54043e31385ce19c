//! Per-entity dirty registry.

use crate::metadata::PropertyMeta;
use crate::types::AttributeId;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Receives dirty marks from collection proxies.
///
/// Proxies never reach a global map; the owning entity injects a listener
/// and every mutation with an observable effect calls
/// [`mark_dirty`](Self::mark_dirty) once.
pub trait DirtyListener {
    /// Records that `attribute` changed and must be flushed using `meta`.
    fn mark_dirty(&self, attribute: &AttributeId, meta: &Arc<PropertyMeta>);
}

/// Mapping from attribute id to the property metadata responsible for it.
///
/// One entry per dirty attribute; marking the same attribute again
/// overwrites the entry. The flush component reads the registry and then
/// clears it at the flush boundary.
///
/// Marking goes through a shared reference, so a proxy and every view
/// derived from it record into the same registry.
#[derive(Default)]
pub struct DirtyRegistry {
    entries: Mutex<BTreeMap<AttributeId, Arc<PropertyMeta>>>,
}

impl DirtyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the mark for `attribute`.
    pub fn mark(&self, attribute: AttributeId, meta: Arc<PropertyMeta>) {
        tracing::trace!(
            attribute = %attribute,
            property_type = %meta.property_type(),
            "marking attribute dirty"
        );
        self.entries.lock().insert(attribute, meta);
    }

    /// Returns true if `attribute` is marked.
    #[must_use]
    pub fn is_dirty(&self, attribute: &AttributeId) -> bool {
        self.entries.lock().contains_key(attribute)
    }

    /// Returns the metadata recorded for `attribute`.
    #[must_use]
    pub fn get(&self, attribute: &AttributeId) -> Option<Arc<PropertyMeta>> {
        self.entries.lock().get(attribute).cloned()
    }

    /// Returns the number of dirty attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns a copy of the entries, ordered by attribute id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(AttributeId, Arc<PropertyMeta>)> {
        self.entries
            .lock()
            .iter()
            .map(|(id, meta)| (id.clone(), Arc::clone(meta)))
            .collect()
    }

    /// Removes every mark.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        tracing::debug!(count = entries.len(), "clearing dirty registry");
        entries.clear();
    }

    /// Takes every mark, leaving the registry empty.
    #[must_use]
    pub fn drain(&self) -> Vec<(AttributeId, Arc<PropertyMeta>)> {
        let taken = std::mem::take(&mut *self.entries.lock());
        tracing::debug!(count = taken.len(), "draining dirty registry");
        taken.into_iter().collect()
    }
}

impl DirtyListener for DirtyRegistry {
    fn mark_dirty(&self, attribute: &AttributeId, meta: &Arc<PropertyMeta>) {
        self.mark(attribute.clone(), Arc::clone(meta));
    }
}

impl fmt::Debug for DirtyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.entries.lock().keys())
            .finish()
    }
}
