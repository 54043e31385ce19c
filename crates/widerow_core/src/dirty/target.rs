//! The dirty target shared by a proxy and its views.

use super::registry::DirtyListener;
use crate::metadata::PropertyMeta;
use crate::types::AttributeId;
use std::fmt;
use std::sync::Arc;

/// Where a collection proxy records its marks.
///
/// Bundles the listener of the owning entity with the attribute id and the
/// property metadata of the wrapped attribute. A proxy owns one target;
/// its views and cursors borrow it, so every mark from any of them lands
/// on the same attribute.
#[derive(Clone)]
pub struct DirtyTarget<'a> {
    listener: &'a dyn DirtyListener,
    attribute: AttributeId,
    meta: Arc<PropertyMeta>,
}

impl<'a> DirtyTarget<'a> {
    /// Creates a target for an explicit attribute id.
    pub fn new(
        listener: &'a dyn DirtyListener,
        attribute: AttributeId,
        meta: Arc<PropertyMeta>,
    ) -> Self {
        Self {
            listener,
            attribute,
            meta,
        }
    }

    /// Creates a target keyed by the attribute id recorded in `meta`.
    pub fn for_property(listener: &'a dyn DirtyListener, meta: &Arc<PropertyMeta>) -> Self {
        Self::new(listener, meta.attribute_id().clone(), Arc::clone(meta))
    }

    /// Returns the attribute id.
    #[must_use]
    pub fn attribute(&self) -> &AttributeId {
        &self.attribute
    }

    /// Returns the property metadata.
    #[must_use]
    pub fn meta(&self) -> &Arc<PropertyMeta> {
        &self.meta
    }

    /// Records one mark.
    pub fn mark(&self) {
        self.listener.mark_dirty(&self.attribute, &self.meta);
    }

    /// Records one mark if `changed` holds, and passes `changed` through.
    pub fn mark_if(&self, changed: bool) -> bool {
        if changed {
            self.mark();
        }
        changed
    }
}

impl fmt::Debug for DirtyTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirtyTarget")
            .field("attribute", &self.attribute)
            .field("property_type", &self.meta.property_type())
            .finish()
    }
}
