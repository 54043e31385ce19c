//! Helpers for the proxy unit tests.

use crate::dirty::DirtyListener;
use crate::metadata::{PropertyMeta, PropertyType};
use crate::types::AttributeId;
use std::cell::RefCell;
use std::sync::Arc;

/// Records every call, so a test can tell one mark from two.
#[derive(Default)]
pub(crate) struct Recorder {
    marks: RefCell<Vec<AttributeId>>,
}

impl Recorder {
    pub(crate) fn count(&self) -> usize {
        self.marks.borrow().len()
    }

    pub(crate) fn marks(&self) -> Vec<AttributeId> {
        self.marks.borrow().clone()
    }
}

impl DirtyListener for Recorder {
    fn mark_dirty(&self, attribute: &AttributeId, _meta: &Arc<PropertyMeta>) {
        self.marks.borrow_mut().push(attribute.clone());
    }
}

pub(crate) fn meta(field: &str, property_type: PropertyType) -> Arc<PropertyMeta> {
    Arc::new(
        PropertyMeta::builder("CompleteBean")
            .field(field)
            .property_type(property_type)
            .build()
            .unwrap(),
    )
}
