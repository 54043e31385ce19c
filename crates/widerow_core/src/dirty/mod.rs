//! Dirty tracking.
//!
//! A [`DirtyRegistry`] belongs to one entity instance. Collection proxies
//! mark it through a [`DirtyTarget`]; the flush component reads it and
//! clears it at the flush boundary.

mod registry;
mod target;

pub use registry::{DirtyListener, DirtyRegistry};
pub use target::DirtyTarget;
