//! Entity and property metadata.
//!
//! Metadata is assembled once by the mapping introspection step through
//! [`EntityMetaBuilder`] and [`PropertyMetaBuilder`], then only read by
//! collection proxies and flush logic.

mod entity;
mod property;

pub use entity::{EntityMeta, EntityMetaBuilder};
pub use property::{PropertyMeta, PropertyMetaBuilder, PropertyType};
