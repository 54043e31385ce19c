//! # widerow core
//!
//! Change tracking for the widerow entity mapper.
//!
//! This crate provides:
//! - Entity and property metadata (identity, clustering, consistency, counters)
//! - A per-entity dirty registry
//! - Collection proxies over map, set and list attributes that mark the
//!   owning attribute dirty iff a mutation changed the collection
//! - Flush planning from the registry and the metadata
//!
//! Talking to the store, building statements and deciding when to flush
//! belong to the layers above.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use widerow_core::{
//!     DirtyRegistry, DirtyTarget, EntityMeta, FlushPlan, ListProxy, PropertyMeta, PropertyType,
//!     WriteKind,
//! };
//!
//! let id = PropertyMeta::builder("User")
//!     .field("id")
//!     .property_type(PropertyType::Id)
//!     .value_type("Long")
//!     .build()?;
//! let friends = Arc::new(
//!     PropertyMeta::builder("User").field("friends").property_type(PropertyType::List).build()?,
//! );
//! let user_meta = EntityMeta::builder("User")
//!     .table_name("users")
//!     .id_meta(id)
//!     .property(Arc::clone(&friends))
//!     .build()?;
//!
//! let registry = DirtyRegistry::new();
//! let mut names = vec!["alice".to_string()];
//! ListProxy::new(&mut names, DirtyTarget::for_property(&registry, &friends)).push("bob".into());
//!
//! let plan = FlushPlan::drain(&user_meta, &registry);
//! assert_eq!(plan.writes()[0].kind, WriteKind::CollectionOverwrite);
//! assert!(registry.is_empty());
//! # Ok::<(), widerow_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod dirty;
pub mod error;
pub mod flush;
pub mod metadata;
pub mod proxy;
pub mod types;

pub use config::MappingConfig;
pub use dirty::{DirtyListener, DirtyRegistry, DirtyTarget};
pub use error::{CoreError, CoreResult};
pub use flush::{FlushPlan, PlannedWrite, WriteKind};
pub use metadata::{EntityMeta, EntityMetaBuilder, PropertyMeta, PropertyMetaBuilder, PropertyType};
pub use proxy::{
    BackingMap, BackingSet, ElementIterMut, ElementProxy, EntryCursor, EntryIterMut, EntryProxy,
    EntrySet, KeyCursor, KeySet, ListCursor, ListProxy, MapProxy, SetCursor, SetProxy, Values,
};
pub use types::{AttributeId, Consistency, ConsistencyLevel};
