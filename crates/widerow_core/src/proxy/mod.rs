//! Dirty-tracking collection proxies.
//!
//! An entity getter hands out a proxy in place of its raw collection. The
//! proxy forwards reads, runs mutations against the backing collection and
//! marks the owning attribute dirty once per mutation that changed the
//! contents. Views and cursors derived from a proxy borrow its backing
//! collection and its [`DirtyTarget`](crate::DirtyTarget), so there is
//! exactly one dirty target per attribute.
//!
//! - [`MapProxy`] with [`KeySet`], [`Values`] and [`EntrySet`] views
//! - [`SetProxy`]
//! - [`ListProxy`]

mod backing;
mod cursor;
mod list;
mod map;
mod map_views;
mod set;

#[cfg(test)]
pub(crate) mod testing;

pub use backing::{BackingMap, BackingSet};
pub use list::{ElementIterMut, ElementProxy, ListCursor, ListProxy};
pub use map::MapProxy;
pub use map_views::{EntryCursor, EntryIterMut, EntryProxy, EntrySet, KeyCursor, KeySet, Values};
pub use set::{SetCursor, SetProxy};
