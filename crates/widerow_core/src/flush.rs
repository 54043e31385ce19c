//! Flush planning.
//!
//! At a flush boundary the persistence layer needs to know, for each dirty
//! attribute, what kind of statement to emit. [`FlushPlan`] answers that
//! from the dirty registry and the entity metadata. It does not talk to the
//! store, order statements or decide when a flush happens.

use crate::dirty::DirtyRegistry;
use crate::metadata::{EntityMeta, PropertyMeta};
use crate::types::{AttributeId, ConsistencyLevel};
use std::sync::Arc;

/// How a dirty attribute must be written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteKind {
    /// Counter column of a clustered counter entity.
    ClusteredCounter,
    /// Increment/decrement of a counter column.
    CounterDelta,
    /// Full replacement of a list, set or map column.
    CollectionOverwrite,
    /// Replacement of a single value column.
    ValueOverwrite,
}

/// One write of a flush plan.
#[derive(Debug, Clone)]
pub struct PlannedWrite {
    /// The dirty attribute.
    pub attribute: AttributeId,
    /// Metadata recorded when it was marked.
    pub meta: Arc<PropertyMeta>,
    /// Statement kind.
    pub kind: WriteKind,
    /// Write consistency for the statement.
    pub consistency: ConsistencyLevel,
}

/// Writes needed to persist the dirty attributes of one entity instance.
#[derive(Debug, Clone)]
pub struct FlushPlan {
    class_name: String,
    writes: Vec<PlannedWrite>,
}

impl FlushPlan {
    /// Plans the writes for the current marks, leaving the registry untouched.
    #[must_use]
    pub fn build(entity: &EntityMeta, registry: &DirtyRegistry) -> Self {
        Self::from_entries(entity, registry.snapshot())
    }

    /// Plans the writes and drains the registry.
    #[must_use]
    pub fn drain(entity: &EntityMeta, registry: &DirtyRegistry) -> Self {
        Self::from_entries(entity, registry.drain())
    }

    fn from_entries(entity: &EntityMeta, entries: Vec<(AttributeId, Arc<PropertyMeta>)>) -> Self {
        let clustered_counter = entity.is_clustered_counter();
        let mut writes = Vec::with_capacity(entries.len());

        for (attribute, meta) in entries {
            let property_type = meta.property_type();
            let kind = if property_type.is_id() {
                tracing::warn!(
                    entity = entity.class_name(),
                    attribute = %attribute,
                    "ignoring dirty mark on primary key"
                );
                continue;
            } else if property_type.is_counter() {
                if clustered_counter {
                    WriteKind::ClusteredCounter
                } else {
                    WriteKind::CounterDelta
                }
            } else if property_type.is_collection() {
                WriteKind::CollectionOverwrite
            } else {
                WriteKind::ValueOverwrite
            };

            writes.push(PlannedWrite {
                consistency: meta.consistency().write,
                attribute,
                meta,
                kind,
            });
        }

        tracing::debug!(
            entity = entity.class_name(),
            writes = writes.len(),
            "built flush plan"
        );

        Self {
            class_name: entity.class_name().to_owned(),
            writes,
        }
    }

    /// Returns the entity class the plan belongs to.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the planned writes, ordered by attribute id.
    #[must_use]
    pub fn writes(&self) -> &[PlannedWrite] {
        &self.writes
    }

    /// Returns the number of planned writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns true if there is nothing to write.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Returns the writes of one kind.
    pub fn of_kind(&self, kind: WriteKind) -> impl Iterator<Item = &PlannedWrite> {
        self.writes.iter().filter(move |write| write.kind == kind)
    }
}

impl IntoIterator for FlushPlan {
    type Item = PlannedWrite;
    type IntoIter = std::vec::IntoIter<PlannedWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}
