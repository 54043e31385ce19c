//! Core type definitions for widerow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque identifier of one mapped attribute.
///
/// Attribute ids are assigned once per mapped attribute when metadata is
/// built, conventionally as `<EntityClass>.<field>`. They key the dirty
/// registry, so two ids compare equal iff they name the same attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeId(Arc<str>);

impl AttributeId {
    /// Creates an attribute id from any string token.
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(Arc::from(token.as_ref()))
    }

    /// Creates the conventional id for a field of an entity class.
    #[must_use]
    pub fn for_field(class_name: &str, field_name: &str) -> Self {
        Self::new(format!("{class_name}.{field_name}"))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replication acknowledgment policy for a read or a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    /// A write is acknowledged by any node, hinted handoff included.
    Any,
    /// One replica.
    One,
    /// Two replicas.
    Two,
    /// Three replicas.
    Three,
    /// A majority of replicas.
    Quorum,
    /// A majority of replicas in the local data center.
    LocalQuorum,
    /// A majority of replicas in each data center.
    EachQuorum,
    /// Every replica.
    All,
}

impl ConsistencyLevel {
    /// Returns the upper-case name used in renderings and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::One => "ONE",
            Self::Two => "TWO",
            Self::Three => "THREE",
            Self::Quorum => "QUORUM",
            Self::LocalQuorum => "LOCAL_QUORUM",
            Self::EachQuorum => "EACH_QUORUM",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read and write consistency pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Consistency {
    /// Level used for reads.
    pub read: ConsistencyLevel,
    /// Level used for writes.
    pub write: ConsistencyLevel,
}

impl Consistency {
    /// Creates a consistency pair.
    #[must_use]
    pub const fn new(read: ConsistencyLevel, write: ConsistencyLevel) -> Self {
        Self { read, write }
    }

    /// Uses the same level for reads and writes.
    #[must_use]
    pub const fn uniform(level: ConsistencyLevel) -> Self {
        Self::new(level, level)
    }
}

impl Default for Consistency {
    fn default() -> Self {
        Self::uniform(ConsistencyLevel::One)
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.read, self.write)
    }
}
