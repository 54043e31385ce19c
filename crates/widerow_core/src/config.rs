//! Mapping configuration.

use crate::types::{Consistency, ConsistencyLevel};
use serde::{Deserialize, Serialize};

/// Configuration consulted while metadata is assembled.
///
/// Applications usually load this from their own configuration file; the
/// metadata builders fall back to it when a property or entity does not
/// declare its own consistency levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Read level used when none is declared.
    pub default_read_consistency: ConsistencyLevel,

    /// Write level used when none is declared.
    pub default_write_consistency: ConsistencyLevel,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            default_read_consistency: ConsistencyLevel::One,
            default_write_consistency: ConsistencyLevel::One,
        }
    }
}

impl MappingConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default read level.
    #[must_use]
    pub const fn default_read_consistency(mut self, level: ConsistencyLevel) -> Self {
        self.default_read_consistency = level;
        self
    }

    /// Sets the default write level.
    #[must_use]
    pub const fn default_write_consistency(mut self, level: ConsistencyLevel) -> Self {
        self.default_write_consistency = level;
        self
    }

    /// Returns the default consistency pair.
    #[must_use]
    pub const fn default_consistency(&self) -> Consistency {
        Consistency::new(
            self.default_read_consistency,
            self.default_write_consistency,
        )
    }
}
