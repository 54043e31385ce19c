//! Error types for widerow core.

use crate::metadata::PropertyType;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in widerow core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A structural mutation that has no well-defined dirty target.
    #[error("structural mutation not supported: {operation}")]
    UnsupportedMutation {
        /// The rejected operation.
        operation: &'static str,
    },

    /// A cursor was asked to act on an element it has not yielded.
    #[error("cursor has no current element")]
    NoCurrentElement,

    /// Positional access beyond the end of a list.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// Entity metadata was finished without an id property.
    #[error("entity {class_name} has no id metadata")]
    MissingIdMeta {
        /// Entity class the metadata describes.
        class_name: String,
    },

    /// The id property carries a non-id type tag.
    #[error("id metadata of entity {class_name} is tagged {found}, expected ID or EMBEDDED_ID")]
    InvalidIdMeta {
        /// Entity class the metadata describes.
        class_name: String,
        /// The tag that was found.
        found: PropertyType,
    },

    /// A metadata builder was finished without a required field.
    #[error("metadata builder is missing {what}")]
    MissingField {
        /// Name of the missing field.
        what: &'static str,
    },
}

impl CoreError {
    /// Creates an unsupported mutation error.
    pub fn unsupported_mutation(operation: &'static str) -> Self {
        Self::UnsupportedMutation { operation }
    }

    /// Creates an index out of bounds error.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Creates a missing id metadata error.
    pub fn missing_id_meta(class_name: impl Into<String>) -> Self {
        Self::MissingIdMeta {
            class_name: class_name.into(),
        }
    }

    /// Creates an invalid id metadata error.
    pub fn invalid_id_meta(class_name: impl Into<String>, found: PropertyType) -> Self {
        Self::InvalidIdMeta {
            class_name: class_name.into(),
            found,
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(what: &'static str) -> Self {
        Self::MissingField { what }
    }

    /// Returns true for errors raised by misuse of a proxy at runtime.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMutation { .. } | Self::NoCurrentElement | Self::IndexOutOfBounds { .. }
        )
    }

    /// Returns true for errors raised while assembling metadata.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        !self.is_usage_error()
    }
}
