//! Error types for the light facade layer.
//!
//! Resolution misses are not errors: they surface as `None`. The variants
//! here are hard failures the caller must handle.

use thiserror::Error;

use super::annotation::FacadeKind;

/// Failures of facade operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LightError {
    /// Attribute values cannot be written through a facade.
    #[error("cannot modify {0}: light annotations are read-only")]
    ReadOnly(FacadeKind),

    /// The facade kind does not support the operation.
    #[error("{0}")]
    UnsupportedOperation(String),

    /// The backing tree is not in a state the operation needs.
    #[error("invalid tree: {0}")]
    InvalidTree(String),
}

impl LightError {
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree(message.into())
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly(_))
    }
}

/// Result type for facade operations.
pub type Result<T, E = LightError> = std::result::Result<T, E>;
