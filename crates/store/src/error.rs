//! Store error taxonomy.
//!
//! Only two error kinds reach CRUD callers by design: validation failures
//! and retry exhaustion. Substrate read faults are absorbed into the empty
//! envelope before they get here; substrate write faults propagate, since
//! swallowing one would silently lose the caller's change.

use pantry_core::ValidationError;
use pantry_storage::StorageError;
use thiserror::Error;

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An item or envelope failed shape/range checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Optimistic-concurrency retries exhausted.
    ///
    /// A transient condition, not data corruption: the caller should
    /// retry the action.
    #[error("concurrent modification detected after {attempts} attempts")]
    Conflict {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// The persistence substrate failed during a write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The envelope could not be serialized for persistence.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether retrying the operation may succeed with fresh data.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }

    /// Whether this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    /// Whether this is a concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
