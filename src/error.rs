//! Unified error type for pantrydb.
//!
//! Wraps the internal store errors and presents a stable surface: callers
//! catch [`Error::Validation`] for field-level feedback and
//! [`Error::Conflict`] to prompt a retry.

use pantry_core::ValidationError;
use pantry_store::StoreError;
use thiserror::Error;

/// All pantrydb errors.
#[derive(Debug, Error)]
pub enum Error {
    /// An item or envelope failed shape/range checks. Carries the full
    /// list of violated fields.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Optimistic-concurrency retries exhausted. Retryable by the user,
    /// never a sign of data corruption.
    #[error("conflict: concurrent modification detected after {attempts} attempts")]
    Conflict {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// The persistence substrate failed during a write.
    #[error("storage error: {0}")]
    Storage(String),

    /// The envelope could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for pantrydb operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether retrying the action may succeed with fresh data.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// Whether this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Whether this is a concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(v) => Error::Validation(v),
            StoreError::Conflict { attempts } => Error::Conflict { attempts },
            StoreError::Storage(s) => Error::Storage(s.to_string()),
            StoreError::Serialization(msg) => Error::Serialization(msg),
        }
    }
}
