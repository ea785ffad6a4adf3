//! Persistence port for pantrydb
//!
//! The store never talks to a concrete substrate directly; it goes through
//! the [`StorageBackend`] trait, a single-valued key-value primitive with
//! `get`/`set`. Two implementations ship:
//!
//! - [`MemoryBackend`]: shared in-memory map. Clones share one map, which
//!   is how tests model two independent writers over one substrate.
//! - [`FileBackend`]: one file per key under a root directory, written via
//!   rename so a crashed write never leaves a torn value behind.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;
use thiserror::Error;

/// Faults from the persistence substrate.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Substrate-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Single-valued key-value persistence primitive.
///
/// `get` returns the last value successfully `set` for the key, or `None`
/// if nothing was ever written. Implementations must make `set` atomic per
/// key: a concurrent reader sees either the old value or the new one,
/// never a mixture.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
