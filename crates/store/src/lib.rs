//! Concurrency-controlled inventory store
//!
//! This crate wraps the single persisted envelope with read/modify/write
//! semantics that detect interleaved writers and retry. Every mutating
//! operation funnels through one optimistic-concurrency primitive,
//! [`InventoryStore::with_concurrency_control`]: a compare-and-swap loop on
//! the envelope's revision counter, not a lock, so it works for independent
//! writers sharing one backend (two tabs over one local storage area, or
//! two store handles over one [`pantry_storage::MemoryBackend`]).
//!
//! Operation closures may run multiple times; they must derive everything
//! from the freshly-read envelope they are handed, never from state
//! captured before the loop began.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod notify;
mod store;

pub use config::{StoreConfig, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MAX_RETRIES, STORAGE_KEY};
pub use error::{Result, StoreError};
pub use notify::ChangeNotifier;
pub use store::InventoryStore;

// Re-export the schema types for convenience
pub use pantry_core::{Envelope, InventoryItem, ItemPatch, ValidationError};
