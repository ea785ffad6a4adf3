//! # pantrydb
//!
//! Embedded, optimistically-versioned record store for household inventory.
//!
//! All inventory data lives in a single persisted envelope: a schema
//! version, a revision counter, and an ordered item list. Every mutation
//! funnels through a compare-and-swap retry loop on the revision counter,
//! so two independent writers sharing one backend (the two-browser-tab
//! scenario) never silently lose each other's updates.
//!
//! ## Quick Start
//!
//! ```
//! use pantrydb::prelude::*;
//!
//! // In-memory store; use Pantry::open(dir) for a file-backed one.
//! let db = Pantry::ephemeral();
//!
//! let milk = InventoryItem::new("Milk", 2.0, "Fridge");
//! let id = milk.id;
//! db.items.add(milk)?;
//!
//! db.items.update(id, &ItemPatch::quantity(0.0))?;
//! db.items.remove(id)?;
//! assert_eq!(db.items.revision(), 3);
//! # Ok::<(), pantrydb::Error>(())
//! ```
//!
//! ## Error handling
//!
//! Operations raise exactly two caller-facing error kinds:
//! [`Error::Validation`] (per-field feedback) and [`Error::Conflict`]
//! (optimistic-concurrency retries exhausted; ask the user to retry).
//! Substrate read faults never surface: the store degrades to an empty
//! envelope. Substrate write faults do surface, since swallowing one would
//! silently lose the change.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod items;
mod pantry;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use items::Items;
pub use pantry::{Pantry, PantryBuilder};

// Re-export core types
pub use pantry_core::{
    Envelope, FieldViolation, InventoryItem, ItemPatch, ValidationError, SCHEMA_VERSION,
};
pub use pantry_storage::{FileBackend, MemoryBackend, StorageBackend};
pub use pantry_store::{StoreConfig, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MAX_RETRIES, STORAGE_KEY};
