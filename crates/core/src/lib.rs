//! Core types for pantrydb
//!
//! This crate defines the fundamental types shared across the system:
//! - [`InventoryItem`]: one tracked physical good
//! - [`Envelope`]: the single persisted unit (schema version, revision
//!   counter, ordered item list)
//! - [`ValidationError`]: per-field shape/range violations
//!
//! It also owns the two boundary operations that turn untrusted JSON into
//! those types: [`validate`] for strict structural validation and
//! [`migrate`] for best-effort recovery of previously-persisted data.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;
pub mod error;
pub mod item;
pub mod migrate;
pub mod validate;

pub use envelope::{Envelope, SCHEMA_VERSION};
pub use error::{FieldViolation, ValidationError, Violations};
pub use item::{InventoryItem, ItemPatch};
pub use migrate::migrate;
pub use validate::{validate_envelope, validate_item};
