//! Convenient imports for pantrydb.
//!
//! ```
//! use pantrydb::prelude::*;
//!
//! let db = Pantry::ephemeral();
//! db.items.add(InventoryItem::new("Milk", 2.0, "Fridge"))?;
//! # Ok::<(), pantrydb::Error>(())
//! ```

// Main entry point
pub use crate::pantry::{Pantry, PantryBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Schema types
pub use pantry_core::{Envelope, InventoryItem, ItemPatch, ValidationError, SCHEMA_VERSION};

// Id type, re-exported for callers constructing lookups
pub use uuid::Uuid;
