//! The storage envelope: the single persisted unit.

use crate::error::{ValidationError, Violations};
use crate::item::InventoryItem;
use serde::{Deserialize, Serialize};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// The single persisted unit: schema version, revision counter, and the
/// ordered item list.
///
/// The envelope is the sole owner of all items; insertion order is
/// preserved and never implicitly sorted. `revision` increments by exactly
/// 1 on every successful commit and is the optimistic-concurrency token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Record-shape version this envelope was written under.
    pub schema_version: u32,
    /// Commit counter, compared before every write to detect interleaved
    /// writers.
    pub revision: u64,
    /// All items, in insertion order.
    pub items: Vec<InventoryItem>,
}

impl Envelope {
    /// A fresh envelope: current schema version, revision 0, no items.
    pub fn empty() -> Self {
        Envelope {
            schema_version: SCHEMA_VERSION,
            revision: 0,
            items: Vec::new(),
        }
    }

    /// Range checks on an already-typed envelope and every item in it.
    pub fn check(&self) -> Result<(), ValidationError> {
        let mut v = Violations::new();
        if self.schema_version == 0 {
            v.push("schemaVersion", "must be a positive integer");
        }
        for (idx, item) in self.items.iter().enumerate() {
            if let Err(err) = item.check() {
                v.extend_prefixed(&format!("items[{}]", idx), err);
            }
        }
        v.finish()
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::empty()
    }
}
