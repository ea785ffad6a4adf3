//! Inventory item operations.
//!
//! Access via `db.items`. This is a thin facade over
//! [`pantry_store::InventoryStore`]; it maps store errors into the unified
//! [`Error`](crate::Error) and exposes nothing the store does not
//! guarantee.

use crate::error::Result;
use pantry_core::{Envelope, InventoryItem, ItemPatch};
use pantry_storage::StorageBackend;
use pantry_store::InventoryStore;
use std::sync::Arc;
use uuid::Uuid;

/// Inventory item operations.
pub struct Items {
    store: InventoryStore<Arc<dyn StorageBackend>>,
}

impl Items {
    pub(crate) fn new(store: InventoryStore<Arc<dyn StorageBackend>>) -> Self {
        Items { store }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All items, in insertion order.
    ///
    /// A snapshot read: it may be stale relative to a concurrently
    /// committing writer. Do not combine it with manual writes; use the
    /// mutation operations below.
    pub fn all(&self) -> Vec<InventoryItem> {
        self.store.get_all()
    }

    /// Items at or below their low-stock threshold, with items lacking a
    /// per-item threshold falling back to the configured global default.
    pub fn low_stock(&self) -> Vec<InventoryItem> {
        self.store.low_stock()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Validate and append an item.
    pub fn add(&self, item: InventoryItem) -> Result<()> {
        Ok(self.store.add(item)?)
    }

    /// Create, validate, and append an item in one step, returning it.
    ///
    /// # Example
    ///
    /// ```
    /// # let db = pantrydb::Pantry::ephemeral();
    /// let milk = db.items.create("Milk", 2.0, "Fridge")?;
    /// assert_eq!(db.items.all()[0].id, milk.id);
    /// # Ok::<(), pantrydb::Error>(())
    /// ```
    pub fn create(
        &self,
        name: impl Into<String>,
        quantity: f64,
        location: impl Into<String>,
    ) -> Result<InventoryItem> {
        let item = InventoryItem::new(name, quantity, location);
        self.add(item.clone())?;
        Ok(item)
    }

    /// Merge a partial update over the first item with a matching id.
    ///
    /// Returns `false` (with no commit) when no item matches. Only the
    /// first match is touched; [`remove`](Items::remove) by contrast
    /// removes all matches.
    pub fn update(&self, id: Uuid, patch: &ItemPatch) -> Result<bool> {
        Ok(self.store.update(id, patch)?)
    }

    /// Remove every item with a matching id.
    ///
    /// Returns `true` iff at least one item was removed.
    pub fn remove(&self, id: Uuid) -> Result<bool> {
        Ok(self.store.remove(id)?)
    }

    /// Validate every item and replace the item list wholesale.
    pub fn set_all(&self, items: Vec<InventoryItem>) -> Result<()> {
        Ok(self.store.set_all(items)?)
    }

    // =========================================================================
    // Diagnostics and notification
    // =========================================================================

    /// The full persisted envelope (diagnostics).
    pub fn envelope(&self) -> Envelope {
        self.store.read_envelope()
    }

    /// Current revision counter.
    pub fn revision(&self) -> u64 {
        self.store.current_revision()
    }

    /// Schema version of the persisted envelope.
    pub fn schema_version(&self) -> u32 {
        self.store.schema_version()
    }

    /// Register a listener invoked after every successful commit.
    ///
    /// Fire-and-forget and synchronous, scoped to this store instance. Not
    /// a cross-process signal.
    pub fn on_change(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.store.on_change(listener);
    }
}
