//! Inventory item types
//!
//! An [`InventoryItem`] represents one tracked physical good. Items have no
//! identity or lifecycle outside the envelope that contains them; the only
//! external reference is by `id`.

use crate::error::{ValidationError, Violations};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One tracked physical good.
///
/// Serialized with camelCase field names; this is the wire-level contract
/// for each element of the envelope's `items` array. Optional fields are
/// omitted from the serialized form when absent.
///
/// # Example
///
/// ```
/// use pantry_core::InventoryItem;
///
/// let item = InventoryItem::new("Milk", 2.0, "Fridge");
/// assert_eq!(item.date_added, item.date_updated);
/// assert!(item.check().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Opaque unique identifier. Uniqueness is not enforced by validation;
    /// duplicate ids are a tolerated, if degenerate, state.
    pub id: Uuid,
    /// Display name (non-empty).
    pub name: String,
    /// Quantity on hand (>= 0).
    pub quantity: f64,
    /// Where the item lives (non-empty).
    pub location: String,
    /// Optional category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional ordered tag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Creation timestamp. Immutable after creation.
    pub date_added: DateTime<Utc>,
    /// Last-mutation timestamp. Rewritten on every mutation.
    pub date_updated: DateTime<Utc>,
    /// Per-item low-stock threshold (>= 0). Falls back to the store's
    /// configured global threshold when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<f64>,
    /// Optional monetary value (>= 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl InventoryItem {
    /// Create a new item with a fresh v4 id and both timestamps set to now.
    pub fn new(name: impl Into<String>, quantity: f64, location: impl Into<String>) -> Self {
        let now = Utc::now();
        InventoryItem {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity,
            location: location.into(),
            category: None,
            tags: None,
            date_added: now,
            date_updated: now,
            low_stock_threshold: None,
            value: None,
        }
    }

    /// Rewrite `date_updated` to now.
    ///
    /// Call after any mutation. `date_added` is never touched.
    pub fn touch(&mut self) {
        self.date_updated = Utc::now();
    }

    /// Range checks on an already-typed item.
    ///
    /// Collects every violation rather than stopping at the first. NaN
    /// counts as out of range.
    pub fn check(&self) -> Result<(), ValidationError> {
        let mut v = Violations::new();
        if self.name.trim().is_empty() {
            v.push("name", "must be a non-empty string");
        }
        if self.quantity.is_nan() || self.quantity < 0.0 {
            v.push("quantity", "must be a number >= 0");
        }
        if self.location.trim().is_empty() {
            v.push("location", "must be a non-empty string");
        }
        if let Some(t) = self.low_stock_threshold {
            if t.is_nan() || t < 0.0 {
                v.push("lowStockThreshold", "must be a number >= 0");
            }
        }
        if let Some(val) = self.value {
            if val.is_nan() || val < 0.0 {
                v.push("value", "must be a number >= 0");
            }
        }
        v.finish()
    }
}

/// Partial update merged over an existing item.
///
/// Every field is optional; `None` leaves the existing value alone. The
/// store forces `date_updated` after applying a patch, so patches carry no
/// timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    /// New name, if changing.
    pub name: Option<String>,
    /// New quantity, if changing.
    pub quantity: Option<f64>,
    /// New location, if changing.
    pub location: Option<String>,
    /// New category, if changing.
    pub category: Option<String>,
    /// New tag list, if changing.
    pub tags: Option<Vec<String>>,
    /// New low-stock threshold, if changing.
    pub low_stock_threshold: Option<f64>,
    /// New monetary value, if changing.
    pub value: Option<f64>,
}

impl ItemPatch {
    /// Merge this patch over `item` in place.
    ///
    /// Does not touch `id`, `date_added`, or `date_updated`; the store owns
    /// the timestamp rewrite.
    pub fn apply(&self, item: &mut InventoryItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(location) = &self.location {
            item.location = location.clone();
        }
        if let Some(category) = &self.category {
            item.category = Some(category.clone());
        }
        if let Some(tags) = &self.tags {
            item.tags = Some(tags.clone());
        }
        if let Some(t) = self.low_stock_threshold {
            item.low_stock_threshold = Some(t);
        }
        if let Some(val) = self.value {
            item.value = Some(val);
        }
    }

    /// Patch that only changes the quantity.
    pub fn quantity(quantity: f64) -> Self {
        ItemPatch {
            quantity: Some(quantity),
            ..Default::default()
        }
    }
}
