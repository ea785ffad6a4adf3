//! Store configuration.

/// Storage key the envelope is persisted under.
pub const STORAGE_KEY: &str = "inventory_items";

/// Default number of optimistic-concurrency attempts before giving up.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default low-stock threshold applied to items without their own.
pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 5.0;

/// Configuration for an [`InventoryStore`](crate::InventoryStore).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Key the envelope is persisted under.
    pub storage_key: String,
    /// Optimistic-concurrency attempts before failing with a conflict.
    pub max_retries: u32,
    /// Global low-stock threshold for items with no per-item threshold.
    pub default_low_stock_threshold: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            storage_key: STORAGE_KEY.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            default_low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}
