//! Main entry point for pantrydb.

use crate::error::Result;
use crate::items::Items;
use pantry_storage::{FileBackend, MemoryBackend, StorageBackend};
use pantry_store::{InventoryStore, StoreConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The pantrydb handle.
///
/// Create one with [`Pantry::open`] (file-backed), [`Pantry::ephemeral`]
/// (in-memory), or [`Pantry::builder`] for full control.
///
/// # Example
///
/// ```
/// use pantrydb::prelude::*;
///
/// let db = Pantry::ephemeral();
/// db.items.add(InventoryItem::new("Milk", 2.0, "Fridge"))?;
/// assert_eq!(db.items.all().len(), 1);
/// # Ok::<(), pantrydb::Error>(())
/// ```
pub struct Pantry {
    /// Inventory item operations.
    pub items: Items,
}

impl Pantry {
    /// Open a file-backed store rooted at `dir`, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(dir).open()
    }

    /// Create an in-memory store with no disk I/O.
    ///
    /// All data is lost when the handle is dropped. Useful for tests and
    /// temporary computations.
    pub fn ephemeral() -> Self {
        Self::from_backend(Arc::new(MemoryBackend::new()), StoreConfig::default())
    }

    /// Create a builder for store configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use pantrydb::Pantry;
    ///
    /// let db = Pantry::builder()
    ///     .max_retries(5)
    ///     .low_stock_threshold(2.0)
    ///     .open()?;
    /// # Ok::<(), pantrydb::Error>(())
    /// ```
    pub fn builder() -> PantryBuilder {
        PantryBuilder::new()
    }

    fn from_backend(backend: Arc<dyn StorageBackend>, config: StoreConfig) -> Self {
        Pantry {
            items: Items::new(InventoryStore::with_config(backend, config)),
        }
    }
}

/// Builder for store configuration.
#[derive(Debug, Default)]
pub struct PantryBuilder {
    path: Option<PathBuf>,
    config: StoreConfig,
}

impl PantryBuilder {
    /// Create a builder with default settings (in-memory, storage key
    /// `inventory_items`, 3 retries).
    pub fn new() -> Self {
        Self::default()
    }

    /// Root directory for a file-backed store. Without a path the store is
    /// in-memory.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Key the envelope is persisted under.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Optimistic-concurrency attempts before failing with a conflict.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Global low-stock threshold for items with no per-item threshold.
    pub fn low_stock_threshold(mut self, threshold: f64) -> Self {
        self.config.default_low_stock_threshold = threshold;
        self
    }

    /// Open the store.
    ///
    /// # Errors
    ///
    /// [`Error::Storage`](crate::Error::Storage) if the file backend's root
    /// directory cannot be created.
    pub fn open(self) -> Result<Pantry> {
        let backend: Arc<dyn StorageBackend> = match &self.path {
            Some(path) => Arc::new(
                FileBackend::open(path).map_err(pantry_store::StoreError::from)?,
            ),
            None => Arc::new(MemoryBackend::new()),
        };
        Ok(Pantry::from_backend(backend, self.config))
    }
}
