//! In-memory backend.

use crate::{Result, StorageBackend};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory key-value backend.
///
/// Cloning is cheap and clones share the same map, so two store handles
/// built over clones of one `MemoryBackend` behave like two browser tabs
/// over one local storage area.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    map: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
