//! File-backed backend.
//!
//! One file per key under a root directory. Writes go to a temporary
//! sibling first and are renamed into place, so a reader never observes a
//! partially-written value.

use crate::{Result, StorageBackend, StorageError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File-per-key backend rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open a backend rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(FileBackend { root })
    }

    /// Root directory for this backend.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are used as file names verbatim; refuse anything that would
        // escape the root.
        if key.is_empty() || key.contains('/') || key.contains('\\') || key == "." || key == ".." {
            return Err(StorageError::Backend(format!("invalid storage key {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!(".{}.tmp", key));
        // The temp file must hit disk before the rename publishes it, or a
        // crash could leave the key pointing at an empty file.
        let mut file = fs::File::create(&tmp)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_root() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("pantry");
        let backend = FileBackend::open(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(backend.root(), nested);
    }

    #[test]
    fn get_missing_key() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get("inventory_items").unwrap(), None);
    }

    #[test]
    fn set_then_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        backend.set("inventory_items", "{\"revision\":0}").unwrap();
        assert_eq!(
            backend.get("inventory_items").unwrap().as_deref(),
            Some("{\"revision\":0}")
        );
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let backend = FileBackend::open(dir.path()).unwrap();
            backend.set("inventory_items", "persisted").unwrap();
        }
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(
            backend.get("inventory_items").unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn overwrite_replaces_value() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        backend.set("k", "one").unwrap();
        backend.set("k", "two").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn set_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        backend.set("inventory_items", "{\"revision\":7}").unwrap();
        assert!(dir.path().join("inventory_items.json").exists());
        assert!(!dir.path().join(".inventory_items.tmp").exists());
        assert_eq!(
            backend.get("inventory_items").unwrap().as_deref(),
            Some("{\"revision\":7}")
        );
    }

    #[test]
    fn rejects_path_escaping_keys() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert!(backend.get("../evil").is_err());
        assert!(backend.set("a/b", "x").is_err());
        assert!(backend.set("", "x").is_err());
    }
}
