//! File-backed storage backend.
//!
//! Each key is stored as `<root>/<key>.json`. The directory is created on
//! the first write, so pointing at a missing directory behaves like an
//! empty store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{KeyValueStorage, StorageError, is_valid_key};

/// Storage rooted at a data directory, one file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        // Previous value stays intact until the rename; a failed write or
        // rename removes the temporary file
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_directory_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("not-yet-created"));
        assert_eq!(storage.get_item("shelf.cart").unwrap(), None);
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("data");
        let storage = FileStorage::new(&root);

        storage.set_item("shelf.cart", "[1]").unwrap();
        assert!(root.join("shelf.cart.json").exists());
        assert_eq!(
            storage.get_item("shelf.cart").unwrap().as_deref(),
            Some("[1]")
        );

        storage.set_item("shelf.cart", "[2]").unwrap();
        assert_eq!(
            storage.get_item("shelf.cart").unwrap().as_deref(),
            Some("[2]")
        );
    }

    #[test]
    fn test_writes_leave_no_temporary_files() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        storage.set_item("shelf.cart", "[1]").unwrap();
        storage.set_item("shelf.cart", "[2]").unwrap();

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["shelf.cart.json"]);
    }

    #[test]
    fn test_failed_rename_cleans_up() {
        let temp = TempDir::new().unwrap();
        // A directory in the way makes the final rename fail
        fs::create_dir(temp.path().join("shelf.cart.json")).unwrap();
        let storage = FileStorage::new(temp.path());

        let err = storage.set_item("shelf.cart", "[1]").unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["shelf.cart.json"]);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        storage.remove_item("shelf.wishlist").unwrap();
    }

    #[test]
    fn test_rejects_path_traversal() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        let err = storage.set_item("../escape", "[]").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
