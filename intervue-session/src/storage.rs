//! Credential storage - persistence layer for the session
//!
//! The persistent mirror of the in-memory session is a pair of string-keyed
//! entries: the raw bearer token and the serialized user record.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use intervue_core::{IntervueError, IntervueResult};
use tracing::{debug, info};

/// Storage key for the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user record
pub const USER_KEY: &str = "user";

/// String-keyed credential storage trait for extensibility
pub trait CredentialStore: Send + Sync {
    /// Read an entry, `None` if absent
    fn read(&self, key: &str) -> IntervueResult<Option<String>>;

    /// Write an entry, replacing any previous value
    fn write(&self, key: &str, value: &str) -> IntervueResult<()>;

    /// Remove an entry if present
    fn remove(&self, key: &str) -> IntervueResult<()>;
}

/// File-backed credential store, one file per entry
pub struct FileCredentialStore {
    /// Base directory for credential storage
    storage_dir: PathBuf,
}

impl FileCredentialStore {
    /// Create a new file-backed store, creating the directory if needed
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> IntervueResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&storage_dir).map_err(|e| {
            IntervueError::storage(
                format!(
                    "Failed to create credential directory {}: {}",
                    storage_dir.display(),
                    e
                ),
                Some(Box::new(e)),
                "file_credential_store",
            )
        })?;

        info!(
            "Credential storage initialized at: {}",
            storage_dir.display()
        );

        Ok(Self { storage_dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.storage_dir.join(key)
    }
}

impl CredentialStore for FileCredentialStore {
    fn read(&self, key: &str) -> IntervueResult<Option<String>> {
        let path = self.entry_path(key);

        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(IntervueError::storage(
                format!("Failed to read credential entry '{}': {}", key, e),
                Some(Box::new(e)),
                "file_credential_store",
            )),
        }
    }

    fn write(&self, key: &str, value: &str) -> IntervueResult<()> {
        let path = self.entry_path(key);

        std::fs::write(&path, value).map_err(|e| {
            IntervueError::storage(
                format!("Failed to write credential entry '{}': {}", key, e),
                Some(Box::new(e)),
                "file_credential_store",
            )
        })?;

        debug!("Saved credential entry '{}' to {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> IntervueResult<()> {
        let path = self.entry_path(key);

        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                IntervueError::storage(
                    format!("Failed to remove credential entry '{}': {}", key, e),
                    Some(Box::new(e)),
                    "file_credential_store",
                )
            })?;
            debug!("Removed credential entry '{}'", key);
        }

        Ok(())
    }
}

/// In-memory credential store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read(&self, key: &str) -> IntervueResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| poisoned("read"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> IntervueResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| poisoned("write"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> IntervueResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| poisoned("remove"))?;
        entries.remove(key);
        Ok(())
    }
}

fn poisoned(operation: &str) -> IntervueError {
    IntervueError::storage(
        format!("Credential store lock poisoned during {}", operation),
        None,
        "memory_credential_store",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path()).unwrap();

        assert_eq!(store.read(TOKEN_KEY).unwrap(), None);

        store.write(TOKEN_KEY, "abc.def.ghi").unwrap();
        store.write(USER_KEY, r#"{"id":1}"#).unwrap();

        assert_eq!(store.read(TOKEN_KEY).unwrap().as_deref(), Some("abc.def.ghi"));
        assert_eq!(store.read(USER_KEY).unwrap().as_deref(), Some(r#"{"id":1}"#));

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.read(TOKEN_KEY).unwrap(), None);
        // Removing an absent entry is fine
        store.remove(TOKEN_KEY).unwrap();
    }

    #[test]
    fn test_file_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("credentials");
        let store = FileCredentialStore::new(&nested).unwrap();
        store.write(TOKEN_KEY, "t").unwrap();
        assert!(nested.join(TOKEN_KEY).exists());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        store.write(USER_KEY, "u").unwrap();
        assert_eq!(store.read(USER_KEY).unwrap().as_deref(), Some("u"));
        store.remove(USER_KEY).unwrap();
        assert_eq!(store.read(USER_KEY).unwrap(), None);
    }
}
