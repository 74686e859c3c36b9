//! # Filesystem-backed key/value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each key
//! as its own file on the local filesystem. It is used on desktop and mobile
//! platforms to retain the roster, availability and session across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── entries/
//!     └── <sha1_hex_of_key>     # raw UTF-8 value
//! ```
//!
//! File names are the SHA-1 of the key, so keys may contain any characters
//! (separators, dots, spaces) without escaping.

use std::io::ErrorKind;
use std::path::PathBuf;

use sha1::{Digest, Sha1};

use crate::kv::{KeyValueStore, StoreError};

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entries_dir(&self) -> PathBuf {
        self.base.join("entries")
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.entries_dir().join(key_file_name(key))
    }
}

/// Hex SHA-1 of the key.
fn key_file_name(key: &str) -> String {
    Sha1::digest(key.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read(self.entry_path(key)) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| StoreError::InvalidUtf8 {
                    key: key.to_string(),
                }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.entries_dir())?;
        std::fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_file_name_is_hex_sha1() {
        let name = key_file_name("APP_USERS_V1");
        assert_eq!(name.len(), 40);
        assert!(name.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(name, key_file_name("APP_AVAILABILITY_V1"));
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::new(dir.path().to_path_buf());
        assert!(store.get("APP_USERS_V1").await.unwrap().is_none());

        store.set("APP_USERS_V1", r#"[{"id":"d1"}]"#).await.unwrap();

        // Re-open from same directory
        let store2 = FileStore::new(dir.path().to_path_buf());
        assert_eq!(
            store2.get("APP_USERS_V1").await.unwrap().as_deref(),
            Some(r#"[{"id":"d1"}]"#)
        );

        store2.remove("APP_USERS_V1").await.unwrap();
        assert!(store.get("APP_USERS_V1").await.unwrap().is_none());

        // Removing a missing key is a no-op
        store.remove("APP_USERS_V1").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_with_path_characters() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        store.set("../outside/key", "value").await.unwrap();
        assert_eq!(
            store.get("../outside/key").await.unwrap().as_deref(),
            Some("value")
        );
        assert!(!dir.path().join("../outside").exists());
    }

    #[tokio::test]
    async fn test_non_utf8_entry_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        std::fs::create_dir_all(store.entries_dir()).unwrap();
        std::fs::write(store.entry_path("k"), [0xff, 0xfe]).unwrap();

        match store.get("k").await {
            Err(StoreError::InvalidUtf8 { key }) => assert_eq!(key, "k"),
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }
}
