//! # IndexedDB key/value store — browser-side persistence
//!
//! [`IdbStore`] is the [`KeyValueStore`] implementation used on the **web
//! platform**. It persists entries into the browser's IndexedDB via the
//! [`rexie`] crate, the browser counterpart of [`crate::FileStore`].
//!
//! ## Database schema
//!
//! A single IndexedDB database named `"fleet"` (version 1) with one object store:
//!
//! | IndexedDB store | Key | Value |
//! |-----------------|-----|-------|
//! | `"entries"` | record key (e.g. `"APP_USERS_V1"`) | JS string |
//!
//! ## Connection management
//!
//! `IdbStore` opens a fresh [`Rexie`] connection on every operation. `Rexie`
//! does not implement `Clone`, and the browser caches IndexedDB connections
//! internally.

use crate::kv::{KeyValueStore, StoreError};
use rexie::{ObjectStore as RexieObjectStore, Rexie, TransactionMode};
use wasm_bindgen::JsValue;

const DEFAULT_DB_NAME: &str = "fleet";
const DB_VERSION: u32 = 1;
const ENTRIES_STORE: &str = "entries";

fn unavailable(e: rexie::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

/// IndexedDB-backed KeyValueStore for web platform.
#[derive(Clone)]
pub struct IdbStore {
    db_name: String,
}

impl Default for IdbStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdbStore {
    /// Create a store using the default `"fleet"` database.
    pub fn new() -> Self {
        Self::with_name(DEFAULT_DB_NAME)
    }

    /// Create a store backed by a specific database name.
    pub fn with_name(db_name: &str) -> Self {
        Self {
            db_name: db_name.to_string(),
        }
    }

    async fn open_db(&self) -> Result<Rexie, StoreError> {
        Rexie::builder(&self.db_name)
            .version(DB_VERSION)
            .add_object_store(RexieObjectStore::new(ENTRIES_STORE))
            .build()
            .await
            .map_err(unavailable)
    }
}

impl KeyValueStore for IdbStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let db = self.open_db().await?;
        let tx = db
            .transaction(&[ENTRIES_STORE], TransactionMode::ReadOnly)
            .map_err(unavailable)?;
        let store = tx.store(ENTRIES_STORE).map_err(unavailable)?;

        let value = store
            .get(JsValue::from_str(key))
            .await
            .map_err(unavailable)?;

        match value {
            Some(js_val) => js_val
                .as_string()
                .map(Some)
                .ok_or_else(|| StoreError::InvalidUtf8 {
                    key: key.to_string(),
                }),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let db = self.open_db().await?;
        let tx = db
            .transaction(&[ENTRIES_STORE], TransactionMode::ReadWrite)
            .map_err(unavailable)?;
        let store = tx.store(ENTRIES_STORE).map_err(unavailable)?;

        store
            .put(&JsValue::from_str(value), Some(&JsValue::from_str(key)))
            .await
            .map_err(unavailable)?;
        tx.done().await.map_err(unavailable)
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let db = self.open_db().await?;
        let tx = db
            .transaction(&[ENTRIES_STORE], TransactionMode::ReadWrite)
            .map_err(unavailable)?;
        let store = tx.store(ENTRIES_STORE).map_err(unavailable)?;

        store
            .delete(JsValue::from_str(key))
            .await
            .map_err(unavailable)?;
        tx.done().await.map_err(unavailable)
    }
}
