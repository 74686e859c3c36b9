//! # Key/value store — the durable string-keyed transport
//!
//! Everything the fleet core persists goes through the [`KeyValueStore`] trait:
//! three named records holding JSON snapshots (roster, availability, session).
//! The trait is deliberately tiny so the same core logic runs against an
//! in-memory map (tests), plain files (desktop), or IndexedDB (browser).
//!
//! ## [`KeyValueStore`] trait
//!
//! | Method | Contract |
//! |--------|----------|
//! | `get` | `Ok(Some(value))` when the key exists, `Ok(None)` when it does not. |
//! | `set` | Inserts or overwrites the value for a key. |
//! | `remove` | Deletes a key. Removing a missing key is not an error. |
//!
//! Every method returns a [`StoreError`] on failure. Backends never retry and
//! never panic; callers decide whether a failure matters (the fleet core logs
//! it and keeps its in-memory state).

use thiserror::Error;

/// Failure reported by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value for `{key}` is not valid UTF-8")]
    InvalidUtf8 { key: String },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Async string-keyed store.
pub trait KeyValueStore {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>>;
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}
