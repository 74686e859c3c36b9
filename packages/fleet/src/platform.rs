//! Platform store constructor.
//!
//! Picks the [`KeyValueStore`](store::KeyValueStore) a presentation layer
//! should hand to [`FleetContext::load`](crate::FleetContext::load):
//! - **Web** (WASM + `web` feature): IndexedDB via [`store::IdbStore`]
//! - **Native**: one file per key under [`default_data_dir`] via [`store::FileStore`]

use std::path::PathBuf;

/// `<data_dir>/fleet`, or `./fleet` when the platform has no data directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleet")
}

/// Create the default store for the current platform.
pub fn make_store() -> impl store::KeyValueStore + Clone {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::IdbStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::FileStore::new(default_data_dir())
    }
}
