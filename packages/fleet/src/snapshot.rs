//! JSON snapshots in the key/value store.
//!
//! Store failures stop here: they are logged and reported to the caller as a
//! plain outcome, never as an error to propagate.

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::KeyValueStore;
use tracing::{error, warn};

/// Outcome of reading one record.
#[derive(Debug)]
pub(crate) enum Loaded<T> {
    Found(T),
    Missing,
    /// The record exists but does not decode.
    Corrupt,
    /// The store itself failed.
    Unreadable,
}

pub(crate) async fn load_json<S, T>(store: &S, key: &str) -> Loaded<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    match store.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Loaded::Found(value),
            Err(e) => {
                warn!(key, error = %e, "discarding undecodable record");
                Loaded::Corrupt
            }
        },
        Ok(None) => Loaded::Missing,
        Err(e) => {
            error!(key, error = %e, "failed to read from storage");
            Loaded::Unreadable
        }
    }
}

/// Returns whether the write reached the store.
pub(crate) async fn save_json<S, T>(store: &S, key: &str, value: &T) -> bool
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            error!(key, error = %e, "failed to encode record");
            return false;
        }
    };
    match store.set(key, &raw).await {
        Ok(()) => true,
        Err(e) => {
            error!(key, error = %e, "failed to save to storage");
            false
        }
    }
}

pub(crate) async fn remove<S: KeyValueStore>(store: &S, key: &str) -> bool {
    match store.remove(key).await {
        Ok(()) => true,
        Err(e) => {
            error!(key, error = %e, "failed to remove from storage");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_load_outcomes() {
        let store = MemoryStore::new();

        assert!(matches!(
            load_json::<_, Vec<String>>(&store, "k").await,
            Loaded::Missing
        ));

        assert!(save_json(&store, "k", &vec!["a".to_string()]).await);
        match load_json::<_, Vec<String>>(&store, "k").await {
            Loaded::Found(v) => assert_eq!(v, vec!["a".to_string()]),
            other => panic!("unexpected {other:?}"),
        }

        store.set("k", "{not json").await.unwrap();
        assert!(matches!(
            load_json::<_, Vec<String>>(&store, "k").await,
            Loaded::Corrupt
        ));

        store.set_failing(true);
        assert!(matches!(
            load_json::<_, Vec<String>>(&store, "k").await,
            Loaded::Unreadable
        ));
        assert!(!save_json(&store, "k", &Vec::<String>::new()).await);
        assert!(!remove(&store, "k").await);
    }
}
