//! Store trait definitions

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::StoreResult;

/// Key-value document store.
///
/// Each key maps to one whole document; writes replace it entirely.
pub trait KvStore: Send + Sync {
    /// Read the document under `key`, `None` if absent
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the document under `key`
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete the document under `key`. Absent keys are not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}

/// Read and deserialize the JSON document under `key`
pub fn load_document<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> StoreResult<Option<T>> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and store it under `key`
pub fn save_document<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> StoreResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}
