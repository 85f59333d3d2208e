//! Persistent list store.
//!
//! Loads and saves ordered lists as JSON arrays in a [`KeyValueStorage`].
//! Reads go through a validating decode step ([`ListStore::decode`]) that
//! never fails: missing or corrupt data is reported as a [`Decoded`] variant
//! and callers substitute a fallback. Writes are best-effort; a failed save
//! is logged and the in-memory list remains authoritative for the session.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::storage::KeyValueStorage;

/// Outcome of decoding a stored list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The key held a JSON array; malformed elements have been dropped.
    Loaded(Vec<T>),
    /// Nothing is stored under the key.
    Missing,
    /// The stored value is unreadable or not a JSON array.
    Corrupt(String),
}

impl<T> Decoded<T> {
    /// The decoded list, or `fallback` when missing or corrupt.
    #[must_use]
    pub fn unwrap_or(self, fallback: Vec<T>) -> Vec<T> {
        match self {
            Self::Loaded(items) => items,
            Self::Missing | Self::Corrupt(_) => fallback,
        }
    }

    /// The decoded list, or an empty list.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.unwrap_or(Vec::new())
    }

    /// Whether the stored value was unusable.
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}

/// Outcome of a best-effort save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Saved,
    Failed,
}

impl Persisted {
    #[must_use]
    pub const fn is_saved(self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Load/save of ordered lists keyed by fixed strings.
#[derive(Debug, Clone)]
pub struct ListStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> ListStore<S> {
    /// Create a list store over `storage`.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read and validate the list stored under `key`.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Decoded<T> {
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Decoded::Missing,
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored list");
                return Decoded::Corrupt(e.to_string());
            }
        };

        let elements = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(elements)) => elements,
            Ok(other) => {
                let reason = format!("expected a JSON array, found {}", json_kind(&other));
                warn!(key, %reason, "Discarding stored list");
                return Decoded::Corrupt(reason);
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding unparseable stored list");
                return Decoded::Corrupt(e.to_string());
            }
        };

        let total = elements.len();
        let items: Vec<T> = elements
            .into_iter()
            .filter_map(|element| serde_json::from_value(element).ok())
            .collect();

        if items.len() < total {
            warn!(
                key,
                dropped = total - items.len(),
                "Dropped malformed entries from stored list"
            );
        }

        Decoded::Loaded(items)
    }

    /// Load the list under `key`, substituting `fallback` when it is
    /// missing or corrupt.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: Vec<T>) -> Vec<T> {
        self.decode(key).unwrap_or(fallback)
    }

    /// Save `items` under `key`.
    ///
    /// Failures are logged and reported as [`Persisted::Failed`]; they are
    /// never propagated.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Persisted {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize list");
                return Persisted::Failed;
            }
        };

        match self.storage.set_item(key, &json) {
            Ok(()) => {
                debug!(key, entries = items.len(), "Saved list");
                Persisted::Saved
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to save list");
                Persisted::Failed
            }
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shelf_core::ProductId;

    use super::*;
    use crate::storage::MemoryStorage;

    fn store_with(key: &str, raw: &str) -> ListStore<MemoryStorage> {
        let storage = MemoryStorage::new();
        storage.set_item(key, raw).unwrap();
        ListStore::new(storage)
    }

    #[test]
    fn test_missing_key_uses_fallback() {
        let store = ListStore::new(MemoryStorage::new());
        assert_eq!(store.decode::<ProductId>("wishlist"), Decoded::Missing);

        let fallback = vec![ProductId::new("1")];
        assert_eq!(store.load("wishlist", fallback.clone()), fallback);
    }

    #[test]
    fn test_invalid_json_is_corrupt() {
        let store = store_with("wishlist", "{not json");
        assert!(store.decode::<ProductId>("wishlist").is_corrupt());
        assert!(store.load::<ProductId>("wishlist", Vec::new()).is_empty());
    }

    #[test]
    fn test_non_array_json_is_corrupt() {
        for raw in ["null", "42", "\"101\"", r#"{"id":"101"}"#] {
            let store = store_with("wishlist", raw);
            assert!(
                store.decode::<ProductId>("wishlist").is_corrupt(),
                "expected {raw} to be rejected"
            );
        }
    }

    #[test]
    fn test_malformed_elements_are_dropped() {
        let store = store_with("wishlist", r#"["101", 7, null, "202"]"#);
        let ids: Vec<ProductId> = store.load("wishlist", Vec::new());
        assert_eq!(ids, vec![ProductId::new("101"), ProductId::new("202")]);
    }

    #[test]
    fn test_save_then_load() {
        let store = ListStore::new(MemoryStorage::new());
        let ids = vec![ProductId::new("101"), ProductId::new("202")];

        assert_eq!(store.save("wishlist", &ids), Persisted::Saved);
        assert_eq!(
            store.storage().get_item("wishlist").unwrap().as_deref(),
            Some(r#"["101","202"]"#)
        );
        assert_eq!(store.load::<ProductId>("wishlist", Vec::new()), ids);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let store = ListStore::new(MemoryStorage::with_quota(4));
        let ids = vec![ProductId::new("101")];
        assert_eq!(store.save("wishlist", &ids), Persisted::Failed);
        assert_eq!(store.decode::<ProductId>("wishlist"), Decoded::Missing);
    }
}
