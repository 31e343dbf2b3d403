//! Cache Store Module
//!
//! In-process hash-map storage behind `MemoryCache`. Every key holds a hash
//! of string fields; entries never expire.

use std::collections::HashMap;

use crate::cache::glob_match;

// == Cache Store ==
/// Key to field-hash storage.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Hash storage
    entries: HashMap<String, HashMap<String, String>>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hash Get All ==
    /// Returns a copy of every field stored under `key`.
    ///
    /// An absent key yields an empty map, matching Redis `HGETALL`.
    pub fn hash_get_all(&self, key: &str) -> HashMap<String, String> {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    // == Hash Set ==
    /// Sets fields on the hash at `key`, keeping fields not mentioned.
    ///
    /// Setting no fields leaves the store unchanged.
    pub fn hash_set(&mut self, key: &str, fields: HashMap<String, String>) {
        if fields.is_empty() {
            return;
        }
        self.entries.entry(key.to_string()).or_default().extend(fields);
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns true if the key existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Keys Matching ==
    /// Returns all keys matching the glob `pattern`, sorted.
    pub fn keys_matching(&self, pattern: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();

        store.hash_set("product:1", fields(&[("name", "Widget")]));
        let value = store.hash_get_all("product:1");

        assert_eq!(value["name"], "Widget");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = CacheStore::new();
        assert!(store.hash_get_all("product:404").is_empty());
    }

    #[test]
    fn test_store_set_merges_fields() {
        let mut store = CacheStore::new();

        store.hash_set("product:1", fields(&[("name", "Widget"), ("price", "1")]));
        store.hash_set("product:1", fields(&[("price", "2")]));

        let value = store.hash_get_all("product:1");
        assert_eq!(value["name"], "Widget");
        assert_eq!(value["price"], "2");
    }

    #[test]
    fn test_store_set_empty_fields_is_noop() {
        let mut store = CacheStore::new();
        store.hash_set("product:1", HashMap::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new();

        store.hash_set("product:1", fields(&[("name", "Widget")]));
        assert!(store.delete("product:1"));

        assert!(store.is_empty());
        assert!(store.hash_get_all("product:1").is_empty());
    }

    #[test]
    fn test_store_delete_nonexistent() {
        let mut store = CacheStore::new();
        assert!(!store.delete("product:404"));
    }

    #[test]
    fn test_store_keys_matching() {
        let mut store = CacheStore::new();
        store.hash_set("product:2", fields(&[("id", "2")]));
        store.hash_set("product:1", fields(&[("id", "1")]));
        store.hash_set("session:1", fields(&[("user", "x")]));

        assert_eq!(
            store.keys_matching("product:*"),
            vec!["product:1".to_string(), "product:2".to_string()]
        );
    }
}
