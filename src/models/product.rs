//! Product entity and its cache hash encoding
//!
//! A cached product lives under `product:<id>` as a hash of string fields.
//! Encoding is lossless for `f64` prices because `Display` prints the
//! shortest representation that parses back to the same value.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// == Cache Key Constants ==
/// Prefix of every product cache key.
pub const CACHE_KEY_PREFIX: &str = "product:";

/// Glob pattern matching every product cache key.
pub const CACHE_KEY_PATTERN: &str = "product:*";

const FIELD_ID: &str = "id";
const FIELD_NAME: &str = "name";
const FIELD_PRICE: &str = "price";
const FIELD_DESCRIPTION: &str = "description";

/// Returns the cache key for a product id.
pub fn cache_key(id: i64) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, id)
}

/// Extracts the product id from a cache key, or `None` if the key does not
/// name a product.
pub fn id_from_cache_key(key: &str) -> Option<i64> {
    key.strip_prefix(CACHE_KEY_PREFIX)?.parse().ok()
}

// == Product ==
/// A product as stored in the system of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier, immutable after creation
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl Product {
    /// Encodes the product as cache hash fields.
    pub fn to_cache_fields(&self) -> HashMap<String, String> {
        HashMap::from([
            (FIELD_ID.to_string(), self.id.to_string()),
            (FIELD_NAME.to_string(), self.name.clone()),
            (FIELD_PRICE.to_string(), self.price.to_string()),
            (FIELD_DESCRIPTION.to_string(), self.description.clone()),
        ])
    }

    /// Decodes cache hash fields back into a typed product.
    ///
    /// Returns `None` for an empty hash, a missing field, or a value that
    /// does not parse.
    pub fn from_cache_fields(fields: &HashMap<String, String>) -> Option<Self> {
        Some(Self {
            id: fields.get(FIELD_ID)?.parse().ok()?,
            name: fields.get(FIELD_NAME)?.clone(),
            price: fields.get(FIELD_PRICE)?.parse().ok()?,
            description: fields.get(FIELD_DESCRIPTION)?.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 7,
            name: "Widget".to_string(),
            price: 9.99,
            description: "A widget".to_string(),
        }
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key(42), "product:42");
        assert_eq!(id_from_cache_key("product:42"), Some(42));
    }

    #[test]
    fn test_id_from_foreign_key() {
        assert_eq!(id_from_cache_key("session:42"), None);
        assert_eq!(id_from_cache_key("product:abc"), None);
        assert_eq!(id_from_cache_key("product:"), None);
    }

    #[test]
    fn test_cache_fields_are_strings() {
        let fields = widget().to_cache_fields();
        assert_eq!(fields["id"], "7");
        assert_eq!(fields["price"], "9.99");
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_decode_cache_fields() {
        let product = widget();
        let decoded = Product::from_cache_fields(&product.to_cache_fields()).unwrap();
        assert_eq!(decoded, product);
    }

    #[test]
    fn test_decode_empty_hash() {
        assert!(Product::from_cache_fields(&HashMap::new()).is_none());
    }

    #[test]
    fn test_decode_malformed_price() {
        let mut fields = widget().to_cache_fields();
        fields.insert("price".to_string(), "cheap".to_string());
        assert!(Product::from_cache_fields(&fields).is_none());
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_string(&widget()).unwrap();
        assert!(json.contains("\"name\":\"Widget\""));
        assert!(json.contains("\"price\":9.99"));
    }
}
