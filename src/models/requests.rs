//! Request DTOs for the products API
//!
//! Defines the structure of incoming HTTP request bodies, which double as the
//! repository's create and update inputs.

use serde::Deserialize;

use crate::store::{Column, SqlParam};

/// Input for creating a product (POST /api/products)
///
/// The id is assigned by the store and is never accepted from clients.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl NewProduct {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_name(&self.name).or_else(|| validate_price(self.price))
    }
}

/// Partial update input (PUT /api/products/:id)
///
/// Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductPatch {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }

    /// Validates the request data
    ///
    /// An empty patch is invalid: there is nothing to update.
    pub fn validate(&self) -> Option<String> {
        if self.is_empty() {
            return Some("At least one field must be provided for update".to_string());
        }
        if let Some(error) = self.name.as_deref().and_then(validate_name) {
            return Some(error);
        }
        self.price.and_then(validate_price)
    }

    /// Returns the present fields as `(column, value)` pairs in column order.
    pub fn fields(&self) -> Vec<(Column, SqlParam)> {
        let mut fields = Vec::with_capacity(3);
        if let Some(name) = &self.name {
            fields.push((Column::Name, SqlParam::from(name.as_str())));
        }
        if let Some(price) = self.price {
            fields.push((Column::Price, SqlParam::from(price)));
        }
        if let Some(description) = &self.description {
            fields.push((Column::Description, SqlParam::from(description.as_str())));
        }
        fields
    }
}

fn validate_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("Name cannot be empty".to_string());
    }
    None
}

fn validate_price(price: f64) -> Option<String> {
    if !price.is_finite() || price < 0.0 {
        return Some("Price must be a finite, non-negative number".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_deserialize() {
        let json = r#"{"name": "Widget", "price": 9.99, "description": "A widget"}"#;
        let req: NewProduct = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Widget");
        assert_eq!(req.price, 9.99);
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_new_product_requires_description() {
        let json = r#"{"name": "Widget", "price": 9.99}"#;
        assert!(serde_json::from_str::<NewProduct>(json).is_err());
    }

    #[test]
    fn test_validate_blank_name() {
        let req = NewProduct {
            name: "   ".to_string(),
            price: 1.0,
            description: String::new(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_negative_price() {
        let req = NewProduct {
            name: "Widget".to_string(),
            price: -0.5,
            description: String::new(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_empty_patch_is_invalid() {
        let patch: ProductPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        assert!(patch.validate().is_some());
        assert!(patch.fields().is_empty());
    }

    #[test]
    fn test_patch_fields_only_present() {
        let patch: ProductPatch = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert!(patch.validate().is_none());
        assert_eq!(
            patch.fields(),
            vec![(Column::Price, SqlParam::Real(12.5))]
        );
    }

    #[test]
    fn test_patch_zero_price_is_present() {
        let patch = ProductPatch {
            price: Some(0.0),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(patch.fields().len(), 1);
    }

    #[test]
    fn test_patch_field_order() {
        let patch = ProductPatch {
            name: Some("Gadget".to_string()),
            price: None,
            description: Some("New".to_string()),
        };
        let columns: Vec<Column> = patch.fields().into_iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec![Column::Name, Column::Description]);
    }
}
