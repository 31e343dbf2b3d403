//! Record Store Module
//!
//! The system of record for products. The repository talks to it only through
//! the `RecordStore` trait: parameterized queries returning product rows, and
//! parameterized statements returning an execution outcome.

mod sqlite;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::Product;

pub use sqlite::SqliteStore;

// == Schema Constants ==
/// Table holding the products.
pub const PRODUCTS_TABLE: &str = "PRODUCTS";

/// Columns of the `PRODUCTS` table.
///
/// Column names are uppercase; they are part of the external schema contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Price,
    Description,
}

impl Column {
    pub const fn as_str(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Name => "NAME",
            Column::Price => "PRICE",
            Column::Description => "DESCRIPTION",
        }
    }
}

// == Query Parameters ==
/// A bound statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<f64> for SqlParam {
    fn from(value: f64) -> Self {
        SqlParam::Real(value)
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

// == Rows ==
/// A row read from the `PRODUCTS` table.
///
/// `id` is optional because the row shape is whatever the query selected;
/// rows lacking an id cannot be cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl ProductRow {
    /// Converts the row into a `Product`, or `None` when it has no id.
    pub fn into_product(self) -> Option<Product> {
        let id = self.id?;
        Some(Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
        })
    }
}

/// Result of a data-modifying statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecOutcome {
    /// Rows inserted, updated or deleted
    pub affected_rows: u64,
    /// Rowid generated by the most recent successful insert on the connection
    pub last_insert_id: i64,
}

// == Record Store Trait ==
/// Client for the relational system of record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Runs a parameterized `SELECT` returning product rows.
    async fn query(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<Vec<ProductRow>>;

    /// Runs a parameterized `INSERT`, `UPDATE` or `DELETE`.
    async fn execute(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<ExecOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_are_uppercase() {
        for column in [Column::Id, Column::Name, Column::Price, Column::Description] {
            assert_eq!(column.as_str(), column.as_str().to_uppercase());
        }
    }

    #[test]
    fn test_row_without_id_is_not_a_product() {
        let row = ProductRow {
            id: None,
            name: "Widget".to_string(),
            price: 1.0,
            description: String::new(),
        };
        assert!(row.into_product().is_none());
    }

    #[test]
    fn test_row_into_product() {
        let row = ProductRow {
            id: Some(4),
            name: "Widget".to_string(),
            price: 9.99,
            description: "A widget".to_string(),
        };
        let product = row.into_product().unwrap();
        assert_eq!(product.id, 4);
        assert_eq!(product.name, "Widget");
    }
}
