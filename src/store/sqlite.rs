//! SQLite Record Store
//!
//! `RecordStore` implementation over a single rusqlite connection. Statements
//! run on tokio's blocking pool so callers never block the async runtime.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::types::ToSqlOutput;
use rusqlite::{params_from_iter, Connection, ErrorCode, ToSql};
use tracing::{debug, info};

use super::{Column, ExecOutcome, ProductRow, RecordStore, SqlParam, PRODUCTS_TABLE};
use crate::error::{StoreError, StoreResult};

// == Sqlite Store ==
/// Shared SQLite connection guarded by a mutex.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    // == Constructors ==
    /// Opens (or creates) a database file and ensures the products table exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(map_sqlite_error)?;
        info!("Opened product store at {}", path.display());
        Self::bootstrap(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_error)?;
        debug!("Opened in-memory product store");
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> StoreResult<Self> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                {id} INTEGER PRIMARY KEY AUTOINCREMENT,
                {name} TEXT NOT NULL,
                {price} REAL NOT NULL,
                {description} TEXT NOT NULL
            )",
            table = PRODUCTS_TABLE,
            id = Column::Id.as_str(),
            name = Column::Name.as_str(),
            price = Column::Price.as_str(),
            description = Column::Description.as_str(),
        );
        conn.execute_batch(&ddl).map_err(map_sqlite_error)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // == Blocking Bridge ==
    /// Runs `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Connection("connection mutex poisoned".to_string()))?;
            f(&*guard)
        })
        .await
        .map_err(|e| StoreError::Connection(format!("store task failed: {}", e)))?
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn query(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<Vec<ProductRow>> {
        let sql = sql.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&sql).map_err(map_sqlite_error)?;
            let rows = stmt
                .query_map(params_from_iter(params.iter()), |row| {
                    Ok(ProductRow {
                        id: row.get(Column::Id.as_str())?,
                        name: row.get(Column::Name.as_str())?,
                        price: row.get(Column::Price.as_str())?,
                        description: row.get(Column::Description.as_str())?,
                    })
                })
                .map_err(map_sqlite_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sqlite_error)?;
            Ok(rows)
        })
        .await
    }

    async fn execute(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<ExecOutcome> {
        let sql = sql.to_string();
        self.with_conn(move |conn| {
            let affected = conn
                .execute(&sql, params_from_iter(params.iter()))
                .map_err(map_sqlite_error)?;
            Ok(ExecOutcome {
                affected_rows: affected as u64,
                last_insert_id: conn.last_insert_rowid(),
            })
        })
        .await
    }
}

// == Parameter Binding ==
impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlParam::Int(v) => ToSqlOutput::from(*v),
            SqlParam::Real(v) => ToSqlOutput::from(*v),
            SqlParam::Text(v) => ToSqlOutput::from(v.as_str()),
        })
    }
}

// == Error Mapping ==
fn map_sqlite_error(err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::ConstraintViolation => StoreError::Constraint(err.to_string()),
            ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::NotADatabase
            | ErrorCode::SystemIoFailure => StoreError::Connection(err.to_string()),
            _ => StoreError::Query(err.to_string()),
        },
        _ => StoreError::Query(err.to_string()),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const INSERT: &str = "INSERT INTO PRODUCTS (NAME, PRICE, DESCRIPTION) VALUES (?, ?, ?)";
    const SELECT_ALL: &str = "SELECT ID, NAME, PRICE, DESCRIPTION FROM PRODUCTS ORDER BY ID";

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = SqliteStore::open_in_memory().unwrap();

        let first = store
            .execute(INSERT, vec!["a".into(), 1.0.into(), "x".into()])
            .await
            .unwrap();
        let second = store
            .execute(INSERT, vec!["b".into(), 2.0.into(), "y".into()])
            .await
            .unwrap();

        assert_eq!(first.affected_rows, 1);
        assert!(second.last_insert_id > first.last_insert_id);
    }

    #[tokio::test]
    async fn test_query_returns_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .execute(INSERT, vec!["Widget".into(), 9.99.into(), "A widget".into()])
            .await
            .unwrap();

        let rows = store.query(SELECT_ALL, vec![]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Widget");
        assert_eq!(rows[0].price, 9.99);
        assert!(rows[0].id.is_some());
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        let outcome = store
            .execute("DELETE FROM PRODUCTS WHERE ID = ?", vec![42.into()])
            .await
            .unwrap();
        assert_eq!(outcome.affected_rows, 0);
    }

    #[tokio::test]
    async fn test_syntax_error_is_query_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result = store.query("SELEKT * FROM PRODUCTS", vec![]).await;
        assert!(matches!(result, Err(StoreError::Query(_))));
    }

    #[tokio::test]
    async fn test_not_null_violation_is_constraint_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result = store
            .execute(
                "INSERT INTO PRODUCTS (NAME, PRICE) VALUES (?, ?)",
                vec!["a".into(), 1.0.into()],
            )
            .await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
    }
}
