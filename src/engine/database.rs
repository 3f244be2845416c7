//! taskcat Database Module
//! SQLite handle over a single pooled connection

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to create database pool: {0}")]
    PoolError(#[from] r2d2::Error),
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Owned handle to the task database.
///
/// The pool holds exactly one connection that is never recycled, so the
/// process talks to the store through a single session and an in-memory
/// database keeps its contents for the lifetime of the handle.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(db_path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        Self::from_manager(manager)
    }

    pub fn in_memory() -> Result<Self, DatabaseError> {
        let manager = SqliteConnectionManager::memory().with_init(init_connection);
        Self::from_manager(manager)
    }

    fn from_manager(manager: SqliteConnectionManager) -> Result<Self, DatabaseError> {
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;
        Ok(Self { pool })
    }

    pub fn get_connection(&self) -> Result<DbConnection, DatabaseError> {
        Ok(self.pool.get()?)
    }

    pub fn get_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let tables = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(tables)
    }

    pub fn get_table_schema(&self, table_name: &str) -> Result<Vec<ColumnInfo>, DatabaseError> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table_name))?;
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    cid: row.get(0)?,
                    name: row.get(1)?,
                    col_type: row.get(2)?,
                    notnull: row.get(3)?,
                    dflt_value: row.get(4)?,
                    pk: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<ColumnInfo>, _>>()?;
        Ok(columns)
    }

    pub fn get_foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKeyInfo>, DatabaseError> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&format!("PRAGMA foreign_key_list('{}')", table_name))?;
        let mut fks = stmt
            .query_map([], |row| {
                Ok(ForeignKeyInfo {
                    from_table: table_name.to_string(),
                    to_table: row.get(2)?,
                    from_column: row.get(3)?,
                    to_column: row.get(4)?,
                    on_update: row.get(5)?,
                    on_delete: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<ForeignKeyInfo>, _>>()?;
        fks.sort_by(|a, b| a.from_column.cmp(&b.from_column));
        Ok(fks)
    }

    pub fn get_row_count(&self, table_name: &str) -> Result<u64, DatabaseError> {
        let conn = self.get_connection()?;
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table_name), [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn init_connection(conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch("PRAGMA foreign_keys=ON")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub cid: i32,
    pub name: String,
    pub col_type: String,
    pub notnull: bool,
    pub dflt_value: Option<String>,
    pub pk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyInfo {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub on_delete: String,
    pub on_update: String,
}
