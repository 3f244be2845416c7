//! Document store entry point
//!
//! A store is one database directory under the data dir:
//! `<data_dir>/<database>/_meta.json` plus a subdirectory per collection.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::collection::{validate_name, Collection};
use super::error::{NoSqlError, Result};
use super::meta::{Meta, META_FILE};

pub struct NoSqlEngine {
    base_path: PathBuf,
    meta: Meta,
}

impl NoSqlEngine {
    /// Open an existing database
    pub fn open(data_dir: &Path, database: &str) -> Result<Self> {
        validate_name(database)?;
        let base_path = data_dir.join(database);

        if !base_path.join(META_FILE).exists() {
            return Err(NoSqlError::DatabaseNotFound(database.to_string()));
        }

        let meta = Meta::load(&base_path)?;
        if meta.database != database {
            return Err(NoSqlError::DatabaseMismatch {
                path: base_path.display().to_string(),
                found: meta.database,
            });
        }

        Ok(Self { base_path, meta })
    }

    /// Create a new database
    pub fn create(data_dir: &Path, database: &str) -> Result<Self> {
        validate_name(database)?;
        let base_path = data_dir.join(database);
        fs::create_dir_all(&base_path)?;

        let meta = Meta::new(database);
        meta.save(&base_path)?;
        info!(database, path = %base_path.display(), "document database created");

        Ok(Self { base_path, meta })
    }

    pub fn open_or_create(data_dir: &Path, database: &str) -> Result<Self> {
        if data_dir.join(database).join(META_FILE).exists() {
            Self::open(data_dir, database)
        } else {
            Self::create(data_dir, database)
        }
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    pub fn create_collection(&self, name: &str) -> Result<Collection> {
        Collection::create(&self.base_path, name)
    }

    /// Open an existing collection
    pub fn collection(&self, name: &str) -> Result<Collection> {
        Collection::open(&self.base_path, name)
    }

    /// Open a collection, creating it on first use
    pub fn collection_or_create(&self, name: &str) -> Result<Collection> {
        Collection::open_or_create(&self.base_path, name)
    }

    /// Collection names, sorted. Entries starting with `_` or `.` are engine files.
    pub fn list_collections(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(['_', '.']) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn drop_collection(&self, name: &str) -> Result<()> {
        self.collection(name)?.drop()
    }

    pub fn collection_exists(&self, name: &str) -> bool {
        self.base_path.join(name).is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::nosql::Document;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_engine_lifecycle() {
        let dir = tempdir().unwrap();
        let engine = NoSqlEngine::create(dir.path(), "cat_database").unwrap();
        assert!(engine.list_collections().unwrap().is_empty());

        engine.create_collection("cats").unwrap();
        assert!(engine.collection_exists("cats"));
        assert_eq!(engine.list_collections().unwrap(), vec!["cats".to_string()]);

        engine.drop_collection("cats").unwrap();
        assert!(!engine.collection_exists("cats"));
    }

    #[test]
    fn test_engine_reopen() {
        let dir = tempdir().unwrap();
        {
            let engine = NoSqlEngine::open_or_create(dir.path(), "cat_database").unwrap();
            let cats = engine.collection_or_create("cats").unwrap();
            cats.insert(Document::new(json!({"name": "Barsik"})).unwrap()).unwrap();
        }
        {
            let engine = NoSqlEngine::open_or_create(dir.path(), "cat_database").unwrap();
            assert_eq!(engine.meta().database, "cat_database");
            assert_eq!(engine.collection("cats").unwrap().count().unwrap(), 1);
        }
    }

    #[test]
    fn test_open_missing_database() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            NoSqlEngine::open(dir.path(), "cat_database"),
            Err(NoSqlError::DatabaseNotFound(_))
        ));
    }
}
