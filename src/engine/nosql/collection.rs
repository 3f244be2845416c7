//! Collection management for the document store

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::document::Document;
use super::error::{NoSqlError, Result};
use super::query::{Filter, Query};
use super::update::{DeleteResult, Update, UpdateResult};

/// A schemaless collection: one JSON file per document.
#[derive(Debug)]
pub struct Collection {
    pub name: String,
    path: PathBuf,
}

impl Collection {
    /// Open an existing collection
    pub fn open(base_path: &Path, name: &str) -> Result<Self> {
        validate_name(name)?;
        let path = base_path.join(name);

        if !path.is_dir() {
            return Err(NoSqlError::CollectionNotFound(name.to_string()));
        }

        Ok(Self { name: name.to_string(), path })
    }

    /// Create a new collection
    pub fn create(base_path: &Path, name: &str) -> Result<Self> {
        validate_name(name)?;
        let path = base_path.join(name);

        if path.exists() {
            return Err(NoSqlError::CollectionAlreadyExists(name.to_string()));
        }

        fs::create_dir_all(&path)?;
        debug!(collection = name, "collection created");
        Ok(Self { name: name.to_string(), path })
    }

    pub fn open_or_create(base_path: &Path, name: &str) -> Result<Self> {
        if base_path.join(name).is_dir() {
            Self::open(base_path, name)
        } else {
            Self::create(base_path, name)
        }
    }

    fn doc_path(&self, id: &str) -> PathBuf {
        self.path.join(format!("{}.json", id))
    }

    fn write(&self, doc: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(doc)?;
        let target = self.doc_path(&doc.id);
        let temp = target.with_extension("json.tmp");
        fs::write(&temp, content)?;
        fs::rename(&temp, &target)?;
        Ok(())
    }

    /// Insert a document
    pub fn insert(&self, doc: Document) -> Result<String> {
        if self.doc_path(&doc.id).exists() {
            return Err(NoSqlError::DuplicateId(doc.id));
        }
        self.write(&doc)?;
        debug!(collection = %self.name, id = %doc.id, "document inserted");
        Ok(doc.id)
    }

    pub fn get(&self, id: &str) -> Result<Document> {
        let raw = fs::read(self.doc_path(id)).map_err(|e| not_found_as(e, id))?;
        Ok(serde_json::from_slice(&raw)?)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        fs::remove_file(self.doc_path(id)).map_err(|e| not_found_as(e, id))
    }

    /// Document IDs in file-name order. In-flight `.json.tmp` files are skipped.
    pub fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.list_ids()?.len())
    }

    /// All documents in insertion order
    pub fn all(&self) -> Result<Vec<Document>> {
        let ids = self.list_ids()?;
        let mut docs = Vec::with_capacity(ids.len());

        for id in ids {
            docs.push(self.get(&id)?);
        }

        // v7 ids are monotonic per process; the wall clock may step back.
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(docs)
    }

    pub fn find(&self, query: &Query) -> Result<Vec<Document>> {
        Ok(query.execute(self.all()?))
    }

    /// First document, in insertion order, matching the filter
    pub fn find_one(&self, filter: Filter) -> Result<Option<Document>> {
        let query = Query::new().filter(filter).limit(1);
        Ok(self.find(&query)?.into_iter().next())
    }

    /// Apply `update` to the first matching document
    pub fn update_one(&self, filter: Filter, update: &Update) -> Result<UpdateResult> {
        let Some(mut doc) = self.find_one(filter)? else {
            return Ok(UpdateResult::default());
        };

        let before = doc.data.clone();
        update.apply(&mut doc)?;
        if doc.data == before {
            return Ok(UpdateResult { matched: 1, modified: 0 });
        }

        self.write(&doc)?;
        Ok(UpdateResult { matched: 1, modified: 1 })
    }

    /// Delete the first matching document
    pub fn delete_one(&self, filter: Filter) -> Result<DeleteResult> {
        match self.find_one(filter)? {
            Some(doc) => {
                self.delete(&doc.id)?;
                Ok(DeleteResult { deleted: 1 })
            }
            None => Ok(DeleteResult::default()),
        }
    }

    /// Delete every document matching the query; an empty query matches all
    pub fn delete_many(&self, query: &Query) -> Result<DeleteResult> {
        let mut deleted: u64 = 0;
        for doc in self.find(query)? {
            self.delete(&doc.id)?;
            deleted += 1;
        }
        debug!(collection = %self.name, deleted, "documents deleted");
        Ok(DeleteResult { deleted })
    }

    /// Drop this collection
    pub fn drop(self) -> Result<()> {
        fs::remove_dir_all(&self.path)?;
        Ok(())
    }
}

fn not_found_as(err: io::Error, id: &str) -> NoSqlError {
    if err.kind() == io::ErrorKind::NotFound {
        NoSqlError::DocumentNotFound(id.to_string())
    } else {
        NoSqlError::Io(err)
    }
}

/// Collection and database names map straight to directory names.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(NoSqlError::InvalidName("name cannot be empty".to_string()));
    }

    if name.starts_with('_') {
        return Err(NoSqlError::InvalidName("name cannot start with underscore".to_string()));
    }

    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(NoSqlError::InvalidName(format!("'{}' must be alphanumeric", name)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn cat(value: Value) -> Document {
        Document::new(value).unwrap()
    }

    #[test]
    fn test_collection_crud() {
        let dir = tempdir().unwrap();
        let col = Collection::create(dir.path(), "cats").unwrap();

        let id = col.insert(cat(json!({"name": "Barsik", "age": 3}))).unwrap();
        assert_eq!(col.get(&id).unwrap().get("name"), Some(&json!("Barsik")));

        assert_eq!(col.count().unwrap(), 1);

        col.delete(&id).unwrap();
        assert!(matches!(col.get(&id), Err(NoSqlError::DocumentNotFound(_))));
        assert!(matches!(col.delete(&id), Err(NoSqlError::DocumentNotFound(_))));
    }

    #[test]
    fn test_all_keeps_insertion_order() {
        let dir = tempdir().unwrap();
        let col = Collection::create(dir.path(), "cats").unwrap();
        for name in ["Zorro", "Alfa", "Murka", "Barsik"] {
            col.insert(cat(json!({ "name": name }))).unwrap();
        }

        let names: Vec<Value> = col.all().unwrap().into_iter().map(|d| d.data["name"].clone()).collect();
        assert_eq!(names, [json!("Zorro"), json!("Alfa"), json!("Murka"), json!("Barsik")]);
    }

    #[test]
    fn test_order_ignores_clock_steps() {
        let dir = tempdir().unwrap();
        let col = Collection::create(dir.path(), "cats").unwrap();
        let first = cat(json!({"name": "Tom"}));
        let mut second = cat(json!({"name": "Tom", "age": 2}));
        second.created_at = first.created_at - chrono::Duration::hours(1);

        let first_id = col.insert(first).unwrap();
        col.insert(second).unwrap();

        assert_eq!(col.all().unwrap()[0].id, first_id);
        let found = col.find_one(Filter::eq("name", "Tom")).unwrap().unwrap();
        assert_eq!(found.id, first_id);
    }

    #[test]
    fn test_update_one_touches_first_match() {
        let dir = tempdir().unwrap();
        let col = Collection::create(dir.path(), "cats").unwrap();
        let first = col.insert(cat(json!({"name": "Tom", "age": 1}))).unwrap();
        let second = col.insert(cat(json!({"name": "Tom", "age": 1}))).unwrap();

        let result = col.update_one(Filter::eq("name", "Tom"), &Update::set("age", 9)).unwrap();
        assert_eq!(result, UpdateResult { matched: 1, modified: 1 });
        assert_eq!(col.get(&first).unwrap().get("age"), Some(&json!(9)));
        assert_eq!(col.get(&second).unwrap().get("age"), Some(&json!(1)));

        let same = col.update_one(Filter::eq("name", "Tom"), &Update::set("age", 9)).unwrap();
        assert_eq!(same, UpdateResult { matched: 1, modified: 0 });

        let missing = col.update_one(Filter::eq("name", "Jerry"), &Update::set("age", 2)).unwrap();
        assert_eq!(missing, UpdateResult::default());
    }

    #[test]
    fn test_delete_one_and_many() {
        let dir = tempdir().unwrap();
        let col = Collection::create(dir.path(), "cats").unwrap();
        for name in ["Tom", "Tom", "Murka"] {
            col.insert(cat(json!({ "name": name }))).unwrap();
        }

        assert_eq!(col.delete_one(Filter::eq("name", "Tom")).unwrap().deleted, 1);
        assert_eq!(col.count().unwrap(), 2);
        assert_eq!(col.delete_one(Filter::eq("name", "Ghost")).unwrap().deleted, 0);

        assert_eq!(col.delete_many(&Query::new()).unwrap().deleted, 2);
        assert!(col.all().unwrap().is_empty());
        assert_eq!(col.delete_many(&Query::new()).unwrap().deleted, 0);
    }

    #[test]
    fn test_names_validated() {
        let dir = tempdir().unwrap();
        assert!(Collection::create(dir.path(), "").is_err());
        assert!(Collection::create(dir.path(), "_meta").is_err());
        assert!(Collection::create(dir.path(), "../escape").is_err());
        assert!(matches!(
            Collection::open(dir.path(), "cats"),
            Err(NoSqlError::CollectionNotFound(_))
        ));

        Collection::create(dir.path(), "cats").unwrap();
        assert!(matches!(
            Collection::create(dir.path(), "cats"),
            Err(NoSqlError::CollectionAlreadyExists(_))
        ));
        assert!(Collection::open_or_create(dir.path(), "cats").is_ok());
    }
}
