//! Cat records and the operations the console needs from a store

use serde::{Deserialize, Serialize};

use crate::engine::nosql::error::Result;
use crate::engine::nosql::{Collection, Document, Filter, Query, Update};

pub const NAME: &str = "name";
pub const AGE: &str = "age";
pub const FEATURES: &str = "features";

/// A cat as entered through the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    pub name: String,
    pub age: i64,
    pub features: Vec<String>,
}

impl Cat {
    pub fn new(name: &str, age: i64, features: Vec<String>) -> Self {
        Self { name: name.to_string(), age, features }
    }

    /// Split a comma separated list, trimming entries and dropping empty ones.
    pub fn parse_features(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn to_document(&self) -> Result<Document> {
        Document::new(serde_json::to_value(self)?)
    }
}

/// Create / read / update / delete over cat records keyed by name.
///
/// Names are not unique; keyed operations act on the first match in
/// insertion order. A missing name is a normal outcome (`None` or a zero
/// count), while `Err` means the store itself failed.
pub trait CatStore {
    /// Store a new record and return its id
    fn insert_cat(&self, cat: &Cat) -> Result<String>;

    fn find_by_name(&self, name: &str) -> Result<Option<Document>>;

    fn list_all(&self) -> Result<Vec<Document>>;

    /// Overwrite the age of the first match. Returns the number of matched records.
    fn set_age(&self, name: &str, age: i64) -> Result<u64>;

    /// Append to the features of the first match. Returns the number of matched records.
    fn add_feature(&self, name: &str, feature: &str) -> Result<u64>;

    /// Returns the number of deleted records.
    fn delete_by_name(&self, name: &str) -> Result<u64>;

    /// Returns the number of deleted records.
    fn delete_all(&self) -> Result<u64>;
}

impl CatStore for Collection {
    fn insert_cat(&self, cat: &Cat) -> Result<String> {
        self.insert(cat.to_document()?)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Document>> {
        self.find_one(Filter::eq(NAME, name))
    }

    fn list_all(&self) -> Result<Vec<Document>> {
        self.all()
    }

    fn set_age(&self, name: &str, age: i64) -> Result<u64> {
        Ok(self.update_one(Filter::eq(NAME, name), &Update::set(AGE, age))?.matched)
    }

    fn add_feature(&self, name: &str, feature: &str) -> Result<u64> {
        Ok(self.update_one(Filter::eq(NAME, name), &Update::push(FEATURES, feature))?.matched)
    }

    fn delete_by_name(&self, name: &str) -> Result<u64> {
        Ok(self.delete_one(Filter::eq(NAME, name))?.deleted)
    }

    fn delete_all(&self) -> Result<u64> {
        Ok(self.delete_many(&Query::new())?.deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_parse_features() {
        assert_eq!(Cat::parse_features(" grey , fluffy,lazy "), ["grey", "fluffy", "lazy"]);
        assert_eq!(Cat::parse_features("one"), ["one"]);
        assert!(Cat::parse_features(" , ,").is_empty());
        assert!(Cat::parse_features("").is_empty());
    }

    #[test]
    fn test_cat_document_fields() {
        let doc = Cat::new("Barsik", 3, vec!["grey".into()]).to_document().unwrap();
        assert_eq!(doc.get(NAME), Some(&json!("Barsik")));
        assert_eq!(doc.get(AGE), Some(&json!(3)));
        assert_eq!(doc.get(FEATURES), Some(&json!(["grey"])));
    }

    #[test]
    fn test_collection_store_round_trip() {
        let dir = tempdir().unwrap();
        let cats = Collection::create(dir.path(), "cats").unwrap();
        let cat = Cat::new("Murka", 5, vec!["white".into(), "shy".into()]);
        cats.insert_cat(&cat).unwrap();

        let found = cats.find_by_name("Murka").unwrap().unwrap();
        let stored: Cat = serde_json::from_value(found.to_value()).unwrap();
        assert_eq!(stored, cat);
        assert!(cats.find_by_name("Tom").unwrap().is_none());
    }
}
