//! Document representation for the document store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::error::{NoSqlError, Result};

/// A stored document with engine metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID (UUIDv7, sorts by creation time)
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_created_at")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "_modified_at")]
    pub modified_at: DateTime<Utc>,

    /// The record fields
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Document {
    /// Wrap a JSON object in a new document with a generated ID.
    pub fn new(data: Value) -> Result<Self> {
        match data {
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(NoSqlError::NotAnObject),
        }
    }

    pub fn from_map(data: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            created_at: now,
            modified_at: now,
            data,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.data.insert(field.to_string(), value);
        self.modified_at = Utc::now();
    }

    /// Append to an array field, creating it when absent.
    pub fn push(&mut self, field: &str, value: Value) -> Result<()> {
        match self.data.get_mut(field) {
            Some(Value::Array(items)) => items.push(value),
            Some(_) => return Err(NoSqlError::NotAnArray(field.to_string())),
            None => {
                self.data.insert(field.to_string(), Value::Array(vec![value]));
            }
        }
        self.modified_at = Utc::now();
        Ok(())
    }

    /// The record fields as a JSON value, without engine metadata.
    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }
}
