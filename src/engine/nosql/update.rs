//! Field-level update operators

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::Document;
use super::error::Result;

/// A single-field modification, in the spirit of `$set` / `$push`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Update {
    /// Overwrite (or add) a field
    Set { field: String, value: Value },
    /// Append to an array field, creating it if missing
    Push { field: String, value: Value },
}

impl Update {
    pub fn set(field: &str, value: impl Into<Value>) -> Self {
        Self::Set { field: field.to_string(), value: value.into() }
    }

    pub fn push(field: &str, value: impl Into<Value>) -> Self {
        Self::Push { field: field.to_string(), value: value.into() }
    }

    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        match self {
            Update::Set { field, value } => {
                doc.set(field, value.clone());
                Ok(())
            }
            Update::Push { field, value } => doc.push(field, value.clone()),
        }
    }
}

/// Outcome of an update by filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateResult {
    pub matched: u64,
    pub modified: u64,
}

/// Outcome of a delete by filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub deleted: u64,
}
