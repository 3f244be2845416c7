//! Row types for the task schema

use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known task states. Serializes as the label stored in `status.name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum StatusName {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl StatusName {
    pub const ALL: [StatusName; 3] = [StatusName::New, StatusName::InProgress, StatusName::Completed];

    /// Label stored in `status.name`
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusName::New => "new",
            StatusName::InProgress => "in progress",
            StatusName::Completed => "completed",
        }
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub fullname: String,
    pub email: String,
}

impl User {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            fullname: row.get("fullname")?,
            email: row.get("email")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,
    pub name: String,
}

impl Status {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status_id: i64,
    pub user_id: i64,
}

impl Task {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            status_id: row.get("status_id")?,
            user_id: row.get("user_id")?,
        })
    }
}

/// Fields for a task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status_id: i64,
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_uses_stored_labels() {
        for status in StatusName::ALL {
            assert_eq!(serde_json::to_value(status).unwrap(), serde_json::json!(status.as_str()));
        }
        assert_eq!(serde_json::to_string(&StatusName::InProgress).unwrap(), r#""in progress""#);
        assert_eq!(StatusName::InProgress.to_string(), "in progress");
    }
}
