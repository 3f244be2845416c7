//! Document store error types

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoSqlError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Collection already exists: {0}")]
    CollectionAlreadyExists(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Format version {found} not supported (min: {min}, max: {max})")]
    UnsupportedFormatVersion { found: u32, min: u32, max: u32 },

    #[error("Store at {path} belongs to database '{found}'")]
    DatabaseMismatch { path: String, found: String },

    #[error("Cannot push to '{0}': field is not an array")]
    NotAnArray(String),

    #[error("Document is not a JSON object")]
    NotAnObject,

    #[error("Document ID already exists: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, NoSqlError>;
