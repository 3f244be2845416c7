//! taskcat document store
//!
//! A file-backed JSON document engine:
//! - one directory per database, with a versioned `_meta.json`
//! - one directory per collection, one file per document
//! - time-ordered document IDs, so reads come back in insertion order

pub mod storage;
pub mod meta;
pub mod collection;
pub mod document;
pub mod query;
pub mod update;
pub mod error;

pub use storage::NoSqlEngine;
pub use meta::Meta;
pub use collection::Collection;
pub use document::Document;
pub use query::{Condition, Direction, Filter, Query};
pub use update::{DeleteResult, Update, UpdateResult};
pub use error::NoSqlError;
