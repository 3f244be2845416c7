//! Meta information for a document database directory
//!
//! Written once as `_meta.json` when the database is created and checked
//! on every open.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use super::error::{NoSqlError, Result};

pub const META_FILE: &str = "_meta.json";

/// Layout version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Layout versions this build can read.
pub const READABLE_FORMATS: RangeInclusive<u32> = 1..=FORMAT_VERSION;

const ENGINE_ID: &str = "taskcat-docs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub engine: String,
    pub database: String,
    pub format_version: u32,
    /// Crate version that created the store
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Meta {
    pub fn new(database: &str) -> Self {
        Self {
            engine: ENGINE_ID.to_string(),
            database: database.to_string(),
            format_version: FORMAT_VERSION,
            created_by: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now(),
        }
    }

    /// Read `_meta.json` from a database directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let raw = fs::read(dir.join(META_FILE))?;
        let meta: Self = serde_json::from_slice(&raw)?;
        if !READABLE_FORMATS.contains(&meta.format_version) {
            return Err(NoSqlError::UnsupportedFormatVersion {
                found: meta.format_version,
                min: *READABLE_FORMATS.start(),
                max: *READABLE_FORMATS.end(),
            });
        }
        Ok(meta)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::write(dir.join(META_FILE), serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_written_header_reads_back() {
        let dir = tempdir().unwrap();
        let written = Meta::new("cat_database");
        written.save(dir.path()).unwrap();

        let read = Meta::load(dir.path()).unwrap();
        assert_eq!(read, written);
        assert_eq!(read.engine, ENGINE_ID);
    }

    #[test]
    fn test_future_format_rejected() {
        let dir = tempdir().unwrap();
        let mut meta = Meta::new("cat_database");
        meta.format_version = FORMAT_VERSION + 1;
        meta.save(dir.path()).unwrap();

        assert!(matches!(
            Meta::load(dir.path()),
            Err(NoSqlError::UnsupportedFormatVersion { found, .. }) if found == FORMAT_VERSION + 1
        ));
    }
}
