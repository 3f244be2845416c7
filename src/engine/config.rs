//! taskcat Configuration Module
//! Handles loading and validating taskcat.config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "taskcat.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Invalid config format: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_users")]
    pub users: usize,
    #[serde(default = "default_tasks")]
    pub tasks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_doc_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/taskcat.db")
}

fn default_users() -> usize {
    10
}

fn default_tasks() -> usize {
    20
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_doc_database() -> String {
    "cat_database".to_string()
}

fn default_collection() -> String {
    "cats".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path() }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            tasks: default_tasks(),
        }
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database: default_doc_database(),
            collection: default_collection(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            database: DatabaseConfig::default(),
            seed: SeedConfig::default(),
            documents: DocumentsConfig::default(),
        }
    }
}

impl Config {
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = project_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path));
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load the project config, falling back to defaults when no file exists.
    pub fn load_or_default(project_dir: &Path) -> Result<Self, ConfigError> {
        match Self::load(project_dir) {
            Err(ConfigError::NotFound(path)) => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Write the config, refusing to clobber an existing file.
    pub fn save(&self, project_dir: &Path) -> Result<PathBuf, ConfigError> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Err(ConfigError::AlreadyExists(config_path));
        }
        std::fs::create_dir_all(project_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    /// SQLite file, preferring `overridden` (e.g. `--db`). Relative paths
    /// resolve against the project dir either way.
    pub fn database_path(&self, project_dir: &Path, overridden: Option<&Path>) -> PathBuf {
        resolve(project_dir, overridden.unwrap_or(self.database.path.as_path()))
    }

    pub fn data_dir(&self, project_dir: &Path, overridden: Option<&Path>) -> PathBuf {
        resolve(project_dir, overridden.unwrap_or(self.documents.data_dir.as_path()))
    }
}

fn resolve(project_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config.seed.users, 10);
        assert_eq!(config.seed.tasks, 20);
        assert_eq!(config.documents.database, "cat_database");
        assert_eq!(config.documents.collection, "cats");
        assert!(matches!(Config::load(dir.path()), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "seed": { "tasks": 5 }, "documents": { "collection": "kittens" } }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.seed.users, 10);
        assert_eq!(config.seed.tasks, 5);
        assert_eq!(config.documents.collection, "kittens");
        assert_eq!(config.documents.database, "cat_database");
        assert_eq!(config.database.path, PathBuf::from("./data/taskcat.db"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.seed.users = 3;
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.seed.users, 3);
        assert!(matches!(config.save(dir.path()), Err(ConfigError::AlreadyExists(_))));
    }

    #[test]
    fn test_relative_paths_resolve_against_project() {
        let config = Config::default();
        let project = Path::new("/srv/project");
        assert_eq!(config.database_path(project, None), project.join("./data/taskcat.db"));
        assert_eq!(config.data_dir(project, None), project.join("./data"));
    }

    #[test]
    fn test_overrides_resolve_like_config_paths() {
        let config = Config::default();
        let project = Path::new("/srv/project");
        assert_eq!(
            config.database_path(project, Some(Path::new("other.db"))),
            project.join("other.db")
        );
        assert_eq!(
            config.database_path(project, Some(Path::new("/tmp/abs.db"))),
            PathBuf::from("/tmp/abs.db")
        );
        assert_eq!(config.data_dir(project, Some(Path::new("cats"))), project.join("cats"));
    }
}
