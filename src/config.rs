use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Connection settings for one schema's database file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub database: PathBuf,
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,
}

impl StoreConfig {
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            foreign_keys: true,
        }
    }

    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }
}

fn default_foreign_keys() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelstoreConfig {
    #[serde(default = "default_blog")]
    pub blog: StoreConfig,
    #[serde(default = "default_library")]
    pub library: StoreConfig,
}

impl Default for RelstoreConfig {
    fn default() -> Self {
        Self {
            blog: default_blog(),
            library: default_library(),
        }
    }
}

fn default_blog() -> StoreConfig {
    StoreConfig::new("blog.db")
}

fn default_library() -> StoreConfig {
    StoreConfig::new("library.db")
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("relstore.toml")
}

/// Load the config file, or `None` when it does not exist
pub fn load_config(path: Option<&Path>) -> Result<Option<RelstoreConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: RelstoreConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}

/// Load the config file, falling back to defaults when it is missing or
/// unreadable. The load error, if any, is handed back for the caller to report.
pub fn load_config_or_default(path: Option<&Path>) -> (RelstoreConfig, Option<Error>) {
    match load_config(path) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(err) => (RelstoreConfig::default(), Some(err)),
    }
}

pub fn write_config(path: &Path, config: &RelstoreConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
