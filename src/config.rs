//! Optional `classdex.toml` configuration
//!
//! CLI flags override config values; config values override built-in
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClassdexConfig {
    /// Database file path
    pub database: Option<String>,
    /// Extraction strategy name ("scan" or "ast")
    pub strategy: Option<String>,
    /// Extra gitignore-style exclude patterns for the crawl
    pub exclude: Option<Vec<String>>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("classdex.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ClassdexConfig>> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ClassdexConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ClassdexConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
