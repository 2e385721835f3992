//! Configuration file handling.
//!
//! Reads `config.toml` from the platform config directory
//! (e.g. `~/.config/bonuslog/config.toml`).

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides every other way of choosing the data file.
pub const DATA_FILE_ENV: &str = "BONUSLOG_DATA_FILE";
pub const DATA_FILE_NAME: &str = "cards.json";
pub const LOG_FILE_NAME: &str = "bonuslog.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Explicit location of the cards file.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Ask before deleting a card.
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    /// Save unsaved changes when a front-end quits.
    #[serde(default = "default_true")]
    pub save_on_exit: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            confirm_delete: true,
            save_on_exit: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "bonuslog", "bonuslog")
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Loads the config file, falling back to defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::info!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Where the cards live for this run.
    pub fn data_file(&self) -> PathBuf {
        self.resolve_data_file(env::var_os(DATA_FILE_ENV).map(PathBuf::from))
    }

    /// Resolution order: override, config, platform data dir, working dir.
    pub fn resolve_data_file(&self, env_override: Option<PathBuf>) -> PathBuf {
        if let Some(path) = env_override.filter(|p| !p.as_os_str().is_empty()) {
            return path;
        }
        if let Some(path) = &self.data_file {
            return path.clone();
        }
        match project_dirs() {
            Some(proj) => proj.data_dir().join(DATA_FILE_NAME),
            None => PathBuf::from(DATA_FILE_NAME),
        }
    }

    /// The log file sits next to the cards file.
    pub fn log_file(&self) -> PathBuf {
        let data_file = self.data_file();
        match data_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(LOG_FILE_NAME),
            _ => PathBuf::from(LOG_FILE_NAME),
        }
    }
}
