//! Optional TOML settings for the `tags` binary.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings read from `config.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Where the `TagStore|v1` snapshot file lives
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Reads the user's `tagstore/config.toml`, or defaults when there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Reads settings from `config_path`. A missing file yields defaults;
    /// an unreadable or invalid one is an error naming the path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// `<platform config dir>/tagstore/config.toml`, e.g.
    /// `~/.config/tagstore/config.toml` on Linux.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tagstore")
            .join("config.toml")
    }

    /// Picks the directory the tag store reads and saves its snapshot in.
    ///
    /// `--dir` wins over `data_dir` from the config file. Without either, the
    /// snapshot goes in the platform data directory (`~/.local/share/tagstore`
    /// on Linux), or the working directory if there is none.
    pub fn data_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.data_dir.clone())
            .or_else(|| dirs::data_dir().map(|d| d.join("tagstore")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
