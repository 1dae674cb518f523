//! Configuration handling for studydex
//!
//! Configuration is read from `~/.config/studydex/config.toml` (global)
//! and `.studydex.toml` in the corpus root (local). Local values override
//! global ones field by field. The only environment variable is
//! `STUDYDEX_PATH`, handled by the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::QueryMode;

/// File name of the corpus-local configuration
pub const LOCAL_CONFIG_FILE: &str = ".studydex.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Search settings as written in a config file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SearchFileConfig {
    /// How multiple query terms combine (`all` or `any`)
    pub mode: Option<QueryMode>,

    /// Maximum number of results
    pub limit: Option<usize>,

    /// Words ignored on top of the built-in stopwords
    pub extra_stopwords: Option<Vec<String>>,
}

/// One configuration file, every field optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    /// Corpus used when neither `--path` nor `STUDYDEX_PATH` is set
    pub default_path: Option<PathBuf>,

    /// Default output format (text or json)
    pub default_format: Option<OutputFormat>,

    /// Search settings
    pub search: SearchFileConfig,
}

impl FileConfig {
    /// Reads a config file, returning defaults when it does not exist
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

/// Effective configuration after merging global and local files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_path: Option<PathBuf>,
    pub default_format: OutputFormat,
    pub mode: QueryMode,
    pub limit: Option<usize>,
    pub extra_stopwords: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_path: None,
            default_format: OutputFormat::Text,
            mode: QueryMode::All,
            limit: None,
            extra_stopwords: Vec::new(),
        }
    }
}

impl Config {
    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "studydex", "studydex").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads the global configuration
    pub fn load_global() -> Result<Self> {
        let file = match Self::global_config_dir() {
            Some(dir) => FileConfig::read(&dir.join("config.toml"))
                .context("Failed to load global config")?,
            None => FileConfig::default(),
        };

        Ok(Self::default().merge(file))
    }

    /// Applies the corpus-local `.studydex.toml`, if any
    ///
    /// `default_path` is ignored in local files: the corpus is already
    /// chosen by the time they are read.
    pub fn with_corpus_overrides(self, corpus_path: &Path) -> Result<Self> {
        if !corpus_path.is_dir() {
            return Ok(self);
        }

        let mut local = FileConfig::read(&corpus_path.join(LOCAL_CONFIG_FILE))
            .context("Failed to load corpus config")?;
        local.default_path = None;

        Ok(self.merge(local))
    }

    /// Overrides fields that are set in `file`
    pub fn merge(mut self, file: FileConfig) -> Self {
        if let Some(path) = file.default_path {
            self.default_path = Some(path);
        }
        if let Some(format) = file.default_format {
            self.default_format = format;
        }
        if let Some(mode) = file.search.mode {
            self.mode = mode;
        }
        if let Some(limit) = file.search.limit {
            self.limit = Some(limit);
        }
        if let Some(stopwords) = file.search.extra_stopwords {
            self.extra_stopwords = stopwords;
        }
        self
    }
}
