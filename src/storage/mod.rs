//! # Storage Layer
//!
//! Reading the corpus from disk and resolving configuration.
//!
//! ## Inputs
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Notes | Markdown, ATX headings, optional YAML frontmatter | `<corpus>/**/*.md` |
//! | Local config | TOML | `<corpus>/.studydex.toml` |
//! | Global config | TOML | `~/.config/studydex/config.toml` |
//!
//! Nothing is written back: the index lives in memory and is rebuilt on
//! every run.
//!
//! ## Key Types
//!
//! - [`Loader`] - Reads Markdown files into a corpus
//! - [`Library`] - A loaded corpus with its index
//! - [`Config`] - Global and corpus-local configuration

mod loader;
mod config;
mod library;

pub use loader::{LoadError, Loader};
pub use config::{Config, ConfigError, FileConfig, OutputFormat, SearchFileConfig, LOCAL_CONFIG_FILE};
pub use library::{Library, LibraryError, OpenTimings};
