//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `studydex <query>` | One-shot search (same as `search`) |
//! | `search <query>` | Ranked keyword search |
//! | `show <id>` | Print a section or QA item |
//! | `list` | Documents with their section outline |
//! | `stats` | Corpus and index statistics |
//! | `repl` | Interactive query loop |
//!
//! The corpus is chosen with `--path`, then `STUDYDEX_PATH`, then the
//! config's `default_path`, then the current directory.
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for load, index and query diagnostics on stderr:
//! ```bash
//! studydex --verbose --path notes/ "dependency injection"
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod search;
mod show;
mod outline;
mod repl;

pub use app::{Cli, Commands, SearchOptions, run};
pub use output::{Output, OutputFormat};
pub use repl::{Repl, Step};
