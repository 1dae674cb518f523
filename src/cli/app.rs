//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{outline, repl, search, show};
use crate::domain::QueryMode;
use crate::storage::{Config, Library};

#[derive(Parser)]
#[command(name = "studydex")]
#[command(author, version, about = "Searchable flashcard index for Markdown study notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Corpus directory (or a single Markdown file)
    #[arg(long, short = 'p', global = true, env = "STUDYDEX_PATH")]
    pub path: Option<PathBuf>,

    /// Search query (shorthand for `studydex search <query>`)
    pub query: Option<String>,

    #[command(flatten)]
    pub options: SearchOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every search entry point
#[derive(Args, Debug, Clone, Default)]
pub struct SearchOptions {
    /// Match records containing any query term (OR)
    #[arg(long, conflicts_with = "all")]
    pub any: bool,

    /// Match only records containing every query term (AND)
    #[arg(long)]
    pub all: bool,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl SearchOptions {
    /// Resolves the query mode against the configured default
    pub fn mode(&self, config: &Config) -> QueryMode {
        if self.any {
            QueryMode::Any
        } else if self.all {
            QueryMode::All
        } else {
            config.mode
        }
    }

    /// Resolves the result limit against the configured default
    pub fn limit(&self, config: &Config) -> Option<usize> {
        self.limit.or(config.limit)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search sections and QA items
    Search {
        /// Search query
        query: String,

        #[command(flatten)]
        options: SearchOptions,
    },

    /// Show a section or QA item in full
    Show {
        /// Record ID (e.g. d-7f2b4c1.3 or d-7f2b4c1.3.q1)
        id: String,
    },

    /// List documents and their section outline
    List,

    /// Show corpus and index statistics
    Stats,

    /// Start an interactive query session
    Repl {
        #[command(flatten)]
        options: SearchOptions,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_global()?;

    let command = match cli.command {
        Some(command) => command,
        None => match cli.query {
            Some(query) => Commands::Search {
                query,
                options: cli.options,
            },
            None => anyhow::bail!("No query given. Run 'studydex --help' for usage."),
        },
    };

    let corpus_path = resolve_corpus_path(cli.path, &config)?;
    let config = config.with_corpus_overrides(&corpus_path)?;

    // Resolved after the corpus-local file so its default_format applies
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("studydex starting");
    output.verbose_ctx("config", &format!("Corpus path: {}", corpus_path.display()));

    let library = open_library(&corpus_path, config, &output)?;

    match command {
        Commands::Search { query, options } => {
            let mode = options.mode(library.config());
            let limit = options.limit(library.config());
            search::run(&library, &output, &query, mode, limit)?
        }
        Commands::Show { id } => show::run(&library, &output, &id)?,
        Commands::List => outline::list(&library, &output)?,
        Commands::Stats => outline::stats(&library, &output)?,
        Commands::Repl { options } => {
            let mode = options.mode(library.config());
            let limit = options.limit(library.config());
            repl::Repl::new(&library, &output, mode, limit).run()?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Picks the corpus: `--path` / `STUDYDEX_PATH`, then config, then cwd
fn resolve_corpus_path(cli_path: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = cli_path.or_else(|| config.default_path.clone()) {
        return Ok(path);
    }

    std::env::current_dir().context("Failed to determine current directory")
}

/// Loads the corpus and builds the index, logging each stage
fn open_library(path: &Path, config: Config, output: &Output) -> Result<Library> {
    output.verbose_ctx("load", &format!("Loading corpus from: {}", path.display()));

    let library = Library::open(path, config)?;
    let corpus = library.corpus();
    let timings = library.timings();

    output.verbose_ctx(
        "load",
        &format!(
            "Loaded {} documents ({} sections, {} QA items) in {:?}",
            corpus.documents().len(),
            corpus.section_count(),
            corpus.qa_count(),
            timings.load
        ),
    );
    output.verbose_ctx(
        "index",
        &format!(
            "Indexed {} records, {} terms in {:?}",
            library.index().len(),
            library.index().term_count(),
            timings.index
        ),
    );

    Ok(library)
}
