//! Library management
//!
//! A library is a loaded corpus plus its index and effective
//! configuration. Loading and indexing run once, to completion, when the
//! library is opened.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, Loader};
use crate::domain::{Corpus, Hit, Index, QueryError, QueryMode, Record, RecordId, Tokenizer};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),
}

/// Time spent in each stage of opening a library
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenTimings {
    pub load: Duration,
    pub index: Duration,
}

/// A loaded and indexed corpus
pub struct Library {
    path: PathBuf,
    config: Config,
    corpus: Corpus,
    index: Index,
    timings: OpenTimings,
}

impl Library {
    /// Loads the corpus at `path` and builds its index
    pub fn open(path: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let path = path.into();

        let start = Instant::now();
        let corpus = Loader::new(&path)
            .load()
            .with_context(|| format!("Failed to load corpus at {}", path.display()))?;
        let load = start.elapsed();

        let start = Instant::now();
        let tokenizer = Tokenizer::new().with_extra_stopwords(&config.extra_stopwords);
        let index = Index::build(&corpus, tokenizer);
        let index_time = start.elapsed();

        Ok(Self {
            path,
            config,
            corpus,
            index,
            timings: OpenTimings {
                load,
                index: index_time,
            },
        })
    }

    /// Returns the path the library was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn timings(&self) -> OpenTimings {
        self.timings
    }

    /// Runs a query and applies the result limit
    pub fn search(
        &self,
        query: &str,
        mode: QueryMode,
        limit: Option<usize>,
    ) -> Result<Vec<Hit>, QueryError> {
        let mut hits = self.index.query(query, mode)?;
        if let Some(limit) = limit {
            hits.truncate(limit);
        }
        Ok(hits)
    }

    /// Resolves a hit or ID to its record
    pub fn record(&self, id: &RecordId) -> Option<Record<'_>> {
        self.corpus.get(id)
    }

    /// Parses a textual record ID and looks it up
    pub fn find(&self, id: &str) -> Result<Record<'_>> {
        let parsed: RecordId = id.parse()?;
        self.corpus
            .get(&parsed)
            .ok_or_else(|| LibraryError::RecordNotFound(id.to_string()).into())
    }
}
