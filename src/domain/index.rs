//! Inverted index over corpus records
//!
//! The index maps each token to the set of records containing it. It is
//! built in one pass from a [`Corpus`] and never mutated afterwards: any
//! content change means building a new index.
//!
//! ## Query semantics
//!
//! | Mode | Combines posting lists by |
//! |------|---------------------------|
//! | `all` (default) | intersection (every term must match) |
//! | `any` | union (at least one term must match) |
//!
//! Hits are ranked by the number of distinct query terms they match,
//! ties broken by document order.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::corpus::{Corpus, Record};
use super::id::RecordId;
use super::tokenize::Tokenizer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid query '{query}': no searchable terms (empty or only stopwords)")]
    InvalidQuery { query: String },
}

/// How posting lists of multiple query terms are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Every term must match (AND)
    #[default]
    All,
    /// At least one term must match (OR)
    Any,
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryMode::All => write!(f, "all"),
            QueryMode::Any => write!(f, "any"),
        }
    }
}

impl std::str::FromStr for QueryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "and" => Ok(QueryMode::All),
            "any" | "or" => Ok(QueryMode::Any),
            _ => Err(format!("Unknown query mode: {}", s)),
        }
    }
}

/// A ranked query match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub id: RecordId,

    /// Number of distinct query terms matched
    pub score: usize,

    /// The query terms this record matched, in query order
    pub matched: Vec<String>,
}

/// Immutable term -> record index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    tokenizer: Tokenizer,

    /// Record IDs by position in document order
    records: Vec<RecordId>,

    /// Token -> positions of the records containing it
    postings: HashMap<String, BTreeSet<usize>>,
}

impl Index {
    /// Builds the index over every record of the corpus
    pub fn build(corpus: &Corpus, tokenizer: Tokenizer) -> Self {
        let mut records = Vec::new();
        let mut postings: HashMap<String, BTreeSet<usize>> = HashMap::new();

        for (position, record) in corpus.records().enumerate() {
            records.push(record.id().clone());

            for term in tokenizer.terms(&record.index_text()) {
                postings.entry(term).or_default().insert(position);
            }
        }

        Self {
            tokenizer,
            records,
            postings,
        }
    }

    /// Returns the tokenizer used for both indexing and queries
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Number of indexed records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Returns all terms in sorted order
    pub fn terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.postings.keys().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }

    /// Returns the posting list of a token, in document order
    ///
    /// The token is normalized the same way query terms are.
    pub fn postings(&self, token: &str) -> Vec<&RecordId> {
        self.postings
            .get(&token.to_lowercase())
            .map(|positions| positions.iter().map(|&p| &self.records[p]).collect())
            .unwrap_or_default()
    }

    /// Returns the full term -> records mapping in sorted order
    pub fn snapshot(&self) -> BTreeMap<&str, Vec<&RecordId>> {
        self.postings
            .iter()
            .map(|(term, positions)| {
                (
                    term.as_str(),
                    positions.iter().map(|&p| &self.records[p]).collect(),
                )
            })
            .collect()
    }

    /// Runs a free-text query
    ///
    /// Fails with [`QueryError::InvalidQuery`] when the query has no
    /// searchable terms. A query matching nothing returns an empty list.
    pub fn query(&self, query: &str, mode: QueryMode) -> Result<Vec<Hit>, QueryError> {
        let mut terms: Vec<String> = Vec::new();
        for term in self.tokenizer.tokenize(query) {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }

        if terms.is_empty() {
            return Err(QueryError::InvalidQuery {
                query: query.to_string(),
            });
        }

        let mut matches: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for term in &terms {
            if let Some(positions) = self.postings.get(term) {
                for &position in positions {
                    matches.entry(position).or_default().push(term);
                }
            }
        }

        let mut ranked: Vec<(usize, Vec<&str>)> = matches
            .into_iter()
            .filter(|(_, matched)| mode == QueryMode::Any || matched.len() == terms.len())
            .collect();

        // Stable sort keeps document order among equal scores
        ranked.sort_by_key(|(_, matched)| Reverse(matched.len()));

        Ok(ranked
            .into_iter()
            .map(|(position, matched)| Hit {
                id: self.records[position].clone(),
                score: matched.len(),
                matched: matched.into_iter().map(str::to_string).collect(),
            })
            .collect())
    }

    /// Returns the first line of the record that contains a matched term
    pub fn snippet(&self, record: &Record<'_>, hit: &Hit) -> Option<String> {
        const MAX_CHARS: usize = 100;

        let text = record.text();
        let line = text.lines().map(str::trim).find(|line| {
            !line.is_empty()
                && self
                    .tokenizer
                    .tokenize(line)
                    .iter()
                    .any(|t| hit.matched.contains(t))
        })?;

        if line.chars().count() > MAX_CHARS {
            let truncated: String = line.chars().take(MAX_CHARS).collect();
            Some(format!("{}...", truncated.trim_end()))
        } else {
            Some(line.to_string())
        }
    }
}
