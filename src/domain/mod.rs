//! Domain models for studydex
//!
//! Parsing, indexing and querying, without any I/O concerns.

mod id;
mod qa;
mod document;
mod corpus;
mod tokenize;
mod index;

pub use id::{DocumentId, RecordId, IdError};
pub use qa::QaItem;
pub use document::{Document, Frontmatter, Section};
pub use corpus::{Corpus, Record};
pub use tokenize::{Tokenizer, DEFAULT_STOPWORDS};
pub use index::{Hit, Index, QueryError, QueryMode};
