//! studydex - A searchable flashcard index for Markdown study notes
//!
//! The corpus is loaded into documents, sections and question/answer
//! items, indexed into an in-memory inverted index and queried from the
//! command line or an interactive REPL.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Corpus, Document, Index, QaItem, QueryMode, RecordId, Section};
pub use storage::{Library, LoadError, Loader};
