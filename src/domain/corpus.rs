//! The loaded corpus and its searchable records
//!
//! Records are sections and QA items. They are enumerated in document
//! order: corpus path order, then section order, each QA item right after
//! its owning section. That order breaks ranking ties.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::document::{Document, Section};
use super::id::{DocumentId, RecordId};
use super::qa::QaItem;

/// A borrowed view of one searchable record
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    Section {
        document: &'a Document,
        section: &'a Section,
    },
    Qa {
        document: &'a Document,
        section: &'a Section,
        item: &'a QaItem,
    },
}

impl<'a> Record<'a> {
    pub fn id(&self) -> &'a RecordId {
        match *self {
            Record::Section { section, .. } => &section.id,
            Record::Qa { item, .. } => &item.id,
        }
    }

    pub fn document(&self) -> &'a Document {
        match *self {
            Record::Section { document, .. } | Record::Qa { document, .. } => document,
        }
    }

    /// The section this record lives in (the section itself for sections)
    pub fn section(&self) -> &'a Section {
        match *self {
            Record::Section { section, .. } | Record::Qa { section, .. } => section,
        }
    }

    /// Short kind label used in output
    pub fn kind(&self) -> &'static str {
        match *self {
            Record::Section { .. } => "section",
            Record::Qa { .. } => "qa",
        }
    }

    /// Heading for sections, question for QA items
    pub fn title(&self) -> &'a str {
        match *self {
            Record::Section { section, .. } => &section.heading,
            Record::Qa { item, .. } => &item.question,
        }
    }

    /// Text fed to the indexer
    ///
    /// A section contributes its heading and its full body, nested
    /// subsections and QA blocks included.
    pub fn index_text(&self) -> String {
        match *self {
            Record::Section { document, section } => {
                let body = document.body(section.index()).unwrap_or_default();
                format!("{}\n{}", section.heading, body)
            }
            Record::Qa { item, .. } => {
                format!("{}\n{}\n{}", item.question, item.answer, item.tags.join(" "))
            }
        }
    }

    /// Full display text: heading and body, or question and answer
    pub fn text(&self) -> String {
        match *self {
            Record::Section { document, section } => {
                let body = document.body(section.index()).unwrap_or_default();
                format!("{}{}", section.heading_line, body)
            }
            Record::Qa { item, .. } => format!("{}\n{}", item.question, item.answer),
        }
    }
}

/// All documents loaded from one corpus root
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    root: PathBuf,
    documents: Vec<Document>,
    by_id: HashMap<DocumentId, usize>,
}

impl Corpus {
    /// Creates a corpus from documents already in corpus order
    pub fn new(root: impl Into<PathBuf>, documents: Vec<Document>) -> Self {
        let by_id = documents
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();

        Self {
            root: root.into(),
            documents,
            by_id,
        }
    }

    /// Returns the corpus root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.by_id.get(id).map(|&i| &self.documents[i])
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.documents.iter().map(|d| d.sections.len()).sum()
    }

    pub fn qa_count(&self) -> usize {
        self.documents.iter().map(|d| d.qa_count()).sum()
    }

    /// Iterates over every record in document order
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.documents.iter().flat_map(|document| {
            document.sections.iter().flat_map(move |section| {
                std::iter::once(Record::Section { document, section }).chain(
                    section.qa_items.iter().map(move |item| Record::Qa {
                        document,
                        section,
                        item,
                    }),
                )
            })
        })
    }

    /// Looks up a record by ID
    pub fn get(&self, id: &RecordId) -> Option<Record<'_>> {
        let document = self.document(id.document())?;
        let section = document.section(id.section_index())?;

        match id.item_index() {
            None => Some(Record::Section { document, section }),
            Some(i) => section.qa_items.get(i).map(|item| Record::Qa {
                document,
                section,
                item,
            }),
        }
    }
}
