//! Identifiers for documents and searchable records
//!
//! ID Format:
//! - Document IDs: `d-{7-char-hash}` (e.g., `d-7f2b4c1`)
//! - Section IDs: `{document-id}.{position}` (e.g., `d-7f2b4c1.3`)
//! - QA item IDs: `{section-id}.q{position}` (e.g., `d-7f2b4c1.3.q1`)
//!
//! The hash is derived from the document path relative to the corpus root,
//! so IDs stay stable across runs as long as files are not moved.
//! Positions are 1-based in the textual form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid document ID format: expected 'd-{{7-char-hash}}', got '{0}'")]
    InvalidDocumentId(String),

    #[error("Invalid record ID format: expected '{{document-id}}.{{section}}' or '{{document-id}}.{{section}}.q{{item}}', got '{0}'")]
    InvalidRecordId(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// Generates a 7-character hash from a relative path
///
/// Separators are normalized to `/` so the same corpus yields the same
/// IDs on every platform.
fn generate_hash(relative_path: &Path) -> String {
    let normalized = relative_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    let hash = blake3::hash(normalized.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Parses a 1-based position into a 0-based index
fn parse_position(s: &str) -> Result<usize, IdError> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(IdError::InvalidPosition(s.to_string())),
    }
}

/// Document ID in the format `d-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId {
    hash: String,
}

impl DocumentId {
    /// Creates a document ID from a path relative to the corpus root
    pub fn from_path(relative_path: &Path) -> Self {
        Self {
            hash: generate_hash(relative_path),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Creates the record ID of the section at `index` (0-based)
    pub fn section(&self, index: usize) -> RecordId {
        RecordId::Section {
            document: self.clone(),
            section: index,
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d-{}", self.hash)
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hash = s
            .strip_prefix("d-")
            .ok_or_else(|| IdError::InvalidDocumentId(s.to_string()))?;

        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidDocumentId(s.to_string()));
        }

        Ok(Self {
            hash: hash.to_ascii_lowercase(),
        })
    }
}

impl TryFrom<String> for DocumentId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.to_string()
    }
}

/// Identifier of a searchable record: a section or a QA item
///
/// Indices are 0-based internally and rendered 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecordId {
    Section {
        document: DocumentId,
        section: usize,
    },
    Qa {
        document: DocumentId,
        section: usize,
        item: usize,
    },
}

impl RecordId {
    /// Returns the owning document ID
    pub fn document(&self) -> &DocumentId {
        match self {
            RecordId::Section { document, .. } | RecordId::Qa { document, .. } => document,
        }
    }

    /// Returns the 0-based section index
    pub fn section_index(&self) -> usize {
        match self {
            RecordId::Section { section, .. } | RecordId::Qa { section, .. } => *section,
        }
    }

    /// Returns the 0-based QA item index, if this is a QA item
    pub fn item_index(&self) -> Option<usize> {
        match self {
            RecordId::Section { .. } => None,
            RecordId::Qa { item, .. } => Some(*item),
        }
    }

    /// Returns true if this identifies a QA item
    pub fn is_qa(&self) -> bool {
        matches!(self, RecordId::Qa { .. })
    }

    /// Returns the ID of the section this record lives in
    ///
    /// For a section, this is the section itself.
    pub fn section_id(&self) -> RecordId {
        self.document().section(self.section_index())
    }

    /// Creates the ID of a QA item inside this record's section
    pub fn qa(&self, item: usize) -> RecordId {
        RecordId::Qa {
            document: self.document().clone(),
            section: self.section_index(),
            item,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Section { document, section } => write!(f, "{}.{}", document, section + 1),
            RecordId::Qa {
                document,
                section,
                item,
            } => write!(f, "{}.{}.q{}", document, section + 1, item + 1),
        }
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.split('.');

        let document: DocumentId = parts
            .next()
            .ok_or_else(|| IdError::InvalidRecordId(s.to_string()))?
            .parse()
            .map_err(|_| IdError::InvalidRecordId(s.to_string()))?;

        let section = match parts.next() {
            Some(p) => parse_position(p)?,
            None => return Err(IdError::InvalidRecordId(s.to_string())),
        };

        let id = match parts.next() {
            None => RecordId::Section { document, section },
            Some(p) => {
                let item = p
                    .strip_prefix('q')
                    .ok_or_else(|| IdError::InvalidRecordId(s.to_string()))?;
                RecordId::Qa {
                    document,
                    section,
                    item: parse_position(item)?,
                }
            }
        };

        if parts.next().is_some() {
            return Err(IdError::InvalidRecordId(s.to_string()));
        }

        Ok(id)
    }
}

impl TryFrom<String> for RecordId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn document_id_format() {
        let id = DocumentId::from_path(Path::new("oop/pillars.md"));
        let s = id.to_string();

        assert!(s.starts_with("d-"));
        assert_eq!(s.len(), 9); // "d-" + 7 chars
    }

    #[test]
    fn document_id_is_stable_across_separators() {
        let a = DocumentId::from_path(Path::new("oop/pillars.md"));
        let b = DocumentId::from_path(&PathBuf::from("oop").join("pillars.md"));
        let c = DocumentId::from_path(Path::new("./oop/pillars.md"));

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn different_paths_give_different_ids() {
        let a = DocumentId::from_path(Path::new("solid.md"));
        let b = DocumentId::from_path(Path::new("patterns.md"));

        assert_ne!(a, b);
    }

    #[test]
    fn document_id_parse() {
        let id: DocumentId = "d-7f2b4c1".parse().unwrap();
        assert_eq!(id.hash(), "7f2b4c1");

        assert!("x-7f2b4c1".parse::<DocumentId>().is_err());
        assert!("d-7f2b".parse::<DocumentId>().is_err());
        assert!("d-zzzzzzz".parse::<DocumentId>().is_err());
    }

    #[test]
    fn section_id_display_is_one_based() {
        let doc: DocumentId = "d-7f2b4c1".parse().unwrap();
        let id = doc.section(0);

        assert_eq!(id.to_string(), "d-7f2b4c1.1");
        assert_eq!(id.qa(2).to_string(), "d-7f2b4c1.1.q3");
    }

    #[test]
    fn record_id_parse_section() {
        let id: RecordId = "d-7f2b4c1.3".parse().unwrap();

        assert_eq!(id.section_index(), 2);
        assert_eq!(id.item_index(), None);
        assert!(!id.is_qa());
    }

    #[test]
    fn record_id_parse_qa() {
        let id: RecordId = "d-7f2b4c1.3.q1".parse().unwrap();

        assert!(id.is_qa());
        assert_eq!(id.section_index(), 2);
        assert_eq!(id.item_index(), Some(0));
        assert_eq!(id.section_id().to_string(), "d-7f2b4c1.3");
    }

    #[test]
    fn record_id_roundtrip() {
        for s in ["d-abcdef0.1", "d-abcdef0.12", "d-abcdef0.4.q7"] {
            let id: RecordId = s.parse().unwrap();
            assert_eq!(id.to_string(), s);
        }
    }

    #[test]
    fn record_id_rejects_malformed() {
        assert!("d-7f2b4c1".parse::<RecordId>().is_err());
        assert!("d-7f2b4c1.0".parse::<RecordId>().is_err());
        assert!("d-7f2b4c1.x".parse::<RecordId>().is_err());
        assert!("d-7f2b4c1.1.2".parse::<RecordId>().is_err());
        assert!("d-7f2b4c1.1.q0".parse::<RecordId>().is_err());
        assert!("d-7f2b4c1.1.q1.q2".parse::<RecordId>().is_err());
    }

    #[test]
    fn record_id_serde() {
        let id: RecordId = "d-7f2b4c1.2.q1".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"d-7f2b4c1.2.q1\"");

        let parsed: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
