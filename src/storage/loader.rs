//! Markdown loader
//!
//! Reads a corpus directory (or a single file) into a [`Corpus`].
//! Directories are walked recursively; hidden entries are skipped and
//! only `*.md` files are read, in sorted relative-path order.
//!
//! Any file that cannot be read, including files that are not valid
//! UTF-8, aborts the load. Nothing is skipped silently.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{Corpus, Document};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    fn access(path: &Path, source: io::Error) -> Self {
        LoadError::FileAccess {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the path that could not be read
    pub fn path(&self) -> &Path {
        match self {
            LoadError::FileAccess { path, .. } => path,
        }
    }
}

/// Loads Markdown documents from disk
pub struct Loader {
    /// Corpus directory or single Markdown file
    path: PathBuf,
}

impl Loader {
    /// Creates a loader for a directory or a single file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path this loader reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole corpus
    pub fn load(&self) -> Result<Corpus, LoadError> {
        let meta = fs::metadata(&self.path).map_err(|e| LoadError::access(&self.path, e))?;

        if meta.is_dir() {
            return self.load_dir();
        }

        let root = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let document = self.load_file(&self.path)?;
        Ok(Corpus::new(root, vec![document]))
    }

    /// Loads every Markdown file below the loader's directory
    pub fn load_dir(&self) -> Result<Corpus, LoadError> {
        let mut files = Vec::new();
        collect_markdown(&self.path, &mut files)?;
        files.sort();

        let documents = files
            .iter()
            .map(|file| self.load_file(file))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Corpus::new(&self.path, documents))
    }

    /// Loads and parses a single file
    ///
    /// The document path is recorded relative to the loader's directory,
    /// or as the bare file name when loading a single file.
    pub fn load_file(&self, file: &Path) -> Result<Document, LoadError> {
        let text = fs::read_to_string(file).map_err(|e| LoadError::access(file, e))?;

        let relative = file
            .strip_prefix(&self.path)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| file.file_name().map(PathBuf::from))
            .unwrap_or_else(|| file.to_path_buf());

        Ok(Document::parse(relative, &text))
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "md")
}

/// Recursively collects Markdown files below `dir`
fn collect_markdown(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let entries = fs::read_dir(dir).map_err(|e| LoadError::access(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| LoadError::access(dir, e))?;
        let path = entry.path();

        if is_hidden(&path) {
            continue;
        }

        let file_type = entry
            .file_type()
            .map_err(|e| LoadError::access(&path, e))?;

        if file_type.is_dir() {
            collect_markdown(&path, files)?;
        } else if is_markdown(&path) {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &[u8]) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_markdown_files_in_path_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.md", b"# B\n");
        write(dir.path(), "a.md", b"# A\n");
        write(dir.path(), "sub/c.md", b"# C\n");
        write(dir.path(), "notes.txt", b"# not markdown\n");

        let corpus = Loader::new(dir.path()).load().unwrap();
        let titles: Vec<_> = corpus.documents().iter().map(|d| d.title.as_str()).collect();

        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(corpus.documents()[2].path, PathBuf::from("sub").join("c.md"));
        assert_eq!(corpus.root(), dir.path());
    }

    #[test]
    fn skips_hidden_entries() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", b"# A\n");
        write(dir.path(), ".hidden.md", b"# Hidden\n");
        write(dir.path(), ".git/x.md", b"# Git\n");

        let corpus = Loader::new(dir.path()).load().unwrap();
        assert_eq!(corpus.documents().len(), 1);
    }

    #[test]
    fn non_utf8_file_fails_with_file_access() {
        let dir = TempDir::new().unwrap();
        for name in ["a.md", "b.md", "d.md", "e.md"] {
            write(dir.path(), name, b"# Valid\n\nText.\n");
        }
        write(dir.path(), "c.md", &[0x23, 0x20, 0xff, 0xfe, 0x0a]);

        let err = Loader::new(dir.path()).load().unwrap_err();

        assert!(matches!(err, LoadError::FileAccess { .. }));
        assert_eq!(err.path(), dir.path().join("c.md"));
    }

    #[test]
    fn missing_path_fails_with_file_access() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = Loader::new(&missing).load().unwrap_err();
        assert_eq!(err.path(), missing);
    }

    #[test]
    fn loads_single_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "solid.md", b"# SOLID\n## SRP\n");

        let corpus = Loader::new(dir.path().join("solid.md")).load().unwrap();

        assert_eq!(corpus.documents().len(), 1);
        assert_eq!(corpus.documents()[0].path, PathBuf::from("solid.md"));
        assert_eq!(corpus.section_count(), 2);
    }

    #[test]
    fn empty_directory_is_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let corpus = Loader::new(dir.path()).load().unwrap();

        assert!(corpus.is_empty());
    }

    #[test]
    fn ids_are_stable_across_loads() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", b"# A\n");

        let first = Loader::new(dir.path()).load().unwrap();
        let second = Loader::new(dir.path()).load().unwrap();

        assert_eq!(first.documents()[0].id, second.documents()[0].id);
    }
}
