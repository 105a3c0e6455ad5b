// Storage backends. The collection is always read and written whole;
// there are no partial reads or appends.

use crate::book::Book;
use serde::Serialize;
use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a well-formed book list.
    #[error("corrupt data in {path}")]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode the collection")]
    Encode(#[source] serde_json::Error),
}

/// Anything that can hand out and replace the whole collection.
pub trait Storage {
    /// Returns every stored book in order. A backend with nothing stored
    /// yet returns an empty list.
    fn load(&self) -> Result<Vec<Book>, StorageError>;

    /// Replaces the stored collection with `books`.
    fn save(&self, books: &[Book]) -> Result<(), StorageError>;
}

/// JSON document on disk, pretty-printed with four-space indentation.
/// Non-ASCII text is written as-is.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Book>, StorageError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no backing file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let books: Vec<Book> =
            serde_json::from_str(&data).map_err(|source| StorageError::CorruptData {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), count = books.len(), "loaded books");
        Ok(books)
    }

    fn save(&self, books: &[Book]) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        books.serialize(&mut ser).map_err(StorageError::Encode)?;

        std::fs::write(&self.path, buf).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), count = books.len(), "saved books");
        Ok(())
    }
}

/// In-process stand-in for the backing file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    books: RefCell<Vec<Book>>,
    saves: RefCell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        MemoryStorage {
            books: RefCell::new(books),
            saves: RefCell::new(0),
        }
    }

    /// Snapshot of what is currently stored.
    pub fn books(&self) -> Vec<Book> {
        self.books.borrow().clone()
    }

    /// Number of times `save` has been called.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Book>, StorageError> {
        Ok(self.books.borrow().clone())
    }

    fn save(&self, books: &[Book]) -> Result<(), StorageError> {
        *self.books.borrow_mut() = books.to_vec();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
