//! Facade coordinating the current book, persistence, and backups.

use std::path::PathBuf;

use crate::book::{Book, CURRENT_SCHEMA_VERSION};
use crate::errors::{FinanceError, Result};
use crate::storage::{book_warnings, StorageBackend};

/// Metadata describing the outcome of a load operation.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    pub warnings: Vec<String>,
    pub path: PathBuf,
    pub name: String,
    pub schema_version: u8,
}

pub struct BookManager {
    pub current: Option<Book>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
}

impl BookManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Creates a fresh book, persists it under `name`, and makes it current.
    pub fn create(&mut self, name: &str) -> Result<PathBuf> {
        let book = Book::new(name);
        self.storage.save(&book, name)?;
        self.current = Some(book);
        self.current_name = Some(name.to_string());
        self.storage.record_last_book(Some(name))?;
        Ok(self.storage.book_path(name))
    }

    pub fn load(&mut self, name: &str) -> Result<LoadMetadata> {
        let book = self.storage.load(name)?;
        Self::ensure_schema_support(book.schema_version)?;
        let metadata = LoadMetadata {
            warnings: book_warnings(&book),
            path: self.storage.book_path(name),
            name: name.to_string(),
            schema_version: book.schema_version,
        };
        if !metadata.warnings.is_empty() {
            tracing::warn!(
                book = name,
                count = metadata.warnings.len(),
                "book loaded with integrity warnings"
            );
        }
        self.current = Some(book);
        self.current_name = Some(name.to_string());
        self.storage.record_last_book(Some(name))?;
        Ok(metadata)
    }

    pub fn save(&mut self) -> Result<PathBuf> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| FinanceError::StorageError("current book is unnamed".into()))?;
        let book = self.current.as_ref().ok_or(FinanceError::BookNotLoaded)?;
        self.storage.save(book, &name)?;
        Ok(self.storage.book_path(&name))
    }

    pub fn save_as(&mut self, name: &str) -> Result<PathBuf> {
        let book = self.current.as_ref().ok_or(FinanceError::BookNotLoaded)?;
        self.storage.save(book, name)?;
        self.current_name = Some(name.to_string());
        self.storage.record_last_book(Some(name))?;
        Ok(self.storage.book_path(name))
    }

    pub fn backup(&self, note: Option<&str>) -> Result<()> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| FinanceError::StorageError("current book is unnamed".into()))?;
        let book = self.current.as_ref().ok_or(FinanceError::BookNotLoaded)?;
        self.storage.backup(book, name, note)
    }

    pub fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        self.storage.list_backups(name)
    }

    /// Replaces the named book with a backup snapshot and makes the restored
    /// book current.
    pub fn restore(&mut self, name: &str, backup_name: &str) -> Result<LoadMetadata> {
        let book = self.storage.restore(name, backup_name)?;
        Self::ensure_schema_support(book.schema_version)?;
        let metadata = LoadMetadata {
            warnings: book_warnings(&book),
            path: self.storage.book_path(name),
            name: name.to_string(),
            schema_version: book.schema_version,
        };
        self.current = Some(book);
        self.current_name = Some(name.to_string());
        Ok(metadata)
    }

    pub fn last_opened(&self) -> Result<Option<String>> {
        self.storage.last_book()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn set_current(&mut self, book: Book, name: Option<String>) {
        self.current = Some(book);
        self.current_name = name;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_name = None;
    }

    fn ensure_schema_support(schema_version: u8) -> Result<()> {
        if schema_version > CURRENT_SCHEMA_VERSION {
            return Err(FinanceError::StorageError(format!(
                "book schema v{} is newer than supported v{}",
                schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(())
    }
}
