//! In-memory reference extractor.
//!
//! Serves [`RawPage`]s recorded ahead of time, keyed by file name. Used by
//! the test suite and for regenerating golden files from captured oracle
//! output without the oracle installed.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{GoldenError, Result};
use crate::raw::{RawObject, RawPage, RawTable};

use super::{ReferenceDocument, ReferenceExtractor, ReferencePage};

#[derive(Debug, Clone)]
enum Entry {
    Pages(Vec<RawPage>),
    Unreadable(String),
}

/// Reference extractor backed by recorded pages.
#[derive(Debug, Clone)]
pub struct MemoryExtractor {
    version: String,
    documents: HashMap<String, Entry>,
    released: Arc<AtomicUsize>,
}

impl MemoryExtractor {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            documents: HashMap::new(),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Register the pages served for `file_name`.
    pub fn with_document(mut self, file_name: &str, pages: Vec<RawPage>) -> Self {
        self.documents
            .insert(file_name.to_string(), Entry::Pages(pages));
        self
    }

    /// Register a document that fails to open with `message`.
    pub fn with_unreadable(mut self, file_name: &str, message: &str) -> Self {
        self.documents
            .insert(file_name.to_string(), Entry::Unreadable(message.to_string()));
        self
    }

    /// Number of document handles released so far.
    pub fn released_handles(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl ReferenceExtractor for MemoryExtractor {
    type Document = MemoryDocument;

    fn open(&self, path: &Path) -> Result<MemoryDocument> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.documents.get(&name) {
            Some(Entry::Pages(pages)) => Ok(MemoryDocument {
                version: self.version.clone(),
                page_count: pages.len(),
                pages: pages.iter().cloned().collect(),
                released: Arc::clone(&self.released),
                open: true,
            }),
            Some(Entry::Unreadable(message)) => Err(GoldenError::Open {
                path: path.to_path_buf(),
                message: message.clone(),
            }),
            None => Err(GoldenError::Open {
                path: path.to_path_buf(),
                message: "no recorded document".to_string(),
            }),
        }
    }
}

/// Handle onto one recorded document.
#[derive(Debug)]
pub struct MemoryDocument {
    version: String,
    page_count: usize,
    pages: VecDeque<RawPage>,
    released: Arc<AtomicUsize>,
    open: bool,
}

impl MemoryDocument {
    fn release(&mut self) {
        if self.open {
            self.open = false;
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl ReferenceDocument for MemoryDocument {
    type Page = RawPage;

    fn extractor_version(&self) -> &str {
        &self.version
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn next_page(&mut self) -> Result<Option<RawPage>> {
        Ok(self.pages.pop_front())
    }

    fn close(&mut self) -> Result<()> {
        self.release();
        Ok(())
    }
}

impl Drop for MemoryDocument {
    fn drop(&mut self) {
        self.release();
    }
}

impl RawPage {
    fn view<T>(&mut self, name: &str, take: impl FnOnce(&mut Self) -> T) -> Result<T> {
        match self.view_errors.remove(name) {
            Some(message) => Err(GoldenError::Page {
                index: self.page_number.saturating_sub(1),
                message: format!("{name}: {message}"),
            }),
            None => Ok(take(self)),
        }
    }
}

impl ReferencePage for RawPage {
    fn width(&self) -> Option<f64> {
        self.width
    }

    fn height(&self) -> Option<f64> {
        self.height
    }

    fn chars(&mut self) -> Result<Vec<RawObject>> {
        self.view("chars", |p| std::mem::take(&mut p.chars))
    }

    fn words(&mut self) -> Result<Vec<RawObject>> {
        self.view("words", |p| std::mem::take(&mut p.words))
    }

    fn text(&mut self) -> Result<Option<String>> {
        self.view("text", |p| p.text.take())
    }

    fn lines(&mut self) -> Result<Vec<RawObject>> {
        self.view("lines", |p| std::mem::take(&mut p.lines))
    }

    fn rects(&mut self) -> Result<Vec<RawObject>> {
        self.view("rects", |p| std::mem::take(&mut p.rects))
    }

    fn find_tables(&mut self) -> Result<Vec<RawTable>> {
        match self.table_error.take() {
            Some(message) => Err(GoldenError::Tables {
                index: self.page_number.saturating_sub(1),
                message,
            }),
            None => Ok(std::mem::take(&mut self.tables)),
        }
    }
}
