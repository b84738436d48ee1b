//! Capability interface over the reference extractor.
//!
//! The oracle's segmentation and table heuristics are the ground truth, so
//! they are consumed through these traits and never reimplemented:
//!
//! - [`ReferenceExtractor::open`] yields a document handle
//! - [`ReferenceDocument`] reports its version and hands out pages in order
//! - [`ReferencePage`] exposes the per-page extraction views
//!
//! Two backends ship with the crate: [`bridge::BridgeExtractor`] drives the
//! real oracle in a child process, [`memory::MemoryExtractor`] serves
//! pre-recorded pages.

use std::path::Path;

use crate::error::Result;
use crate::raw::{RawObject, RawTable};

pub mod bridge;
pub mod memory;

pub use bridge::BridgeExtractor;
pub use memory::MemoryExtractor;

/// Opens source documents.
pub trait ReferenceExtractor {
    type Document: ReferenceDocument;

    /// Open one source document. Encrypted, corrupt and zero-length files
    /// fail here, and nothing about them can be partially recovered.
    fn open(&self, path: &Path) -> Result<Self::Document>;
}

/// An open document handle.
///
/// Implementations must release the underlying resource on drop, so an
/// early return anywhere in the caller cannot leak it. [`close`] exists to
/// surface errors that only show up at release time.
///
/// [`close`]: ReferenceDocument::close
pub trait ReferenceDocument {
    type Page: ReferencePage;

    /// Version string of the oracle, recorded for provenance.
    fn extractor_version(&self) -> &str;

    fn page_count(&self) -> usize;

    /// Next page in document order, `None` once all pages were handed out.
    fn next_page(&mut self) -> Result<Option<Self::Page>>;

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Extraction views for one page. Each view is requested once.
pub trait ReferencePage {
    fn width(&self) -> Option<f64>;
    fn height(&self) -> Option<f64>;

    fn chars(&mut self) -> Result<Vec<RawObject>>;

    /// Words under the oracle's default segmentation settings.
    fn words(&mut self) -> Result<Vec<RawObject>>;

    /// Full page text; `None` when the oracle has no text layer to offer.
    fn text(&mut self) -> Result<Option<String>>;

    fn lines(&mut self) -> Result<Vec<RawObject>>;
    fn rects(&mut self) -> Result<Vec<RawObject>>;

    /// Table detection. Expected to fail on some inputs.
    fn find_tables(&mut self) -> Result<Vec<RawTable>>;
}
