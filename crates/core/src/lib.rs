//! plumbline - golden reference generation for PDF extraction.
//!
//! Drives a trusted reference extractor over a set of PDFs and writes one
//! canonical, precision-controlled JSON record per file, so that another
//! extraction implementation can be diffed against it byte for byte.

pub mod batch;
pub mod error;
pub mod golden;
pub mod normalize;
pub mod oracle;
pub mod raw;

pub use batch::{BatchConfig, BatchReport, FileOutcome, GoldenBuilder, run_batch};
pub use error::{GoldenError, Result};
pub use golden::{GoldenDocument, Profile, extract_document};
pub use normalize::round_coord;
pub use oracle::{ReferenceDocument, ReferenceExtractor, ReferencePage};
