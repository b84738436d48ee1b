//! Error types for plumbline golden generation.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for golden generation.
///
/// Variants map onto the scope at which the fault is contained: a missing
/// input directory aborts the run, `Open` drops one file, `Page` empties
/// one view of one page, and `Tables` only empties one page's table list.
#[derive(Error, Debug)]
pub enum GoldenError {
    #[error("input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error("failed to open {}: {message}", path.display())]
    Open { path: PathBuf, message: String },

    #[error("page {index}: {message}")]
    Page { index: usize, message: String },

    #[error("table extraction failed on page {index}: {message}")]
    Tables { index: usize, message: String },

    #[error("reference extractor: {0}")]
    Oracle(String),

    #[error("{}: {} golden violation(s)", path.display(), violations.len())]
    Check {
        path: PathBuf,
        violations: Vec<crate::golden::check::Violation>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for GoldenError.
pub type Result<T> = std::result::Result<T, GoldenError>;
