//! Golden record construction.
//!
//! Data flows bottom-up: raw oracle objects are projected onto records
//! ([`project`]), collected per page ([`page`]) and per document
//! ([`document`]), then serialized under a [`profile`].

pub mod check;
pub mod document;
pub mod page;
pub mod profile;
pub mod project;
pub mod record;

pub use check::{Violation, ViolationKind, check_document, check_file, load_golden};
pub use document::{extract_document, source_name};
pub use page::extract_page;
pub use profile::{Profile, to_json};
pub use record::{
    GoldenBBox, GoldenChar, GoldenDocument, GoldenLine, GoldenPage, GoldenRect, GoldenTable,
    GoldenWord, ObjectCounts,
};
