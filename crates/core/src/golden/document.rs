//! Document assembly.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{GoldenError, Result};
use crate::oracle::{ReferenceDocument, ReferenceExtractor};

use super::page::extract_page;
use super::record::GoldenDocument;

/// Build the golden record for one source file.
///
/// Fails only at file scope: the document cannot be opened, or the oracle
/// stops short of the page count it announced. Page-level failures are
/// absorbed by [`extract_page`] and leave the page in place with the failed
/// views empty. The oracle handle is closed before returning on both paths
/// (and dropped on panic).
pub fn extract_document<E: ReferenceExtractor>(
    extractor: &E,
    path: &Path,
) -> Result<GoldenDocument> {
    let source = source_name(path);
    info!(source = %source, "processing");

    let mut doc = extractor.open(path)?;
    let assembled = assemble(&mut doc, source);
    let closed = doc.close();
    let golden = assembled?;
    closed?;
    Ok(golden)
}

fn assemble<D: ReferenceDocument>(doc: &mut D, source: String) -> Result<GoldenDocument> {
    let page_count = doc.page_count();
    debug!(source = %source, page_count, "document opened");

    let mut pages = Vec::with_capacity(page_count);
    while let Some(mut page) = doc.next_page()? {
        let index = pages.len();
        pages.push(extract_page(&mut page, index));
    }
    if pages.len() != page_count {
        return Err(GoldenError::Oracle(format!(
            "expected {} pages, received {}",
            page_count,
            pages.len()
        )));
    }

    Ok(GoldenDocument {
        source,
        extractor_version: doc.extractor_version().to_string(),
        pages,
    })
}

/// File name of `path` as recorded in `source`.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
