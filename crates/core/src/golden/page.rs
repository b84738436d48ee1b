//! Page assembly.

use tracing::{info, warn};

use crate::error::Result;
use crate::normalize::round_coord;
use crate::oracle::ReferencePage;

use super::project::{project_char, project_line, project_rect, project_table, project_word};
use super::record::{GoldenPage, GoldenTable};

/// Build the golden record for one page.
///
/// `index` is the zero-based position of the page in its document and
/// becomes `page_number`. Failures stay on this page: a view that errors
/// is logged and emitted empty, so the page keeps its slot in the document
/// and the rest of the page survives.
pub fn extract_page<P: ReferencePage>(page: &mut P, index: usize) -> GoldenPage {
    let chars = absorb(index, "chars", page.chars());
    let words = absorb(index, "words", page.words());
    let text = absorb(index, "text", page.text());
    let lines = absorb(index, "lines", page.lines());
    let rects = absorb(index, "rects", page.rects());
    let tables = detect_tables(page, index);

    info!(
        page = index,
        chars = chars.len(),
        words = words.len(),
        lines = lines.len(),
        rects = rects.len(),
        tables = tables.len(),
        "page extracted"
    );

    GoldenPage {
        page_number: index,
        width: round_coord(page.width()),
        height: round_coord(page.height()),
        chars: chars.iter().map(project_char).collect(),
        words: words.iter().map(project_word).collect(),
        text: text.unwrap_or_default(),
        lines: lines.iter().map(project_line).collect(),
        rects: rects.iter().map(project_rect).collect(),
        tables,
    }
}

fn absorb<T: Default>(index: usize, view: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!(page = index, view, error = %e, "page view failed, emitting it empty");
        T::default()
    })
}

fn detect_tables<P: ReferencePage>(page: &mut P, index: usize) -> Vec<GoldenTable> {
    match page.find_tables() {
        Ok(tables) => tables.iter().map(project_table).collect(),
        Err(e) => {
            warn!(page = index, error = %e, "table extraction failed, emitting no tables");
            Vec::new()
        }
    }
}
