//! Golden file lint.
//!
//! Verifies the invariants every emitted record must satisfy: at most four
//! decimals on every number, ordered bounding boxes, and zero-based
//! contiguous page numbers. Cell nullness is enforced by the schema itself,
//! so a golden file with a `null` cell fails to load.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{GoldenError, Result};
use crate::normalize::{COORD_DECIMALS, decimal_places};

use super::record::GoldenDocument;

#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    Precision(f64),
    InvertedX { x0: f64, x1: f64 },
    InvertedY { top: f64, bottom: f64 },
    PageNumber { expected: usize, found: usize },
}

/// One invariant breach, located by a JSON-path-like string such as
/// `pages[1].chars[3].x0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub location: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Precision(v) => write!(
                f,
                "{}: {} has more than {} decimal places",
                self.location, v, COORD_DECIMALS
            ),
            ViolationKind::InvertedX { x0, x1 } => {
                write!(f, "{}: x0 {} > x1 {}", self.location, x0, x1)
            }
            ViolationKind::InvertedY { top, bottom } => {
                write!(f, "{}: top {} > bottom {}", self.location, top, bottom)
            }
            ViolationKind::PageNumber { expected, found } => write!(
                f,
                "{}: page_number {} where {} was expected",
                self.location, found, expected
            ),
        }
    }
}

#[derive(Default)]
struct Lint {
    violations: Vec<Violation>,
}

impl Lint {
    fn number(&mut self, location: impl FnOnce() -> String, v: Option<f64>) {
        if let Some(v) = v {
            if decimal_places(v) > COORD_DECIMALS {
                self.violations.push(Violation {
                    location: location(),
                    kind: ViolationKind::Precision(v),
                });
            }
        }
    }

    fn bbox(
        &mut self,
        at: &str,
        x0: Option<f64>,
        top: Option<f64>,
        x1: Option<f64>,
        bottom: Option<f64>,
    ) {
        self.number(|| format!("{at}.x0"), x0);
        self.number(|| format!("{at}.top"), top);
        self.number(|| format!("{at}.x1"), x1);
        self.number(|| format!("{at}.bottom"), bottom);
        if let (Some(x0), Some(x1)) = (x0, x1) {
            if x0 > x1 {
                self.violations.push(Violation {
                    location: at.to_string(),
                    kind: ViolationKind::InvertedX { x0, x1 },
                });
            }
        }
        if let (Some(top), Some(bottom)) = (top, bottom) {
            if top > bottom {
                self.violations.push(Violation {
                    location: at.to_string(),
                    kind: ViolationKind::InvertedY { top, bottom },
                });
            }
        }
    }
}

/// Collect every invariant violation in `doc`.
pub fn check_document(doc: &GoldenDocument) -> Vec<Violation> {
    let mut lint = Lint::default();

    for (i, page) in doc.pages.iter().enumerate() {
        let p = format!("pages[{i}]");
        if page.page_number != i {
            lint.violations.push(Violation {
                location: p.clone(),
                kind: ViolationKind::PageNumber {
                    expected: i,
                    found: page.page_number,
                },
            });
        }
        lint.number(|| format!("{p}.width"), page.width);
        lint.number(|| format!("{p}.height"), page.height);

        for (j, c) in page.chars.iter().enumerate() {
            let at = format!("{p}.chars[{j}]");
            lint.bbox(&at, c.x0, c.top, c.x1, c.bottom);
            lint.number(|| format!("{at}.size"), c.size);
            lint.number(|| format!("{at}.doctop"), c.doctop);
        }
        for (j, w) in page.words.iter().enumerate() {
            let at = format!("{p}.words[{j}]");
            lint.bbox(&at, w.x0, w.top, w.x1, w.bottom);
            lint.number(|| format!("{at}.doctop"), w.doctop);
        }
        for (j, l) in page.lines.iter().enumerate() {
            let at = format!("{p}.lines[{j}]");
            lint.bbox(&at, l.x0, l.top, l.x1, l.bottom);
            lint.number(|| format!("{at}.linewidth"), l.linewidth);
        }
        for (j, r) in page.rects.iter().enumerate() {
            let at = format!("{p}.rects[{j}]");
            lint.bbox(&at, r.x0, r.top, r.x1, r.bottom);
            lint.number(|| format!("{at}.linewidth"), r.linewidth);
        }
        for (j, t) in page.tables.iter().enumerate() {
            let at = format!("{p}.tables[{j}].bbox");
            let b = t.bbox;
            lint.bbox(&at, b.x0, b.top, b.x1, b.bottom);
        }
    }

    lint.violations
}

/// Load a golden file.
pub fn load_golden(path: &Path) -> Result<GoldenDocument> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Load and lint a golden file, failing with [`GoldenError::Check`] if any
/// invariant is violated.
pub fn check_file(path: &Path) -> Result<GoldenDocument> {
    let doc = load_golden(path)?;
    let violations = check_document(&doc);
    if violations.is_empty() {
        Ok(doc)
    } else {
        Err(GoldenError::Check {
            path: path.to_path_buf(),
            violations,
        })
    }
}
