//! Golden record data model.
//!
//! Field order here is the field order in the emitted JSON. Numeric fields
//! are `Option<f64>` because a value the oracle did not report is written
//! as `null` rather than invented.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenChar {
    pub text: String,
    pub x0: Option<f64>,
    pub top: Option<f64>,
    pub x1: Option<f64>,
    pub bottom: Option<f64>,
    pub fontname: String,
    pub size: Option<f64>,
    pub doctop: Option<f64>,
    pub upright: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenWord {
    pub text: String,
    pub x0: Option<f64>,
    pub top: Option<f64>,
    pub x1: Option<f64>,
    pub bottom: Option<f64>,
    pub doctop: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenLine {
    pub x0: Option<f64>,
    pub top: Option<f64>,
    pub x1: Option<f64>,
    pub bottom: Option<f64>,
    pub linewidth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenRect {
    pub x0: Option<f64>,
    pub top: Option<f64>,
    pub x1: Option<f64>,
    pub bottom: Option<f64>,
    pub linewidth: Option<f64>,
    pub stroke: bool,
    pub fill: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GoldenBBox {
    pub x0: Option<f64>,
    pub top: Option<f64>,
    pub x1: Option<f64>,
    pub bottom: Option<f64>,
}

impl GoldenBBox {
    pub fn to_array(self) -> [Option<f64>; 4] {
        [self.x0, self.top, self.x1, self.bottom]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenTable {
    pub bbox: GoldenBBox,
    /// Every cell is a string; rows keep the detector's column count.
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenPage {
    /// Zero-based position in the document.
    pub page_number: usize,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub chars: Vec<GoldenChar>,
    pub words: Vec<GoldenWord>,
    pub text: String,
    pub lines: Vec<GoldenLine>,
    pub rects: Vec<GoldenRect>,
    pub tables: Vec<GoldenTable>,
}

/// The golden record for one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenDocument {
    /// Source file name, without directories.
    pub source: String,
    /// Oracle version, for provenance. Older golden files call this
    /// `pdfplumber_version`.
    #[serde(alias = "pdfplumber_version")]
    pub extractor_version: String,
    pub pages: Vec<GoldenPage>,
}

/// Object totals over a whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectCounts {
    pub pages: usize,
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
    pub rects: usize,
    pub tables: usize,
}

impl GoldenDocument {
    pub fn counts(&self) -> ObjectCounts {
        self.pages.iter().fold(
            ObjectCounts {
                pages: self.pages.len(),
                ..Default::default()
            },
            |acc, p| ObjectCounts {
                chars: acc.chars + p.chars.len(),
                words: acc.words + p.words.len(),
                lines: acc.lines + p.lines.len(),
                rects: acc.rects + p.rects.len(),
                tables: acc.tables + p.tables.len(),
                ..acc
            },
        )
    }
}
