//! Raw objects as the reference extractor reports them.
//!
//! The oracle hands back loosely typed attribute maps (the same shape as
//! pdfplumber's object dicts). Nothing here validates field presence; the
//! projector in [`crate::golden::project`] decides defaults per field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One extracted object (char, word, line or rect) as an attribute map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawObject(Map<String, Value>);

impl RawObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for constructing fixtures.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Raw value for `key`; `None` if missing or JSON `null`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Whether `key` carries a non-null value.
    pub fn is_present(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Numeric view of `key`. Numeric strings are accepted, anything else
    /// reads as absent.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(value_as_f64)
    }

    /// First present numeric value among `keys`, in order.
    pub fn number_of(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|k| self.number(k))
    }

    /// Textual view of `key`. Non-string scalars are rendered, containers
    /// read as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_as_text)
    }

    /// Boolean view of `key`. Numbers read as truthy when non-zero.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|v| v != 0.0),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Coerce a JSON scalar to `f64`.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce a JSON scalar to text.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A table found by the oracle's table detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// `[x0, top, x1, bottom]`.
    #[serde(default)]
    pub bbox: Vec<Value>,
    /// Cell text per row; detectors report merged or empty cells as `null`.
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl RawTable {
    pub fn new(bbox: [f64; 4], rows: Vec<Vec<Option<&str>>>) -> Self {
        Self {
            bbox: bbox.iter().map(|&v| Value::from(v)).collect(),
            rows: rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| cell.map_or(Value::Null, Value::from))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Per-page views the oracle can report as failed.
pub const PAGE_VIEWS: &[&str] = &["chars", "words", "text", "lines", "rects"];

/// Everything the oracle reports for one page.
///
/// `page_number` is the oracle's own (1-based) numbering. Golden records
/// renumber pages sequentially from zero and never read it back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub page_number: usize,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(default)]
    pub chars: Vec<RawObject>,
    #[serde(default)]
    pub words: Vec<RawObject>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub lines: Vec<RawObject>,
    #[serde(default)]
    pub rects: Vec<RawObject>,
    #[serde(default)]
    pub tables: Vec<RawTable>,
    /// Set instead of `tables` when table detection raised.
    #[serde(default)]
    pub table_error: Option<String>,
    /// Views that raised, keyed by name from [`PAGE_VIEWS`], with the
    /// oracle's message. A failed view's collection is left empty.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub view_errors: BTreeMap<String, String>,
}

impl RawPage {
    /// A page the oracle could not produce at all: every view, tables
    /// included, fails with `message`.
    pub fn unavailable(page_number: usize, message: &str) -> Self {
        Self {
            page_number,
            table_error: Some(message.to_string()),
            view_errors: PAGE_VIEWS
                .iter()
                .map(|view| (view.to_string(), message.to_string()))
                .collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> RawObject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn null_reads_as_absent() {
        let o = obj(json!({"x0": null, "stroking_color": null}));
        assert!(!o.is_present("x0"));
        assert!(!o.is_present("stroking_color"));
        assert_eq!(o.number("x0"), None);
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let o = obj(json!({"a": 1, "b": "2.5", "c": "wide", "d": [1]}));
        assert_eq!(o.number("a"), Some(1.0));
        assert_eq!(o.number("b"), Some(2.5));
        assert_eq!(o.number("c"), None);
        assert_eq!(o.number("d"), None);
    }

    #[test]
    fn number_of_tries_keys_in_order() {
        let o = obj(json!({"linewidth": null, "lw": 0.5, "line_width": 2}));
        assert_eq!(o.number_of(&["linewidth", "line_width", "lw"]), Some(2.0));
        assert_eq!(o.number_of(&["linewidth", "lw"]), Some(0.5));
        assert_eq!(o.number_of(&["missing"]), None);
    }

    #[test]
    fn flags_and_text() {
        let o = obj(json!({"upright": false, "fill": 1, "text": 7, "bad": {}}));
        assert_eq!(o.flag("upright"), Some(false));
        assert_eq!(o.flag("fill"), Some(true));
        assert_eq!(o.text("text").as_deref(), Some("7"));
        assert_eq!(o.text("bad"), None);
    }

    #[test]
    fn raw_page_tolerates_missing_collections() {
        let page: RawPage =
            serde_json::from_value(json!({"page_number": 1, "width": 612, "height": 792}))
                .unwrap();
        assert!(page.chars.is_empty());
        assert!(page.tables.is_empty());
        assert_eq!(page.text, None);
        assert_eq!(page.width, Some(612.0));
        assert!(page.view_errors.is_empty());
    }

    #[test]
    fn unavailable_page_fails_every_view() {
        let page = RawPage::unavailable(4, "page tree is broken");
        assert_eq!(page.page_number, 4);
        assert_eq!(page.view_errors.len(), PAGE_VIEWS.len());
        assert_eq!(page.table_error.as_deref(), Some("page tree is broken"));
        assert_eq!(page.width, None);
    }
}
