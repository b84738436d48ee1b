//! Serialization profiles.
//!
//! [`Profile::Full`] is the canonical golden schema. [`Profile::Legacy`]
//! reproduces the narrower layout older consumers read: no `doctop` or
//! `upright`, no page text, lines or rects, tables with flat `bbox` arrays,
//! and no extractor version. Legacy is an export of a canonical record and
//! is never read back.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::record::{GoldenChar, GoldenDocument, GoldenPage, GoldenTable, GoldenWord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Full,
    Legacy,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Full => write!(f, "full"),
            Profile::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Profile::Full),
            "legacy" => Ok(Profile::Legacy),
            other => Err(format!("unknown profile '{other}' (expected full or legacy)")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LegacyDocument<'a> {
    pub source: &'a str,
    pub pages: Vec<LegacyPage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct LegacyPage<'a> {
    pub page_number: usize,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub chars: Vec<LegacyChar<'a>>,
    pub words: Vec<LegacyWord<'a>>,
    pub tables: Vec<LegacyTable<'a>>,
}

#[derive(Debug, Serialize)]
pub struct LegacyChar<'a> {
    pub text: &'a str,
    pub x0: Option<f64>,
    pub top: Option<f64>,
    pub x1: Option<f64>,
    pub bottom: Option<f64>,
    pub fontname: &'a str,
    pub size: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct LegacyWord<'a> {
    pub text: &'a str,
    pub x0: Option<f64>,
    pub top: Option<f64>,
    pub x1: Option<f64>,
    pub bottom: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct LegacyTable<'a> {
    pub bbox: [Option<f64>; 4],
    pub rows: &'a [Vec<String>],
}

impl<'a> From<&'a GoldenChar> for LegacyChar<'a> {
    fn from(c: &'a GoldenChar) -> Self {
        Self {
            text: &c.text,
            x0: c.x0,
            top: c.top,
            x1: c.x1,
            bottom: c.bottom,
            fontname: &c.fontname,
            size: c.size,
        }
    }
}

impl<'a> From<&'a GoldenWord> for LegacyWord<'a> {
    fn from(w: &'a GoldenWord) -> Self {
        Self {
            text: &w.text,
            x0: w.x0,
            top: w.top,
            x1: w.x1,
            bottom: w.bottom,
        }
    }
}

impl<'a> From<&'a GoldenTable> for LegacyTable<'a> {
    fn from(t: &'a GoldenTable) -> Self {
        Self {
            bbox: t.bbox.to_array(),
            rows: &t.rows,
        }
    }
}

impl<'a> From<&'a GoldenPage> for LegacyPage<'a> {
    fn from(p: &'a GoldenPage) -> Self {
        Self {
            page_number: p.page_number,
            width: p.width,
            height: p.height,
            chars: p.chars.iter().map(LegacyChar::from).collect(),
            words: p.words.iter().map(LegacyWord::from).collect(),
            tables: p.tables.iter().map(LegacyTable::from).collect(),
        }
    }
}

impl<'a> From<&'a GoldenDocument> for LegacyDocument<'a> {
    fn from(d: &'a GoldenDocument) -> Self {
        Self {
            source: &d.source,
            pages: d.pages.iter().map(LegacyPage::from).collect(),
        }
    }
}

/// Serialize `doc` under `profile` as 2-space indented JSON.
///
/// Non-ASCII text is written as UTF-8, not escaped, and there is no
/// trailing newline.
pub fn to_json(doc: &GoldenDocument, profile: Profile) -> serde_json::Result<Vec<u8>> {
    match profile {
        Profile::Full => serde_json::to_vec_pretty(doc),
        Profile::Legacy => serde_json::to_vec_pretty(&LegacyDocument::from(doc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::golden::record::GoldenBBox;

    fn sample() -> GoldenDocument {
        GoldenDocument {
            source: "t.pdf".to_string(),
            extractor_version: "0.11.9".to_string(),
            pages: vec![GoldenPage {
                page_number: 0,
                width: Some(612.0),
                height: Some(792.0),
                chars: vec![],
                words: vec![GoldenWord {
                    text: "Straße".to_string(),
                    x0: Some(1.5),
                    top: Some(2.0),
                    x1: Some(3.0),
                    bottom: None,
                    doctop: Some(2.0),
                }],
                text: "Straße".to_string(),
                lines: vec![],
                rects: vec![],
                tables: vec![GoldenTable {
                    bbox: GoldenBBox {
                        x0: Some(0.0),
                        top: Some(1.0),
                        x1: Some(2.0),
                        bottom: Some(3.0),
                    },
                    rows: vec![vec!["a".to_string(), String::new()]],
                }],
            }],
        }
    }

    #[test]
    fn profile_parses() {
        assert_eq!("legacy".parse::<Profile>(), Ok(Profile::Legacy));
        assert_eq!(Profile::Full.to_string(), "full");
        assert!("compact".parse::<Profile>().is_err());
    }

    #[test]
    fn full_keeps_non_ascii_verbatim() {
        let json = String::from_utf8(to_json(&sample(), Profile::Full).unwrap()).unwrap();
        assert!(json.contains("\"text\": \"Straße\""));
        assert!(json.contains("\"extractor_version\": \"0.11.9\""));
        assert!(!json.ends_with('\n'));
    }

    #[test]
    fn legacy_drops_rich_fields() {
        let json = String::from_utf8(to_json(&sample(), Profile::Legacy).unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("extractor_version").is_none());
        let page = &value["pages"][0];
        assert!(page.get("text").is_none());
        assert!(page.get("lines").is_none());
        assert!(page["words"][0].get("doctop").is_none());
        assert_eq!(page["tables"][0]["bbox"], serde_json::json!([0.0, 1.0, 2.0, 3.0]));
    }
}
