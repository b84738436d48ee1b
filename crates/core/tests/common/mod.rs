//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use plumbline_core::raw::{RawObject, RawPage, RawTable};

pub const ORACLE_VERSION: &str = "0.11.9";

pub fn char_obj(text: &str, x0: f64, top: f64) -> RawObject {
    RawObject::new()
        .with("text", text)
        .with("x0", x0)
        .with("top", top)
        .with("x1", x0 + 6.6720000000000006)
        .with("bottom", top + 12.0)
        .with("fontname", "Helvetica")
        .with("size", 12.0)
        .with("upright", true)
}

pub fn word_obj(text: &str, x0: f64, top: f64) -> RawObject {
    RawObject::new()
        .with("text", text)
        .with("x0", x0)
        .with("top", top)
        .with("x1", x0 + 30.000000000000004)
        .with("bottom", top + 12.0)
        .with("doctop", top)
}

pub fn line_obj(top: f64) -> RawObject {
    RawObject::new()
        .with("x0", 50.0)
        .with("top", top)
        .with("x1", 550.0)
        .with("bottom", top)
        .with("linewidth", 1.0)
}

pub fn rect_obj() -> RawObject {
    RawObject::new()
        .with("x0", 50.0)
        .with("top", 100.0)
        .with("x1", 550.0)
        .with("bottom", 300.0)
        .with("linewidth", 0.5)
        .with("stroking_color", serde_json::json!([0, 0, 0]))
}

/// A populated page whose words are `words`.
pub fn text_page(number: usize, words: &[&str]) -> RawPage {
    let mut chars = Vec::new();
    let mut raw_words = Vec::new();
    let mut x = 72.0;
    for w in words {
        raw_words.push(word_obj(w, x, 100.0));
        for c in w.chars() {
            chars.push(char_obj(&c.to_string(), x, 100.0));
            x += 6.672;
        }
        x += 3.0;
    }
    RawPage {
        page_number: number,
        width: Some(612.0),
        height: Some(792.0),
        chars,
        words: raw_words,
        text: Some(words.join(" ")),
        lines: vec![line_obj(90.0), line_obj(310.0)],
        rects: vec![rect_obj()],
        tables: vec![RawTable::new(
            [50.0, 100.0, 550.0, 300.0],
            vec![vec![Some("a"), None], vec![Some("b"), Some("c")]],
        )],
        table_error: None,
        view_errors: Default::default(),
    }
}

/// Create an input file; the in-memory oracle never reads its contents.
pub fn touch(dir: &Path, name: &str, bytes: &[u8]) {
    fs::write(dir.join(name), bytes).unwrap();
}
