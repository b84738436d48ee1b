//! Projection of raw oracle objects onto golden records.
//!
//! Each function picks a fixed field set and applies the per-field default
//! policy. None of them fail: a missing or malformed field gets its default
//! and projection moves on.
//!
//! | field                  | missing / malformed                     |
//! |------------------------|-----------------------------------------|
//! | `text`, `fontname`     | `""`                                    |
//! | coordinates            | `null`                                  |
//! | char `size`            | `0.0`                                   |
//! | `doctop`               | `top`                                   |
//! | `upright`              | `true`                                  |
//! | `linewidth`            | `line_width`, then `lw`, then `0.0`     |
//! | rect `stroke` / `fill` | whether `stroking_color` / `non_stroking_color` is set |
//! | table cell             | `""`                                    |

use serde_json::Value;

use crate::normalize::{round_coord, round_value};
use crate::raw::{RawObject, RawTable, value_as_f64, value_as_text};

use super::record::{GoldenBBox, GoldenChar, GoldenLine, GoldenRect, GoldenTable, GoldenWord};

const LINEWIDTH_KEYS: &[&str] = &["linewidth", "line_width", "lw"];

fn coord(obj: &RawObject, key: &str) -> Option<f64> {
    round_coord(obj.number(key))
}

fn linewidth(obj: &RawObject) -> Option<f64> {
    round_value(obj.number_of(LINEWIDTH_KEYS).unwrap_or(0.0))
}

fn doctop(obj: &RawObject) -> Option<f64> {
    round_coord(obj.number("doctop").or_else(|| obj.number("top")))
}

pub fn project_char(obj: &RawObject) -> GoldenChar {
    GoldenChar {
        text: obj.text("text").unwrap_or_default(),
        x0: coord(obj, "x0"),
        top: coord(obj, "top"),
        x1: coord(obj, "x1"),
        bottom: coord(obj, "bottom"),
        fontname: obj.text("fontname").unwrap_or_default(),
        size: round_value(obj.number("size").unwrap_or(0.0)),
        doctop: doctop(obj),
        upright: obj.flag("upright").unwrap_or(true),
    }
}

pub fn project_word(obj: &RawObject) -> GoldenWord {
    GoldenWord {
        text: obj.text("text").unwrap_or_default(),
        x0: coord(obj, "x0"),
        top: coord(obj, "top"),
        x1: coord(obj, "x1"),
        bottom: coord(obj, "bottom"),
        doctop: doctop(obj),
    }
}

pub fn project_line(obj: &RawObject) -> GoldenLine {
    GoldenLine {
        x0: coord(obj, "x0"),
        top: coord(obj, "top"),
        x1: coord(obj, "x1"),
        bottom: coord(obj, "bottom"),
        linewidth: linewidth(obj),
    }
}

pub fn project_rect(obj: &RawObject) -> GoldenRect {
    GoldenRect {
        x0: coord(obj, "x0"),
        top: coord(obj, "top"),
        x1: coord(obj, "x1"),
        bottom: coord(obj, "bottom"),
        linewidth: linewidth(obj),
        stroke: obj
            .flag("stroke")
            .unwrap_or_else(|| obj.is_present("stroking_color")),
        fill: obj
            .flag("fill")
            .unwrap_or_else(|| obj.is_present("non_stroking_color")),
    }
}

fn cell_text(cell: &Value) -> String {
    value_as_text(cell).unwrap_or_default()
}

pub fn project_table(table: &RawTable) -> GoldenTable {
    let corner = |i: usize| round_coord(table.bbox.get(i).and_then(value_as_f64));
    GoldenTable {
        bbox: GoldenBBox {
            x0: corner(0),
            top: corner(1),
            x1: corner(2),
            bottom: corner(3),
        },
        rows: table
            .rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawObject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn char_keeps_fields_and_rounds() {
        let c = project_char(&raw(json!({
            "text": "H",
            "x0": 72.00000000000001,
            "top": 100.123456,
            "x1": 79.3333333,
            "bottom": 112.0,
            "fontname": "Helvetica",
            "size": 12.000000001,
            "doctop": 892.123456,
            "upright": false,
            "matrix": [1, 0, 0, 1, 72, 680],
        })));
        assert_eq!(c.text, "H");
        assert_eq!(c.x0, Some(72.0));
        assert_eq!(c.top, Some(100.1235));
        assert_eq!(c.x1, Some(79.3333));
        assert_eq!(c.size, Some(12.0));
        assert_eq!(c.doctop, Some(892.1235));
        assert!(!c.upright);
    }

    #[test]
    fn char_defaults() {
        let c = project_char(&raw(json!({"top": 10.0})));
        assert_eq!(c.text, "");
        assert_eq!(c.fontname, "");
        assert_eq!(c.x0, None);
        assert_eq!(c.size, Some(0.0));
        assert_eq!(c.doctop, Some(10.0));
        assert!(c.upright);
    }

    #[test]
    fn malformed_fields_fall_back() {
        let c = project_char(&raw(json!({
            "text": null,
            "x0": "not a number",
            "size": [12],
            "upright": "yes",
        })));
        assert_eq!(c.text, "");
        assert_eq!(c.x0, None);
        assert_eq!(c.size, Some(0.0));
        assert!(c.upright);
    }

    #[test]
    fn linewidth_resolution_order() {
        let primary = project_line(&raw(json!({"linewidth": 1.5, "lw": 3})));
        assert_eq!(primary.linewidth, Some(1.5));
        let alternate = project_line(&raw(json!({"line_width": 0.25})));
        assert_eq!(alternate.linewidth, Some(0.25));
        let shorthand = project_line(&raw(json!({"linewidth": null, "lw": 2})));
        assert_eq!(shorthand.linewidth, Some(2.0));
        let absent = project_line(&raw(json!({})));
        assert_eq!(absent.linewidth, Some(0.0));
    }

    #[test]
    fn rect_paint_flags() {
        let explicit = project_rect(&raw(json!({
            "stroke": false,
            "fill": true,
            "stroking_color": [0, 0, 0],
        })));
        assert!(!explicit.stroke);
        assert!(explicit.fill);

        let derived = project_rect(&raw(json!({
            "stroking_color": [0.5],
            "non_stroking_color": null,
        })));
        assert!(derived.stroke);
        assert!(!derived.fill);
    }

    #[test]
    fn table_cells_are_never_null() {
        let table = RawTable::new(
            [50.0, 100.123456, 300.0, 200.0],
            vec![vec![Some("a"), None, Some("c")], vec![None, None, None]],
        );
        let t = project_table(&table);
        assert_eq!(t.bbox.top, Some(100.1235));
        assert_eq!(t.rows, vec![vec!["a", "", "c"], vec!["", "", ""]]);
    }

    #[test]
    fn short_bbox_reads_as_null_corners() {
        let t = project_table(&RawTable {
            bbox: vec![json!(1.0), json!(2.0)],
            rows: vec![],
        });
        assert_eq!(t.bbox.x1, None);
        assert_eq!(t.bbox.bottom, None);
        assert_eq!(t.bbox.x0, Some(1.0));
    }

    #[test]
    fn projection_is_pure() {
        let obj = raw(json!({"text": "w", "x0": 1.23456, "top": 2.0}));
        assert_eq!(project_word(&obj), project_word(&obj));
    }
}
