//! Range operation tests
//!
//! Copy, paste and fill against plain column/row fixtures. Every operation
//! returns a replacement row set and leaves its input untouched.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{cell_text, editable_columns, grid_rows, layout};
use xlgrid::range::{copy, fill_drag, fill_to_end, parse_clipboard_text, paste, FillDrag};
use xlgrid::{
    CalculatedColumn, CellData, CellValue, ChangeType, ColumnSpec, FillEvent, Position, Row,
    ValueFormatFn,
};

fn fixture(cols: usize, rows: usize) -> (Vec<CalculatedColumn>, Vec<Row>) {
    (
        layout(&editable_columns(cols), 800.0).columns,
        grid_rows(rows, cols),
    )
}

/// Fill callback writing `filled` into the fill column of every target
fn fill_with_marker(event: &FillEvent) -> Vec<Row> {
    event
        .target_rows
        .iter()
        .map(|row| row.with_cell_value(&event.column_key, "filled"))
        .collect()
}

// ============================================================================
// Copy
// ============================================================================

#[test]
fn test_copy_single_cell() {
    let (columns, rows) = fixture(2, 3);
    let result = copy(&columns, &rows, Position::new(1, 2), None).unwrap();
    assert_eq!(result.text, "r2c1");
    assert_eq!(result.range.column_key, "c1");
    assert_eq!(result.range.rows, vec![rows[2].clone()]);
}

#[test]
fn test_copy_range_in_either_direction() {
    let (columns, rows) = fixture(2, 5);
    let down = copy(&columns, &rows, Position::new(0, 1), Some(3)).unwrap();
    let up = copy(&columns, &rows, Position::new(0, 3), Some(1)).unwrap();

    assert_eq!(down.text, "r1c0\nr2c0\nr3c0");
    assert_eq!(down.text, up.text);
    assert_eq!(down.range.rows.len(), 3);
}

#[test]
fn test_copy_from_row_zero_extends_range() {
    let (columns, rows) = fixture(1, 3);
    let result = copy(&columns, &rows, Position::new(0, 0), Some(2)).unwrap();
    assert_eq!(result.range.rows.len(), 3);
}

#[test]
fn test_copy_skips_disabled_values_but_keeps_rows() {
    let (columns, mut rows) = fixture(1, 3);
    rows[1].set("c0", CellValue::Cell(CellData::new("secret").disabled()));
    let result = copy(&columns, &rows, Position::new(0, 0), Some(2)).unwrap();
    assert_eq!(result.text, "r0c0\nr2c0");
    assert_eq!(result.range.rows.len(), 3);
}

#[test]
fn test_copy_quotes_special_values() {
    let (columns, mut rows) = fixture(1, 1);
    rows[0].set("c0", "a\tb");
    let result = copy(&columns, &rows, Position::new(0, 0), None).unwrap();
    assert_eq!(result.text, "\"a\tb\"");
}

#[test]
fn test_copy_keeps_trailing_empty_value() {
    let (columns, mut rows) = fixture(2, 3);
    rows[2].set("c0", "");
    let copied = copy(&columns, &rows, Position::new(0, 0), Some(2)).unwrap();
    assert_eq!(copied.text, "r0c0\nr1c0\n\"\"");
    assert_eq!(parse_clipboard_text(&copied.text).len(), 3);

    let outcome = paste(&columns, &rows, Position::new(1, 0), &copied.text).unwrap();
    assert_eq!(outcome.end_row, 2);
    assert_eq!(cell_text(&outcome.change.new_rows[2], "c1"), "");
}

#[test]
fn test_copy_without_selection() {
    let (columns, rows) = fixture(2, 2);
    assert!(copy(&columns, &rows, Position::SENTINEL, None).is_none());
}

#[test]
fn test_copy_from_disabled_cell() {
    let (columns, mut rows) = fixture(1, 2);
    rows[0].set("c0", CellValue::Cell(CellData::new("x").disabled()));
    assert!(copy(&columns, &rows, Position::new(0, 0), None).is_none());
}

// ============================================================================
// Paste
// ============================================================================

#[test]
fn test_paste_two_by_two_block() {
    let (columns, rows) = fixture(3, 3);
    let outcome = paste(&columns, &rows, Position::new(0, 0), "a\tb\nc\td").unwrap();
    let new_rows = &outcome.change.new_rows;

    assert_eq!(cell_text(&new_rows[0], "c0"), "a");
    assert_eq!(cell_text(&new_rows[0], "c1"), "b");
    assert_eq!(cell_text(&new_rows[1], "c0"), "c");
    assert_eq!(cell_text(&new_rows[1], "c1"), "d");
    // Outside the block nothing changed
    assert_eq!(new_rows[0].get("c2"), rows[0].get("c2"));
    assert_eq!(new_rows[2], rows[2]);

    assert_eq!((outcome.end_row, outcome.end_col), (1, 1));
    assert_eq!(outcome.change.change_type, Some(ChangeType::Paste));
    assert_eq!(outcome.change.key.as_deref(), Some("c0"));
    assert_eq!(
        outcome.change.updated_target_rows.as_ref().unwrap().len(),
        2
    );
    let target_keys: Vec<String> = outcome
        .change
        .target_cols
        .unwrap()
        .into_iter()
        .map(|c| c.key)
        .collect();
    assert_eq!(target_keys, vec!["c0", "c1"]);
}

#[test]
fn test_paste_clamps_to_grid_edges() {
    let (columns, rows) = fixture(2, 2);
    let outcome = paste(&columns, &rows, Position::new(1, 1), "a\tb\tc\nd\te").unwrap();

    assert_eq!(cell_text(&outcome.change.new_rows[1], "c1"), "a");
    assert_eq!(outcome.change.new_rows.len(), 2);
    assert_eq!((outcome.end_row, outcome.end_col), (1, 1));
}

#[test]
fn test_paste_skips_disabled_targets() {
    let (columns, mut rows) = fixture(2, 2);
    rows[0].set("c1", CellValue::Cell(CellData::new("locked").disabled()));
    let outcome = paste(&columns, &rows, Position::new(0, 0), "a\tb").unwrap();

    assert_eq!(cell_text(&outcome.change.new_rows[0], "c0"), "a");
    assert_eq!(cell_text(&outcome.change.new_rows[0], "c1"), "locked");
}

#[test]
fn test_paste_keeps_cell_flags() {
    let (columns, mut rows) = fixture(1, 1);
    let mut data = CellData::new("old");
    data.warning = Some("check".to_string());
    rows[0].set("c0", CellValue::Cell(data));
    let outcome = paste(&columns, &rows, Position::new(0, 0), "new").unwrap();

    let cell = outcome.change.new_rows[0].get("c0").unwrap();
    assert_eq!(cell.display_value(), "new");
    assert_eq!(cell.as_data().unwrap().warning.as_deref(), Some("check"));
}

#[test]
fn test_paste_applies_value_formatter() {
    let specs = vec![ColumnSpec::new("c0", "C0")
        .editable()
        .with_format_value(ValueFormatFn::new(|s| s.trim().to_uppercase()))];
    let columns = layout(&specs, 400.0).columns;
    let rows = grid_rows(1, 1);
    let outcome = paste(&columns, &rows, Position::new(0, 0), "  abc ").unwrap();
    assert_eq!(cell_text(&outcome.change.new_rows[0], "c0"), "ABC");
}

#[test]
fn test_paste_into_read_only_anchor() {
    let specs = vec![ColumnSpec::new("c0", "C0")];
    let columns = layout(&specs, 400.0).columns;
    let rows = grid_rows(1, 1);
    assert!(paste(&columns, &rows, Position::new(0, 0), "x").is_none());
}

#[test]
fn test_paste_empty_text() {
    let (columns, rows) = fixture(1, 1);
    assert!(paste(&columns, &rows, Position::new(0, 0), "").is_none());
}

#[test]
fn test_copy_then_paste_round_trip() {
    let (columns, mut rows) = fixture(2, 3);
    rows[0].set("c0", "tab\there");
    rows[1].set("c0", "line\nbreak");
    rows[2].set("c0", "say \"hi\"");

    let copied = copy(&columns, &rows, Position::new(0, 0), Some(2)).unwrap();
    let outcome = paste(&columns, &rows, Position::new(1, 0), &copied.text).unwrap();

    for row in &outcome.change.new_rows {
        assert_eq!(cell_text(row, "c1"), cell_text(row, "c0"));
    }
}

// ============================================================================
// Fill
// ============================================================================

#[test]
fn test_fill_down_excludes_source_row() {
    let (columns, rows) = fixture(2, 5);
    let mut seen = Vec::new();
    let change = fill_drag(
        &columns,
        &rows,
        FillDrag {
            position: Position::new(0, 0),
            anchor_col: 0,
            over_row: 3,
            over_col: 0,
        },
        &mut |event: &FillEvent| {
            seen.push(event.clone());
            fill_with_marker(event)
        },
    )
    .unwrap();

    assert_eq!(seen.len(), 1);
    let event = &seen[0];
    assert!(!event.across);
    assert_eq!(event.column_key, "c0");
    assert_eq!(event.source_row, rows[0]);
    assert_eq!(event.target_rows, rows[1..=3].to_vec());

    assert_eq!(change.new_rows[0], rows[0]);
    for row in &change.new_rows[1..=3] {
        assert_eq!(cell_text(row, "c0"), "filled");
    }
    assert_eq!(change.new_rows[4], rows[4]);
    assert_eq!(change.change_type, Some(ChangeType::Fill));
}

#[test]
fn test_fill_up() {
    let (columns, rows) = fixture(1, 5);
    let change = fill_drag(
        &columns,
        &rows,
        FillDrag {
            position: Position::new(0, 3),
            anchor_col: 0,
            over_row: 1,
            over_col: 0,
        },
        &mut fill_with_marker,
    )
    .unwrap();

    assert_eq!(change.new_rows[0], rows[0]);
    assert_eq!(cell_text(&change.new_rows[1], "c0"), "filled");
    assert_eq!(cell_text(&change.new_rows[2], "c0"), "filled");
    assert_eq!(change.new_rows[3], rows[3]);
}

#[test]
fn test_fill_onto_itself_is_a_no_op() {
    let (columns, rows) = fixture(1, 3);
    let mut called = false;
    let change = fill_drag(
        &columns,
        &rows,
        FillDrag {
            position: Position::new(0, 1),
            anchor_col: 0,
            over_row: 1,
            over_col: 0,
        },
        &mut |event: &FillEvent| {
            called = true;
            fill_with_marker(event)
        },
    );
    assert!(change.is_none());
    assert!(!called);
}

#[test]
fn test_fill_across_to_the_right() {
    let (columns, rows) = fixture(4, 3);
    let mut seen = Vec::new();
    let change = fill_drag(
        &columns,
        &rows,
        FillDrag {
            position: Position::new(1, 0),
            anchor_col: 1,
            over_row: 1,
            over_col: 3,
        },
        &mut |event: &FillEvent| {
            seen.push(event.clone());
            event.target_rows.clone()
        },
    )
    .unwrap();

    let event = &seen[0];
    assert!(event.across);
    let cols: Vec<usize> = event
        .target_cols
        .as_ref()
        .unwrap()
        .iter()
        .map(|c| c.idx)
        .collect();
    assert_eq!(cols, vec![2, 3]);
    assert_eq!(event.target_rows, rows[0..=1].to_vec());
    assert_eq!(change.target_rows.as_ref().unwrap().len(), 2);
}

#[test]
fn test_fill_across_to_the_left() {
    let (columns, rows) = fixture(4, 2);
    let mut cols = Vec::new();
    fill_drag(
        &columns,
        &rows,
        FillDrag {
            position: Position::new(2, 0),
            anchor_col: 2,
            over_row: 0,
            over_col: 0,
        },
        &mut |event: &FillEvent| {
            cols = event
                .target_cols
                .as_ref()
                .unwrap()
                .iter()
                .map(|c| c.idx)
                .collect();
            event.target_rows.clone()
        },
    )
    .unwrap();
    assert_eq!(cols, vec![0, 1]);
}

#[test]
fn test_short_fill_result_keeps_remaining_rows() {
    let (columns, rows) = fixture(1, 4);
    let change = fill_drag(
        &columns,
        &rows,
        FillDrag {
            position: Position::new(0, 0),
            anchor_col: 0,
            over_row: 3,
            over_col: 0,
        },
        &mut |event: &FillEvent| {
            fill_with_marker(event).into_iter().take(1).collect()
        },
    )
    .unwrap();

    assert_eq!(cell_text(&change.new_rows[1], "c0"), "filled");
    assert_eq!(change.new_rows[2], rows[2]);
    assert_eq!(change.new_rows[3], rows[3]);
}

#[test]
fn test_fill_to_end() {
    let (columns, rows) = fixture(1, 4);
    let change = fill_to_end(&columns, &rows, Position::new(0, 1), &mut fill_with_marker).unwrap();
    assert_eq!(change.new_rows[0], rows[0]);
    assert_eq!(change.new_rows[1], rows[1]);
    assert_eq!(cell_text(&change.new_rows[2], "c0"), "filled");
    assert_eq!(cell_text(&change.new_rows[3], "c0"), "filled");

    // Already at the last row
    assert!(fill_to_end(&columns, &rows, Position::new(0, 3), &mut fill_with_marker).is_none());
}
