//! Column layout and horizontal window tests
//!
//! Width resolution, select-column ordering, frozen and right-pinned
//! columns, and the rendered column range for a scroll offset.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::collections::HashMap;

use common::{id_title_columns, layout};
use test_case::test_case;
use xlgrid::layout::DEFAULT_MIN_COLUMN_WIDTH;
use xlgrid::{ColumnLayout, ColumnSpec, ColumnWidth, DefaultColumnOptions, SELECT_COLUMN_KEY};

fn keys(layout: &ColumnLayout) -> Vec<&str> {
    layout.columns.iter().map(|c| c.key.as_str()).collect()
}

#[test]
fn test_two_auto_columns_fill_viewport() {
    let l = layout(&id_title_columns(), 400.0);

    assert_eq!(l.columns.len(), 2);
    assert!(l.columns.iter().all(|c| c.width >= DEFAULT_MIN_COLUMN_WIDTH));
    assert_eq!(l.total_column_width, 400.0);
    assert_eq!(l.columns[0].left, 0.0);
    assert_eq!(l.columns[1].left, l.columns[0].width);
}

#[test]
fn test_odd_viewport_width_is_filled_exactly() {
    let specs: Vec<_> = (0..3).map(|i| ColumnSpec::new(format!("c{i}"), "")).collect();
    let l = layout(&specs, 401.0);

    assert_eq!(l.total_column_width, 401.0);
    let widths: Vec<f32> = l.columns.iter().map(|c| c.width).collect();
    assert_eq!(widths, vec![134.0, 134.0, 133.0]);
}

#[test]
fn test_mixed_width_kinds() {
    let specs = vec![
        ColumnSpec::new("px", "").width(ColumnWidth::Px(100.0)),
        ColumnSpec::new("pct", "").width(ColumnWidth::Percent(25)),
        ColumnSpec::new("auto", ""),
    ];
    let l = layout(&specs, 400.0);

    assert_eq!(l.columns[0].width, 100.0);
    assert_eq!(l.columns[1].width, 100.0);
    assert_eq!(l.columns[2].width, 200.0);
    assert_eq!(l.columns[2].left, 200.0);
}

#[test]
fn test_percent_width_is_floored() {
    let specs = vec![ColumnSpec::new("pct", "").width(ColumnWidth::Percent(33))];
    let l = layout(&specs, 301.0);
    // 301 * 0.33 = 99.33
    assert_eq!(l.columns[0].width, 99.0);
}

#[test_case(Some(120.0), None, 10.0, 120.0; "min wins over fixed")]
#[test_case(None, Some(80.0), 500.0, 80.0; "max caps fixed")]
#[test_case(None, None, 10.0, DEFAULT_MIN_COLUMN_WIDTH; "grid minimum")]
fn test_fixed_width_clamping(min: Option<f32>, max: Option<f32>, px: f32, expected: f32) {
    let mut spec = ColumnSpec::new("a", "A").width(ColumnWidth::Px(px));
    spec.min_width = min;
    spec.max_width = max;
    let l = layout(&[spec], 1000.0);
    assert_eq!(l.columns[0].width, expected);
}

#[test]
fn test_grid_minimum_comes_from_default_options() {
    let defaults = DefaultColumnOptions {
        min_width: Some(150.0),
        ..DefaultColumnOptions::default()
    };
    let specs = vec![ColumnSpec::new("a", ""), ColumnSpec::new("b", "")];
    let l = ColumnLayout::compute(&specs, &HashMap::new(), 200.0, &defaults);

    assert_eq!(l.columns[0].width, 150.0);
    assert_eq!(l.columns[1].width, 150.0);
    assert_eq!(l.total_column_width, 300.0);
}

#[test]
fn test_width_override_by_key() {
    let mut overrides = HashMap::new();
    overrides.insert("title".to_string(), 250.0);
    let l = ColumnLayout::compute(
        &id_title_columns(),
        &overrides,
        400.0,
        &DefaultColumnOptions::default(),
    );
    assert_eq!(l.columns[1].width, 250.0);
    assert_eq!(l.columns[0].width, 150.0);
}

#[test]
fn test_select_column_is_stable_first() {
    let specs = vec![
        ColumnSpec::new("b", "B"),
        ColumnSpec::new("a", "A"),
        ColumnSpec::select_column(),
        ColumnSpec::new("c", "C"),
    ];
    let l = layout(&specs, 600.0);
    assert_eq!(keys(&l), vec![SELECT_COLUMN_KEY, "b", "a", "c"]);
    let indices: Vec<usize> = l.columns.iter().map(|c| c.idx).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn test_last_frozen_column() {
    let specs = vec![
        ColumnSpec::new("a", "")
            .width(ColumnWidth::Px(80.0))
            .frozen(),
        ColumnSpec::new("b", "")
            .width(ColumnWidth::Px(90.0))
            .frozen(),
        ColumnSpec::new("c", "").width(ColumnWidth::Px(100.0)),
    ];
    let l = layout(&specs, 400.0);

    assert_eq!(l.last_frozen_column_index, Some(1));
    assert!(!l.columns[0].is_last_frozen_column);
    assert!(l.columns[1].is_last_frozen_column);
    assert_eq!(l.total_frozen_column_width, 170.0);
}

#[test]
fn test_right_pinned_column_does_not_advance_left() {
    let specs = vec![
        ColumnSpec::new("a", "").width(ColumnWidth::Px(100.0)),
        ColumnSpec::new("pinned", "")
            .width(ColumnWidth::Px(60.0))
            .pinned_right(),
        ColumnSpec::new("b", "").width(ColumnWidth::Px(100.0)),
    ];
    let l = layout(&specs, 400.0);

    assert_eq!(l.columns[1].left, 100.0);
    assert_eq!(l.columns[2].left, 100.0);
    assert_eq!(l.total_column_width, 260.0);
    // Right-pinned columns never count as left-frozen
    assert_eq!(l.last_frozen_column_index, None);
    assert_eq!(l.total_frozen_column_width, 0.0);
    // Positioned against the right edge of the viewport
    assert_eq!(l.columns[1].screen_left(0.0, 400.0), 340.0);
    assert_eq!(l.columns[1].screen_left(75.0, 400.0), 340.0);
}

#[test]
fn test_zero_viewport_width_does_not_panic() {
    let l = layout(&id_title_columns(), 0.0);
    assert!(l.columns.iter().all(|c| c.width >= DEFAULT_MIN_COLUMN_WIDTH));
}

// ============================================================================
// Horizontal window
// ============================================================================

fn wide_layout() -> ColumnLayout {
    // 20 columns of 100px; the first is frozen
    let specs: Vec<_> = (0..20)
        .map(|i| {
            let spec = ColumnSpec::new(format!("c{i}"), "").width(ColumnWidth::Px(100.0));
            if i == 0 {
                spec.frozen()
            } else {
                spec
            }
        })
        .collect();
    layout(&specs, 400.0)
}

#[test]
fn test_window_at_origin() {
    let l = wide_layout();
    let w = l.window(0.0, 400.0).unwrap();
    // Visible 1..=3, one column of overscan on the right
    assert_eq!(w.overscan_start, 1);
    assert_eq!(w.overscan_end, 4);
}

#[test]
fn test_window_scrolled() {
    let l = wide_layout();
    let w = l.window(1000.0, 400.0).unwrap();
    // Visible area [1100, 1400] covers columns 11..=13
    assert_eq!(w.overscan_start, 10);
    assert_eq!(w.overscan_end, 14);
}

#[test]
fn test_window_clamped_at_end() {
    let l = wide_layout();
    let w = l.window(1600.0, 400.0).unwrap();
    assert_eq!(w.overscan_end, 19);
}

#[test]
fn test_frozen_columns_always_rendered() {
    let l = wide_layout();
    let w = l.window(1000.0, 400.0).unwrap();
    let rendered: Vec<usize> = l.viewport_columns(w).iter().map(|c| c.idx).collect();
    assert_eq!(rendered, vec![0, 10, 11, 12, 13, 14]);
}

#[test]
fn test_window_without_columns() {
    let l = layout(&[], 400.0);
    assert!(l.window(0.0, 400.0).is_none());
}

#[test]
fn test_scroll_left_for_hidden_column() {
    let l = wide_layout();
    // Column 6 spans [600, 700]; viewport [0, 400] must scroll right by 300
    assert_eq!(l.scroll_left_for_column(6, 0.0, 400.0), Some(300.0));
    // Frozen columns never scroll
    assert_eq!(l.scroll_left_for_column(0, 500.0, 400.0), None);
    // Fully visible column
    assert_eq!(l.scroll_left_for_column(2, 0.0, 400.0), None);
}
