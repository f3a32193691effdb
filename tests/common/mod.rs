//! Common test utilities for xlgrid integration tests.
//!
//! Builders for column and row fixtures plus a controller wired to
//! recording callbacks.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use xlgrid::{
    ColumnLayout, ColumnSpec, DefaultColumnOptions, FillEvent, GridCallbacks, GridController,
    GridOptions, PasteEvent, Position, Row, RowsChange, SortDirection,
};

// ============================================================================
// Fixtures
// ============================================================================

/// `id` (read-only) and `title` (editable), the smallest useful grid
pub fn id_title_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "ID"),
        ColumnSpec::new("title", "Title").editable(),
    ]
}

/// `n` editable text columns keyed `c0..c{n-1}`
pub fn editable_columns(n: usize) -> Vec<ColumnSpec> {
    (0..n)
        .map(|i| ColumnSpec::new(format!("c{i}"), format!("C{i}")).editable())
        .collect()
}

/// `rows` rows over `c0..c{cols-1}` with values `r{row}c{col}`
pub fn grid_rows(rows: usize, cols: usize) -> Vec<Row> {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| (format!("c{c}"), format!("r{r}c{c}")))
                .collect()
        })
        .collect()
}

/// Rows `{id: i, title: "Title i"}`
pub fn id_title_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            Row::new()
                .with("id", i.to_string())
                .with("title", format!("Title {i}"))
        })
        .collect()
}

/// Lay out `specs` with no overrides and default options.
pub fn layout(specs: &[ColumnSpec], width: f32) -> ColumnLayout {
    ColumnLayout::compute(
        specs,
        &HashMap::new(),
        width,
        &DefaultColumnOptions::default(),
    )
}

/// Value of `key` in `row` as display text
pub fn cell_text(row: &Row, key: &str) -> String {
    row.get(key).map(|c| c.display_value()).unwrap_or_default()
}

// ============================================================================
// Recording controller
// ============================================================================

/// Everything the callbacks saw, shared with the closures
#[derive(Default)]
pub struct Recorded {
    pub rows_changes: Vec<RowsChange>,
    pub fills: Vec<FillEvent>,
    pub pastes: Vec<PasteEvent>,
    pub resizes: Vec<(usize, f32)>,
    pub selected_rows: Vec<HashSet<String>>,
    pub selected_cells: Vec<Position>,
    pub sorts: Vec<(String, SortDirection)>,
    pub scrolls: Vec<(f32, f32)>,
}

pub type Log = Rc<RefCell<Recorded>>;

/// Callbacks recording into `log`. The fill callback uppercases the source
/// value of the fill column into every target row.
pub fn recording_callbacks(log: &Log) -> GridCallbacks {
    let rows_log = Rc::clone(log);
    let fill_log = Rc::clone(log);
    let paste_log = Rc::clone(log);
    let resize_log = Rc::clone(log);
    let selected_log = Rc::clone(log);
    let cell_log = Rc::clone(log);
    let sort_log = Rc::clone(log);
    let scroll_log = Rc::clone(log);

    GridCallbacks {
        on_rows_change: Some(Box::new(move |change| {
            rows_log.borrow_mut().rows_changes.push(change);
        })),
        on_fill: Some(Box::new(move |event: &FillEvent| {
            fill_log.borrow_mut().fills.push(event.clone());
            let value = cell_text(&event.source_row, &event.column_key).to_uppercase();
            event
                .target_rows
                .iter()
                .map(|row| row.with_cell_value(&event.column_key, value.clone()))
                .collect()
        })),
        on_paste: Some(Box::new(move |event: &PasteEvent| {
            paste_log.borrow_mut().pastes.push(event.clone());
        })),
        on_column_resize: Some(Box::new(move |idx, width| {
            resize_log.borrow_mut().resizes.push((idx, width));
        })),
        on_selected_rows_change: Some(Box::new(move |selected: &HashSet<String>| {
            selected_log
                .borrow_mut()
                .selected_rows
                .push(selected.clone());
        })),
        on_selected_cell_change: Some(Box::new(move |position| {
            cell_log.borrow_mut().selected_cells.push(position);
        })),
        on_sort: Some(Box::new(move |key: &str, direction| {
            sort_log
                .borrow_mut()
                .sorts
                .push((key.to_string(), direction));
        })),
        on_scroll: Some(Box::new(move |top, left| {
            scroll_log.borrow_mut().scrolls.push((top, left));
        })),
    }
}

/// A measured controller over `specs` and `rows` with every callback recording.
pub fn recording_grid(
    specs: Vec<ColumnSpec>,
    rows: Vec<Row>,
    width: f32,
    height: f32,
) -> (GridController, Log) {
    let log: Log = Rc::default();
    let mut grid = GridController::new(GridOptions::default());
    grid.resize(width, height);
    grid.set_columns(specs);
    grid.set_rows(rows);
    grid.set_callbacks(recording_callbacks(&log));
    (grid, log)
}

/// Feed the last reported row set back, as a host would.
pub fn apply_last_change(grid: &mut GridController, log: &Log) {
    let rows = log
        .borrow()
        .rows_changes
        .last()
        .map(|c| c.new_rows.clone())
        .expect("a rows change was reported");
    grid.set_rows(rows);
}
