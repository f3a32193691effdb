//! Column layout: widths, ordering, left offsets and the horizontal window.

use std::collections::HashMap;

use crate::render::{Editor, Formatter};
use crate::types::{
    CalculatedColumn, ColumnSpec, ColumnWidth, DefaultColumnOptions, SELECT_COLUMN_KEY,
};

/// Minimum column width when neither the column nor the grid sets one
pub const DEFAULT_MIN_COLUMN_WIDTH: f32 = 54.0;

/// Resolved columns for one viewport width
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    pub columns: Vec<CalculatedColumn>,
    /// Sum of all column widths
    pub total_column_width: f32,
    /// Index of the last left-frozen column
    pub last_frozen_column_index: Option<usize>,
    /// Right edge of the last left-frozen column, 0 without frozen columns
    pub total_frozen_column_width: f32,
}

/// Rendered column range including one column of overscan per side.
///
/// Frozen columns are rendered in addition to this range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWindow {
    pub overscan_start: usize,
    pub overscan_end: usize,
}

/// Width requested by a column before clamping, `None` when it is auto.
fn specified_width(
    column: &ColumnSpec,
    overrides: &HashMap<String, f32>,
    viewport_width: f32,
) -> Option<f32> {
    if let Some(&width) = overrides.get(&column.key) {
        return Some(width);
    }
    match column.width {
        ColumnWidth::Px(px) => Some(px),
        ColumnWidth::Percent(pct) => Some((viewport_width * pct as f32 / 100.0).floor()),
        ColumnWidth::Auto => None,
    }
}

/// Clamp to `[min_width ?? grid minimum, max_width]`.
pub fn clamp_column_width(width: f32, column: &ColumnSpec, min_column_width: f32) -> f32 {
    let width = width.max(column.min_width.unwrap_or(min_column_width));
    match column.max_width {
        Some(max) => width.min(max),
        None => width,
    }
}

impl ColumnLayout {
    /// Lay out `specs` for a viewport `viewport_width` pixels wide.
    ///
    /// `overrides` holds widths set by resize gestures and wins over the
    /// column's own width. Auto columns share what is left of the viewport
    /// evenly, never going below the grid minimum; leftover whole pixels go
    /// to the leading auto columns so the row fills the viewport exactly.
    pub fn compute(
        specs: &[ColumnSpec],
        overrides: &HashMap<String, f32>,
        viewport_width: f32,
        defaults: &DefaultColumnOptions,
    ) -> Self {
        let min_column_width = defaults.min_width.unwrap_or(DEFAULT_MIN_COLUMN_WIDTH);

        // Select column first, everything else keeps its relative order.
        let mut ordered: Vec<(&ColumnSpec, Option<f32>)> = specs
            .iter()
            .map(|spec| {
                let width = specified_width(spec, overrides, viewport_width)
                    .map(|w| clamp_column_width(w, spec, min_column_width));
                (spec, width)
            })
            .collect();
        ordered.sort_by_key(|(spec, _)| spec.key != SELECT_COLUMN_KEY);

        let allocated: f32 = ordered.iter().filter_map(|(_, w)| *w).sum();
        let unassigned = ordered.iter().filter(|(_, w)| w.is_none()).count();

        let (per_column, leftover) = if unassigned == 0 {
            (0.0, 0.0)
        } else {
            let unallocated = viewport_width - allocated;
            let per = (unallocated / unassigned as f32).floor();
            if per >= min_column_width {
                (per, unallocated - per * unassigned as f32)
            } else {
                (min_column_width, 0.0)
            }
        };
        let whole_leftover = leftover.floor();

        let mut columns = Vec::with_capacity(ordered.len());
        let mut left = 0.0_f32;
        let mut total_width = 0.0_f32;
        let mut auto_seen = 0_usize;
        let mut last_frozen_column_index = None;

        for (idx, (spec, width)) in ordered.into_iter().enumerate() {
            let width = match width {
                Some(w) => w,
                None => {
                    let mut w = per_column;
                    if (auto_seen as f32) < whole_leftover {
                        w += 1.0;
                    }
                    auto_seen += 1;
                    if auto_seen == unassigned {
                        w += leftover - whole_leftover;
                    }
                    clamp_column_width(w, spec, min_column_width)
                }
            };
            let column = calculate_column(spec, idx, width, left, defaults);
            if column.frozen && column.frozen_alignment.is_none() {
                last_frozen_column_index = Some(idx);
            }
            total_width += width;
            if !column.is_pinned_right() {
                left += width;
            }
            columns.push(column);
        }

        let mut total_frozen_column_width = 0.0;
        if let Some(last) = last_frozen_column_index.and_then(|i| columns.get_mut(i)) {
            last.is_last_frozen_column = true;
            total_frozen_column_width = last.left + last.width;
        }

        log::trace!(
            "column layout: {} columns, total {total_width}px, frozen {total_frozen_column_width}px",
            columns.len()
        );

        Self {
            columns,
            total_column_width: total_width,
            last_frozen_column_index,
            total_frozen_column_width,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&CalculatedColumn> {
        self.columns.get(idx)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    fn first_unfrozen_index(&self) -> usize {
        let last_idx = self.columns.len().saturating_sub(1);
        self.last_frozen_column_index
            .map_or(0, |i| i + 1)
            .min(last_idx)
    }

    /// Columns intersecting `[scroll_left + frozen width, scroll_left + viewport_width]`
    /// plus one column of overscan on each side. `None` without columns.
    pub fn window(&self, scroll_left: f32, viewport_width: f32) -> Option<ColumnWindow> {
        let last_idx = self.columns.len().checked_sub(1)?;
        let viewport_left = scroll_left + self.total_frozen_column_width;
        let viewport_right = scroll_left + viewport_width;
        let first_unfrozen = self.first_unfrozen_index();

        if viewport_left >= viewport_right {
            return Some(ColumnWindow {
                overscan_start: first_unfrozen,
                overscan_end: first_unfrozen,
            });
        }

        let right_edge = |i: usize| self.columns.get(i).map_or(0.0, |c| c.left + c.width);

        let mut visible_start = first_unfrozen;
        while visible_start < last_idx && right_edge(visible_start) <= viewport_left {
            visible_start += 1;
        }
        let mut visible_end = visible_start;
        while visible_end < last_idx && right_edge(visible_end) < viewport_right {
            visible_end += 1;
        }

        Some(ColumnWindow {
            overscan_start: first_unfrozen.max(visible_start.saturating_sub(1)),
            overscan_end: last_idx.min(visible_end + 1),
        })
    }

    /// Columns to render for `window`: the window itself plus every frozen column.
    pub fn viewport_columns(&self, window: ColumnWindow) -> Vec<&CalculatedColumn> {
        self.columns
            .iter()
            .filter(|c| {
                c.frozen || (c.idx >= window.overscan_start && c.idx <= window.overscan_end)
            })
            .collect()
    }

    /// Horizontal scroll delta that brings column `idx` fully into view.
    ///
    /// Negative scrolls left, 0 means the column is already visible.
    pub fn column_scroll_delta(&self, idx: usize, scroll_left: f32, client_width: f32) -> f32 {
        let Some(selected) = self.columns.get(idx) else {
            return 0.0;
        };
        let (left, frozen) = self
            .columns
            .iter()
            .take(idx)
            .fold((0.0_f32, 0.0_f32), |(left, frozen), c| {
                let frozen = if c.frozen { frozen + c.width } else { frozen };
                (left + c.width, frozen)
            });
        let delta_left = left - frozen - scroll_left;
        let delta_right = left + selected.width - scroll_left;
        if delta_left < 0.0 {
            delta_left
        } else if delta_right > client_width {
            delta_right - client_width
        } else {
            0.0
        }
    }

    /// New `scroll_left` that reveals column `idx`, or `None` when no scroll is needed.
    ///
    /// Frozen columns never scroll. A column counts as hidden when it sits
    /// under the frozen area (or within one column width of it) or crosses
    /// the right edge.
    pub fn scroll_left_for_column(
        &self,
        idx: usize,
        scroll_left: f32,
        client_width: f32,
    ) -> Option<f32> {
        if self.last_frozen_column_index.is_some_and(|last| idx <= last) {
            return None;
        }
        let column = self.columns.get(idx)?;
        let at_left_boundary =
            column.left < scroll_left + column.width + self.total_frozen_column_width;
        let at_right_boundary = column.left + column.width > client_width + scroll_left;
        if !(at_left_boundary || at_right_boundary) {
            return None;
        }
        let delta = self.column_scroll_delta(idx, scroll_left, client_width);
        if delta.abs() < f32::EPSILON {
            None
        } else {
            Some(scroll_left + delta)
        }
    }
}

/// Apply column and grid defaults to one spec.
fn calculate_column(
    spec: &ColumnSpec,
    idx: usize,
    width: f32,
    left: f32,
    defaults: &DefaultColumnOptions,
) -> CalculatedColumn {
    let editor = spec
        .editor
        .clone()
        .or_else(|| (spec.editable == Some(true)).then_some(Editor::Text));
    CalculatedColumn {
        key: spec.key.clone(),
        name: spec.name.clone(),
        idx,
        width,
        left,
        min_width: spec.min_width,
        max_width: spec.max_width,
        alignment: spec.alignment,
        frozen: spec.frozen,
        frozen_alignment: spec.frozen_alignment,
        is_last_frozen_column: false,
        sortable: spec.sortable.or(defaults.sortable).unwrap_or(false),
        sort_descending_first: spec.sort_descending_first,
        resizable: spec.resizable.or(defaults.resizable).unwrap_or(false),
        edit_on_click: spec.edit_on_click,
        editable: spec.editable,
        editable_when: spec.editable_when.clone(),
        formatter: spec
            .formatter
            .clone()
            .or_else(|| defaults.formatter.clone())
            .unwrap_or(Formatter::Value),
        editor,
        header_renderer: spec.header_renderer.clone(),
        format_value: spec.format_value.clone(),
    }
}
