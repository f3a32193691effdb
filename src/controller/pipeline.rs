//! The per-change render pass and snapshot assembly.

use super::GridController;
use crate::layout::RowWindow;
use crate::render::{
    CellSnapshot, EditorSnapshot, FormatterContext, HeaderCellSnapshot, HeaderContext,
    HeaderRenderer, RowSnapshot, ViewportSnapshot,
};
use crate::selection::{is_cell_editable, SelectionState};
use crate::types::{CalculatedColumn, CellValue, SortDirection};

impl GridController {
    /// Run one render pass and describe the visible grid.
    ///
    /// The pass is one-way: validate the selection against the current
    /// data, queue any scroll-into-view the selection needs, then build the
    /// snapshot. Scrolling never feeds back into selection within a pass.
    /// Column layout is already current; every input that affects it
    /// recomputes it on arrival.
    pub fn render(&mut self) -> ViewportSnapshot {
        self.selection.validate(self.layout.len(), &self.rows);

        let position = self.selection.position();
        let editing = self.selection.is_editing();
        let changed = self.selection_changed || self.rendered_selection != (position, editing);
        self.selection_changed = false;
        self.rendered_selection = (position, editing);

        let in_bounds = position
            .within(self.layout.len(), self.rows.len())
            .is_some();
        if changed && !editing && in_bounds {
            self.scroll_to_cell(position);
            if std::mem::take(&mut self.cell_focused) {
                log::trace!("cell already focused, skipping focus request");
            } else {
                self.focus_requested = true;
            }
        }

        self.snapshot()
    }

    /// Build the snapshot for the current state without side effects.
    pub fn snapshot(&self) -> ViewportSnapshot {
        let vp = &self.viewport;
        let row_height = self.row_height();
        let header_row_height = self.header_row_height();

        let col_window = self.layout.window(vp.scroll_left, vp.width);
        let columns: Vec<&CalculatedColumn> = col_window
            .map(|w| self.layout.viewport_columns(w))
            .unwrap_or_default();
        let row_window = RowWindow::compute(
            self.rows.len(),
            row_height,
            self.client_height(),
            vp.scroll_top,
        );

        let all_rows_selected = self.all_rows_selected();
        let headers = columns
            .iter()
            .map(|c| self.header_snapshot(c, all_rows_selected))
            .collect();
        let rows = row_window
            .map(|w| {
                w.indices()
                    .filter_map(|row_idx| self.row_snapshot(row_idx, &columns))
                    .collect()
            })
            .unwrap_or_default();

        ViewportSnapshot {
            aria_row_count: 1 + self.rows.len() + self.options.summary_rows_count,
            aria_col_count: self.layout.len(),
            aria_multiselectable: self.is_selectable_rows(),
            total_column_width: self.layout.total_column_width,
            total_frozen_column_width: self.layout.total_frozen_column_width,
            total_row_height: self.rows.len() as f32 * row_height,
            row_height,
            header_row_height,
            scrolled_to_end: vp.scrolled_to_end(self.layout.total_column_width),
            col_overscan_start: col_window.map_or(0, |w| w.overscan_start),
            col_overscan_end: col_window.map_or(0, |w| w.overscan_end),
            row_overscan_start: row_window.map_or(0, |w| w.overscan_start),
            row_overscan_end: row_window.map_or(0, |w| w.overscan_end),
            headers,
            rows,
            editor: self.editor_snapshot(),
        }
    }

    /// Left edge of `column` in content coordinates; right-pinned columns
    /// sit against the viewport's right edge.
    fn content_left(&self, column: &CalculatedColumn) -> f32 {
        if column.is_pinned_right() {
            self.viewport.width - column.width
        } else {
            column.left
        }
    }

    fn header_snapshot(
        &self,
        column: &CalculatedColumn,
        all_rows_selected: bool,
    ) -> HeaderCellSnapshot {
        let sorted = self
            .sort_column
            .as_deref()
            .is_some_and(|key| key == column.key);
        let ctx = HeaderContext {
            sort_direction: sorted.then_some(self.sort_direction),
            all_rows_selected,
        };
        let content = column
            .header_renderer
            .as_ref()
            .unwrap_or(&HeaderRenderer::Default)
            .render(column, &ctx);
        let aria_sort = (sorted && self.sort_direction != SortDirection::None)
            .then(|| self.sort_direction.aria_sort().to_string());

        HeaderCellSnapshot {
            idx: column.idx,
            key: column.key.clone(),
            left: self.content_left(column),
            width: column.width,
            content,
            aria_col_index: column.idx + 1,
            aria_sort,
            sortable: column.sortable,
            resizable: column.resizable,
            frozen: column.frozen,
            is_last_frozen_column: column.is_last_frozen_column,
            pinned_right: column.is_pinned_right(),
        }
    }

    fn row_snapshot(&self, row_idx: usize, columns: &[&CalculatedColumn]) -> Option<RowSnapshot> {
        let row = self.rows.get(row_idx)?;
        let is_row_selected = self.is_row_selected(row_idx);
        let position = self.selection.position();
        let selected_cell = (position.row() == Some(row_idx))
            .then(|| position.col())
            .flatten();
        let editing = self.selection.is_editing();
        let copied = self.copied.as_ref().filter(|c| self.is_copied_row(c, row));

        let mut cells = Vec::with_capacity(columns.len());
        for column in columns {
            let cell = row.get(&column.key);
            if cell.is_some_and(CellValue::is_span_continuation) {
                continue;
            }
            let span = cell.map_or(1, CellValue::effective_span);
            let data = cell.and_then(CellValue::as_data);
            let is_selected = selected_cell == Some(column.idx);
            let is_disabled = cell.is_some_and(CellValue::is_disabled);
            let ctx = FormatterContext {
                row_idx,
                is_row_selected,
                is_cell_selected: is_selected,
            };
            let dragged_over = self.selection.is_dragged_over(column.idx, row_idx)
                && !is_disabled
                && span <= 1
                && !column.frozen;

            cells.push(CellSnapshot {
                idx: column.idx,
                key: column.key.clone(),
                left: self.content_left(column),
                width: self.spanned_width(column, span),
                content: column.formatter.format(column, row, &ctx),
                aria_col_index: column.idx + 1,
                aria_col_span: cell.and_then(CellValue::span),
                is_selected,
                is_editing: is_selected && editing,
                is_copied: copied.is_some_and(|c| c.column_key == column.key),
                is_dragged_over: dragged_over,
                is_disabled,
                has_drag_handle: self.has_drag_handle(column.idx, row_idx),
                frozen: column.frozen,
                is_last_frozen_column: column.is_last_frozen_column,
                pinned_right: column.is_pinned_right(),
                error: data.is_some_and(|d| d.error),
                alert: data.and_then(|d| d.alert.clone()),
                warning: data.and_then(|d| d.warning.clone()),
            });
        }

        Some(RowSnapshot {
            row_idx,
            top: row_idx as f32 * self.row_height() + self.header_row_height(),
            aria_row_index: row_idx + 2,
            aria_selected: self.is_selectable_rows().then_some(is_row_selected),
            is_row_selected,
            cells,
        })
    }

    /// Width of `column` plus the columns its cell spans into.
    fn spanned_width(&self, column: &CalculatedColumn, span: u32) -> f32 {
        let span = usize::try_from(span).unwrap_or(1).max(1);
        self.layout
            .columns
            .iter()
            .skip(column.idx)
            .take(span)
            .map(|c| c.width)
            .sum()
    }

    /// Whether the fill handle sits on cell `(col, row_idx)`.
    ///
    /// It shows on the bottom cell of the selected column when filling is
    /// enabled and the selected cell is an editable, enabled, single-span
    /// cell outside the frozen and right-pinned areas. It is hidden right
    /// after a fill across columns.
    pub(crate) fn has_drag_handle(&self, col: usize, row_idx: usize) -> bool {
        if self.callbacks.on_fill.is_none() {
            return false;
        }
        let SelectionState::Select(position) = self.selection.state() else {
            return false;
        };
        let position = *position;
        let Some((selected_col, selected_row)) =
            position.within(self.layout.len(), self.rows.len())
        else {
            return false;
        };
        if col != selected_col || !is_cell_editable(&self.layout.columns, &self.rows, position) {
            return false;
        }

        let bottom_row = self
            .selection
            .dragged_over_row()
            .filter(|&over| over > selected_row)
            .unwrap_or(selected_row);
        if row_idx != bottom_row {
            return false;
        }
        let just_filled = self.selection.dragged_over_cols().len() > 1 && !self.is_filling();
        if just_filled {
            return false;
        }

        let (Some(column), Some(row)) = (self.layout.get(col), self.rows.get(row_idx)) else {
            return false;
        };
        let cell = row.get(&column.key);
        !cell.is_some_and(CellValue::is_disabled)
            && !column.is_pinned_right()
            && !column.frozen
            && cell.map_or(1, CellValue::effective_span) == 1
    }

    fn editor_snapshot(&self) -> Option<EditorSnapshot> {
        let edit = self.selection.state().edit()?;
        let (col, row_idx) = edit.position.within(self.layout.len(), self.rows.len())?;
        let column = self.layout.get(col)?;
        let editor = column.editor.as_ref()?;
        Some(EditorSnapshot {
            position: edit.position,
            left: self.content_left(column),
            top: row_idx as f32 * self.row_height() + self.header_row_height(),
            width: column.width,
            height: self.row_height(),
            text: editor.initial_text(column, &edit.row, edit.key.as_deref()),
            key: edit.key.clone(),
        })
    }
}
