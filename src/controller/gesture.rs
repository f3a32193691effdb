//! Pointer gestures: cell drag, fill-handle drag and column resize.
//!
//! A gesture is an explicit session created on pointer-down and owned by
//! the controller. Global move/up listeners are represented by a
//! [`ListenerGuard`] that detaches on drop, so every way a session ends
//! (release, button lifted mid-move, cancel, replacement) releases them.

use std::fmt;
use std::rc::Rc;

use super::{GridController, PointerInput};
use crate::range::{fill_drag, fill_to_end, FillDrag};
use crate::types::Position;

/// Resize hit zone at the right edge of a header cell, in pixels
pub const RESIZE_HANDLE_WIDTH: f32 = 11.0;

/// Host hook for window-level pointer listeners
pub trait PointerCapture {
    fn attach(&self, pointer_id: i32);
    fn detach(&self, pointer_id: i32);
}

/// Attached listeners for one pointer; detached when dropped.
pub struct ListenerGuard {
    capture: Option<Rc<dyn PointerCapture>>,
    pointer_id: i32,
}

impl ListenerGuard {
    pub fn new(capture: Option<Rc<dyn PointerCapture>>, pointer_id: i32) -> Self {
        if let Some(capture) = &capture {
            capture.attach(pointer_id);
        }
        Self {
            capture,
            pointer_id,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(capture) = &self.capture {
            capture.detach(self.pointer_id);
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("pointer_id", &self.pointer_id)
            .field("attached", &self.capture.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureKind {
    /// Extending the selection over cells
    CellDrag,
    /// Dragging the fill handle; `start_row` is the row extent at drag start
    FillDrag { start_row: usize },
    /// Resizing a column; `offset` is the distance from the pointer to the
    /// cell's right edge at pointer-down
    ColumnResize { col_idx: usize, offset: f32 },
}

/// What a pointer move means for the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    Continue,
    /// The button was released outside the grid
    End,
    /// Column `col_idx` should extend to `right` (grid coordinates)
    ResizeTo { col_idx: usize, right: f32 },
}

#[derive(Debug)]
pub struct GestureSession {
    pointer_id: i32,
    kind: GestureKind,
    _listeners: ListenerGuard,
}

impl GestureSession {
    pub fn new(
        pointer_id: i32,
        kind: GestureKind,
        capture: Option<Rc<dyn PointerCapture>>,
    ) -> Self {
        log::debug!("gesture start: {kind:?} (pointer {pointer_id})");
        Self {
            pointer_id,
            kind,
            _listeners: ListenerGuard::new(capture, pointer_id),
        }
    }

    pub fn pointer_id(&self) -> i32 {
        self.pointer_id
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn is_filling(&self) -> bool {
        matches!(self.kind, GestureKind::FillDrag { .. })
    }

    /// Interpret a pointer move. Moves from other pointers are ignored.
    pub fn handle_move(&self, input: &PointerInput) -> GestureStep {
        if input.pointer_id != self.pointer_id {
            return GestureStep::Continue;
        }
        if !input.is_pressed() {
            return GestureStep::End;
        }
        match self.kind {
            GestureKind::ColumnResize { col_idx, offset } => GestureStep::ResizeTo {
                col_idx,
                right: input.client_x + offset,
            },
            GestureKind::CellDrag | GestureKind::FillDrag { .. } => GestureStep::Continue,
        }
    }

    /// Whether a pointer-up for `pointer_id` ends this session.
    pub fn handle_end(&self, pointer_id: i32) -> bool {
        pointer_id == self.pointer_id
    }
}

impl GridController {
    fn start_gesture(&mut self, pointer_id: i32, kind: GestureKind) {
        // Dropping a previous session detaches its listeners first
        self.gesture = None;
        self.gesture = Some(GestureSession::new(
            pointer_id,
            kind,
            self.pointer_capture.as_ref().map(Rc::clone),
        ));
    }

    fn end_gesture(&mut self) {
        let Some(session) = self.gesture.take() else {
            return;
        };
        log::debug!("gesture end: {:?}", session.kind());
        if session.is_filling() {
            self.finish_fill();
        }
    }

    /// Drop the active gesture without applying it.
    pub fn cancel_gesture(&mut self) {
        if let Some(session) = self.gesture.take() {
            log::debug!("gesture cancelled: {:?}", session.kind());
        }
    }

    // ========================================================================
    // Cell pointer events
    // ========================================================================

    /// Pointer pressed on a body cell.
    ///
    /// Selects the cell and starts a cell drag. Right clicks, disabled cells
    /// and right-pinned columns are ignored. The cell showing the fill handle
    /// keeps its selection so the handle can be grabbed.
    pub fn cell_pointer_down(&mut self, position: Position, input: &PointerInput) {
        if input.buttons == 2 {
            return;
        }
        let Some((col, row_idx)) = position.within(self.layout.len(), self.rows.len()) else {
            return;
        };
        let Some(column) = self.layout.get(col) else {
            return;
        };
        let edit_on_click = column.edit_on_click;
        if column.is_pinned_right() || self.is_cell_disabled_at(col, row_idx) {
            return;
        }
        if !self.has_drag_handle(col, row_idx) || edit_on_click {
            self.apply_select(position, edit_on_click);
        }
        if input.is_primary_only() {
            self.start_gesture(input.pointer_id, GestureKind::CellDrag);
        }
    }

    /// Pointer entered a body cell while a drag may be in progress.
    pub fn cell_pointer_enter(&mut self, position: Position, buttons: u16) {
        let Some(kind) = self.gesture.as_ref().map(GestureSession::kind) else {
            return;
        };
        if buttons != 1 {
            if !matches!(kind, GestureKind::ColumnResize { .. }) {
                self.end_gesture();
            }
            return;
        }
        let Some((col, row_idx)) = position.within(self.layout.len(), self.rows.len()) else {
            return;
        };
        let Some((selected_col, selected_row)) = self
            .selection
            .position()
            .within(self.layout.len(), self.rows.len())
        else {
            return;
        };

        match kind {
            GestureKind::CellDrag => {
                self.selection.set_dragged_over_row(Some(row_idx));
                self.selection.set_dragged_over_cols(vec![selected_col]);
            }
            GestureKind::FillDrag { start_row } => {
                // A single-row selection extends rows only within its own column
                let over_row = if start_row == selected_row && col == selected_col {
                    row_idx
                } else {
                    start_row
                };
                self.selection.set_dragged_over_row(Some(over_row));
                let anchor = self.selection.anchor_col().unwrap_or(selected_col);
                let cols: Vec<usize> = if col >= anchor {
                    (anchor..=col).collect()
                } else {
                    (col..=anchor).rev().collect()
                };
                self.selection.set_dragged_over_cols(cols);
            }
            GestureKind::ColumnResize { .. } => {}
        }
    }

    /// Double click on a body cell opens its editor.
    pub fn cell_double_click(&mut self, position: Position) {
        let Some((col, row_idx)) = position.within(self.layout.len(), self.rows.len()) else {
            return;
        };
        let pinned_right = self.layout.get(col).is_some_and(|c| c.is_pinned_right());
        if pinned_right || self.is_cell_disabled_at(col, row_idx) {
            return;
        }
        self.apply_select(position, true);
    }

    // ========================================================================
    // Fill handle
    // ========================================================================

    /// Whether the selected cell currently shows the fill handle.
    fn selection_has_drag_handle(&self) -> bool {
        let Some((col, row_idx)) = self
            .selection
            .position()
            .within(self.layout.len(), self.rows.len())
        else {
            return false;
        };
        let bottom_row = self
            .selection
            .dragged_over_row()
            .filter(|&over| over > row_idx)
            .unwrap_or(row_idx);
        self.has_drag_handle(col, bottom_row)
    }

    /// Pointer pressed on the fill handle.
    ///
    /// Ignored unless the selected cell shows the handle.
    pub fn fill_handle_pointer_down(&mut self, input: &PointerInput) {
        if !input.is_primary_only() || !self.selection_has_drag_handle() {
            return;
        }
        let Some(selected_row) = self.selection.position().row() else {
            return;
        };
        let start_row = self.selection.dragged_over_row().unwrap_or(selected_row);
        self.start_gesture(input.pointer_id, GestureKind::FillDrag { start_row });
    }

    /// Double click on the fill handle fills to the last row.
    pub fn fill_handle_double_click(&mut self) {
        if self.callbacks.on_rows_change.is_none() || !self.selection_has_drag_handle() {
            return;
        }
        let Some(on_fill) = self.callbacks.on_fill.as_mut() else {
            return;
        };
        let position = self.selection.position();
        let change = fill_to_end(&self.layout.columns, &self.rows, position, on_fill.as_mut());
        if let Some(change) = change {
            self.emit_rows_change(change);
        }
    }

    fn finish_fill(&mut self) {
        let (Some(over_row), Some(over_col)) = (
            self.selection.dragged_over_row(),
            self.selection.last_dragged_over_col(),
        ) else {
            return;
        };
        if self.callbacks.on_rows_change.is_none() {
            return;
        }
        let Some(on_fill) = self.callbacks.on_fill.as_mut() else {
            return;
        };
        let position = self.selection.position();
        let Some(anchor_col) = self.selection.anchor_col().or_else(|| position.col()) else {
            return;
        };
        let drag = FillDrag {
            position,
            anchor_col,
            over_row,
            over_col,
        };
        let change = fill_drag(&self.layout.columns, &self.rows, drag, on_fill.as_mut());
        if let Some(change) = change {
            self.emit_rows_change(change);
        }
        self.copied = None;
    }

    // ========================================================================
    // Column resize
    // ========================================================================

    /// Pointer pressed on header cell `idx`.
    ///
    /// `input.client_x` is relative to the grid's left edge. Starts a resize
    /// when the pointer is within [`RESIZE_HANDLE_WIDTH`] of the right edge
    /// of a resizable column. Returns whether a resize started.
    pub fn header_resize_pointer_down(&mut self, idx: usize, input: &PointerInput) -> bool {
        let Some(column) = self.layout.get(idx) else {
            return false;
        };
        if !column.resizable || !input.is_pressed() {
            return false;
        }
        let right =
            column.screen_left(self.viewport.scroll_left, self.viewport.width) + column.width;
        let offset = right - input.client_x;
        if offset > RESIZE_HANDLE_WIDTH {
            return false;
        }
        self.start_gesture(
            input.pointer_id,
            GestureKind::ColumnResize {
                col_idx: idx,
                offset,
            },
        );
        true
    }

    // ========================================================================
    // Window-level pointer events
    // ========================================================================

    pub fn pointer_move(&mut self, input: &PointerInput) {
        let Some(step) = self.gesture.as_ref().map(|s| s.handle_move(input)) else {
            return;
        };
        match step {
            GestureStep::Continue => {}
            GestureStep::End => self.end_gesture(),
            GestureStep::ResizeTo { col_idx, right } => {
                let Some(column) = self.layout.get(col_idx) else {
                    return;
                };
                let width =
                    right - column.screen_left(self.viewport.scroll_left, self.viewport.width);
                if width > 0.0 {
                    self.set_column_width(col_idx, width);
                }
            }
        }
    }

    /// Pointer released anywhere. Only the pointer that started the
    /// gesture ends it.
    pub fn pointer_up(&mut self, pointer_id: i32) {
        if self.gesture.as_ref().is_some_and(|s| s.handle_end(pointer_id)) {
            self.end_gesture();
        }
    }

    pub fn is_filling(&self) -> bool {
        self.gesture
            .as_ref()
            .is_some_and(GestureSession::is_filling)
    }

    pub(crate) fn is_cell_disabled_at(&self, col: usize, row_idx: usize) -> bool {
        let (Some(column), Some(row)) = (self.layout.get(col), self.rows.get(row_idx)) else {
            return false;
        };
        crate::types::is_cell_disabled(row.get(&column.key))
    }
}
