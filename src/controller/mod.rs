//! GridController - the composition root of the grid.
//!
//! This module owns every piece of grid state and wires the engines
//! together:
//! - Column layout and row windowing, recomputed from host inputs
//! - The selection state machine and the copied range
//! - Pointer gesture sessions (cell drag, fill drag, column resize)
//! - Reporting every mutation back to the host through [`GridCallbacks`]
//!
//! The host owns the row data. Nothing here writes rows in place: edits,
//! pastes and fills are reported as a [`RowsChange`] and the host answers
//! with `set_rows`.

mod events;
mod gesture;
mod header;
mod keyboard;
mod pipeline;
mod scroll;

pub use events::{
    ClipboardSink, GridCallbacks, KeyOutcome, PointerInput, PointerType, ScrollRequest,
};
pub use gesture::{
    GestureKind, GestureSession, GestureStep, ListenerGuard, PointerCapture, RESIZE_HANDLE_WIDTH,
};

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::layout::{ColumnLayout, Viewport};
use crate::selection::{EditCommit, NavigationContext, SelectionState, SelectionStateMachine};
use crate::types::{
    CalculatedColumn, ColumnSpec, CopiedRange, GridOptions, Position, Row, RowKeyGetter,
    RowsChange, SortDirection,
};

pub struct GridController {
    options: GridOptions,
    /// Column specs as supplied, before layout
    column_specs: Vec<ColumnSpec>,
    rows: Vec<Row>,
    /// Widths set by resize gestures, keyed by column key
    column_widths: HashMap<String, f32>,
    layout: ColumnLayout,
    viewport: Viewport,

    selection: SelectionStateMachine,
    copied: Option<CopiedRange>,
    gesture: Option<GestureSession>,
    pointer_capture: Option<Rc<dyn PointerCapture>>,

    row_key_getter: Option<RowKeyGetter>,
    selected_rows: Option<HashSet<String>>,
    /// Last row checked, the start of a shift-click range
    last_selected_row: Option<usize>,
    sort_column: Option<String>,
    sort_direction: SortDirection,

    callbacks: GridCallbacks,
    clipboard: Option<Box<dyn ClipboardSink>>,

    scroll_request: Option<ScrollRequest>,
    focus_requested: bool,
    /// A select happened since the last render pass
    selection_changed: bool,
    /// Selection as of the last render pass
    rendered_selection: (Position, bool),
    /// The host already focused the selected cell
    cell_focused: bool,
}

impl Default for GridController {
    fn default() -> Self {
        Self::new(GridOptions::default())
    }
}

impl GridController {
    pub fn new(options: GridOptions) -> Self {
        Self {
            options,
            column_specs: Vec::new(),
            rows: Vec::new(),
            column_widths: HashMap::new(),
            layout: ColumnLayout::default(),
            viewport: Viewport::new(),
            selection: SelectionStateMachine::new(),
            copied: None,
            gesture: None,
            pointer_capture: None,
            row_key_getter: None,
            selected_rows: None,
            last_selected_row: None,
            sort_column: None,
            sort_direction: SortDirection::None,
            callbacks: GridCallbacks::default(),
            clipboard: None,
            scroll_request: None,
            focus_requested: false,
            selection_changed: false,
            rendered_selection: (Position::SENTINEL, false),
            cell_focused: false,
        }
    }

    // ========================================================================
    // Host inputs
    // ========================================================================

    pub fn set_columns(&mut self, specs: Vec<ColumnSpec>) {
        self.column_specs = specs;
        self.relayout();
    }

    /// Replace the row data and reconcile the selection with it.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.selection.validate(self.layout.len(), &self.rows);
    }

    pub fn set_options(&mut self, options: GridOptions) {
        self.options = options;
        self.relayout();
    }

    pub fn set_row_key_getter(&mut self, getter: Option<RowKeyGetter>) {
        self.row_key_getter = getter;
    }

    /// Selected row keys. `None` disables row selection.
    pub fn set_selected_rows(&mut self, selected: Option<HashSet<String>>) {
        self.selected_rows = selected;
    }

    pub fn set_sort(&mut self, column: Option<String>, direction: SortDirection) {
        self.sort_column = column;
        self.sort_direction = direction;
    }

    pub fn set_callbacks(&mut self, callbacks: GridCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn callbacks_mut(&mut self) -> &mut GridCallbacks {
        &mut self.callbacks
    }

    pub fn set_clipboard(&mut self, clipboard: Option<Box<dyn ClipboardSink>>) {
        self.clipboard = clipboard;
    }

    pub fn set_pointer_capture(&mut self, capture: Option<Rc<dyn PointerCapture>>) {
        self.pointer_capture = capture;
    }

    /// New container size from the host's measurement.
    pub fn resize(&mut self, width: f32, height: f32) {
        let width_changed = (self.viewport.width - width).abs() > f32::EPSILON;
        self.viewport.resize(width, height);
        if width_changed {
            self.relayout();
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[CalculatedColumn] {
        &self.layout.columns
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn column_widths(&self) -> &HashMap<String, f32> {
        &self.column_widths
    }

    pub fn selection_state(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn selected_position(&self) -> Position {
        self.selection.position()
    }

    pub fn is_editing(&self) -> bool {
        self.selection.is_editing()
    }

    pub fn dragged_over_row(&self) -> Option<usize> {
        self.selection.dragged_over_row()
    }

    pub fn dragged_over_cols(&self) -> &[usize] {
        self.selection.dragged_over_cols()
    }

    pub fn copied(&self) -> Option<&CopiedRange> {
        self.copied.as_ref()
    }

    pub fn selected_rows(&self) -> Option<&HashSet<String>> {
        self.selected_rows.as_ref()
    }

    pub fn gesture(&self) -> Option<&GestureSession> {
        self.gesture.as_ref()
    }

    // ========================================================================
    // Shared internals
    // ========================================================================

    fn relayout(&mut self) {
        self.layout = ColumnLayout::compute(
            &self.column_specs,
            &self.column_widths,
            self.viewport.width,
            &self.options.default_column_options,
        );
        self.selection.validate(self.layout.len(), &self.rows);
    }

    pub(crate) fn row_height(&self) -> f32 {
        self.options.effective_row_height()
    }

    pub(crate) fn header_row_height(&self) -> f32 {
        self.options.header_row_height()
    }

    /// Height of the scrollable body area
    pub(crate) fn client_height(&self) -> f32 {
        self.viewport.client_height(
            self.header_row_height(),
            self.options.summary_rows_count,
            self.row_height(),
        )
    }

    /// Full scroll extent, header and summary rows included
    pub(crate) fn content_height(&self) -> f32 {
        let rows = self.rows.len() + self.options.summary_rows_count;
        self.header_row_height() + rows as f32 * self.row_height()
    }

    pub(crate) fn navigation_context(&self) -> NavigationContext<'_> {
        NavigationContext {
            columns: &self.layout.columns,
            rows: &self.rows,
            cell_navigation_mode: self.options.cell_navigation_mode,
            rows_per_page: Viewport::rows_per_page(self.client_height(), self.row_height()),
        }
    }

    pub(crate) fn is_selectable_rows(&self) -> bool {
        self.selected_rows.is_some() && self.callbacks.on_selected_rows_change.is_some()
    }

    /// Run a selection change and report its effects.
    ///
    /// Returns false when the target was out of bounds and nothing moved.
    pub(crate) fn apply_select(&mut self, position: Position, open_editor: bool) -> bool {
        let transition =
            self.selection
                .select_cell(&self.layout.columns, &self.rows, position, open_editor);
        if let Some(commit) = transition.commit {
            self.emit_commit(commit);
        }
        let Some(selected) = transition.selected else {
            return false;
        };
        self.copied = None;
        self.selection_changed = true;
        if let Some(cb) = self.callbacks.on_selected_cell_change.as_mut() {
            cb(selected);
        }
        true
    }

    pub(crate) fn emit_commit(&mut self, commit: EditCommit) {
        let mut new_rows = self.rows.clone();
        if let Some(slot) = new_rows.get_mut(commit.row_idx) {
            *slot = commit.row;
        }
        self.emit_rows_change(RowsChange {
            new_rows,
            position: Some(commit.position),
            key: Some(commit.column_key),
            ..RowsChange::default()
        });
    }

    pub(crate) fn emit_rows_change(&mut self, change: RowsChange) {
        match self.callbacks.on_rows_change.as_mut() {
            Some(cb) => cb(change),
            None => log::debug!("rows changed with no on_rows_change handler"),
        }
    }

    /// Store a width override and recompute the layout.
    pub(crate) fn set_column_width(&mut self, idx: usize, width: f32) {
        let Some(key) = self.layout.get(idx).map(|c| c.key.clone()) else {
            return;
        };
        self.column_widths.insert(key, width);
        self.relayout();
        if let Some(cb) = self.callbacks.on_column_resize.as_mut() {
            cb(idx, width);
        }
    }

    /// Row key used for selection and copy highlighting.
    pub(crate) fn row_key(&self, row: &Row) -> Option<String> {
        self.row_key_getter.as_ref().map(|g| g.key_of(row))
    }

    /// Whether `row` is one of the rows in the copied range.
    pub(crate) fn is_copied_row(&self, copied: &CopiedRange, row: &Row) -> bool {
        match &self.row_key_getter {
            Some(getter) => {
                let key = getter.key_of(row);
                copied.rows.iter().any(|r| getter.key_of(r) == key)
            }
            None => copied.rows.iter().any(|r| r == row),
        }
    }
}
