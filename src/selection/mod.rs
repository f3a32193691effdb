//! Selection state machine.
//!
//! Owns the single authoritative selected/editing cell plus the transient
//! drag markers used by copy and fill. Transitions are driven by the
//! controller; this module never reports to the host directly. Instead
//! transitions hand back what happened (an edit to commit, a new
//! position) and the controller turns that into callbacks.

mod keys;
pub mod navigation;

pub use keys::KeyInput;
pub use navigation::{
    can_exit_grid, navigate, next_position, resolve_position, Navigation, NavigationContext,
};

use crate::types::{is_cell_disabled, CalculatedColumn, CellValue, Position, Row};

/// An open inline edit
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    pub position: Position,
    /// Working copy the editor writes to
    pub row: Row,
    /// Row as it was when editing began, for dirty checks
    pub original_row: Row,
    /// Key that opened the editor, `None` for double-click/Enter
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Select(Position),
    Edit(EditState),
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::Select(Position::SENTINEL)
    }
}

impl SelectionState {
    pub fn position(&self) -> Position {
        match self {
            Self::Select(p) => *p,
            Self::Edit(e) => e.position,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    pub fn edit(&self) -> Option<&EditState> {
        match self {
            Self::Edit(e) => Some(e),
            Self::Select(_) => None,
        }
    }
}

/// Working row to hand back to the host
#[derive(Debug, Clone, PartialEq)]
pub struct EditCommit {
    pub position: Position,
    pub row_idx: usize,
    pub row: Row,
    pub column_key: String,
}

/// Outcome of [`SelectionStateMachine::select_cell`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectTransition {
    /// Edit committed before moving
    pub commit: Option<EditCommit>,
    /// New position, `None` when the request was out of bounds
    pub selected: Option<Position>,
}

/// Outcome of [`SelectionStateMachine::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Indices went past the data; selection reset to the sentinel
    Reset,
    /// The edited row was replaced; the edit was dropped
    EditClosed,
}

/// Whether the cell at `position` can be opened for editing.
///
/// Requires an editor on the column, editability for the row and an
/// enabled cell.
pub fn is_cell_editable(columns: &[CalculatedColumn], rows: &[Row], position: Position) -> bool {
    let Some((col, row_idx)) = position.within(columns.len(), rows.len()) else {
        return false;
    };
    let (Some(column), Some(row)) = (columns.get(col), rows.get(row_idx)) else {
        return false;
    };
    column.is_editable(row) && !is_cell_disabled(row.get(&column.key))
}

#[derive(Debug, Clone, Default)]
pub struct SelectionStateMachine {
    state: SelectionState,
    /// Row the pointer last dragged over
    dragged_over_row: Option<usize>,
    /// Columns the pointer dragged over, in visit order
    dragged_over_cols: Vec<usize>,
    /// Column the current selection/fill started from
    anchor_col: Option<usize>,
}

impl SelectionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn position(&self) -> Position {
        self.state.position()
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    pub fn dragged_over_row(&self) -> Option<usize> {
        self.dragged_over_row
    }

    pub fn dragged_over_cols(&self) -> &[usize] {
        &self.dragged_over_cols
    }

    pub fn anchor_col(&self) -> Option<usize> {
        self.anchor_col
    }

    pub fn set_dragged_over_row(&mut self, row_idx: Option<usize>) {
        self.dragged_over_row = row_idx;
    }

    pub fn set_dragged_over_cols(&mut self, cols: Vec<usize>) {
        self.dragged_over_cols = cols;
    }

    /// Record a column entered during a drag, ignoring repeats.
    pub fn push_dragged_over_col(&mut self, col: usize) {
        if !self.dragged_over_cols.contains(&col) {
            self.dragged_over_cols.push(col);
        }
    }

    /// Most recently entered column
    pub fn last_dragged_over_col(&self) -> Option<usize> {
        self.dragged_over_cols.last().copied()
    }

    pub fn clear_drag(&mut self) {
        self.dragged_over_row = None;
        self.dragged_over_cols.clear();
    }

    /// Whether `(col, row_idx)` lies in the dragged-over rectangle.
    pub fn is_dragged_over(&self, col: usize, row_idx: usize) -> bool {
        let Some(over_row) = self.dragged_over_row else {
            return false;
        };
        let Some(anchor_row) = self.position().row() else {
            return false;
        };
        if !self.dragged_over_cols.contains(&col) {
            return false;
        }
        let (lo, hi) = (anchor_row.min(over_row), anchor_row.max(over_row));
        row_idx >= lo && row_idx <= hi
    }

    /// The working row if it differs from the original.
    ///
    /// Does not leave edit mode. The original is updated so the same
    /// change is not reported twice.
    pub fn commit_edit(&mut self, columns: &[CalculatedColumn]) -> Option<EditCommit> {
        let SelectionState::Edit(edit) = &mut self.state else {
            return None;
        };
        let column = edit.position.col().and_then(|c| columns.get(c))?;
        column.editor.as_ref()?;
        if edit.row == edit.original_row {
            return None;
        }
        let row_idx = edit.position.row()?;
        edit.original_row = edit.row.clone();
        log::debug!("commit edit at {:?}", edit.position);
        Some(EditCommit {
            position: edit.position,
            row_idx,
            row: edit.row.clone(),
            column_key: column.key.clone(),
        })
    }

    /// Move the selection, committing any open edit first.
    ///
    /// Out-of-bounds positions are ignored except the sentinel, which
    /// clears the selection. With `open_editor` an editable target opens
    /// in edit mode; otherwise it is selected and becomes the drag anchor.
    pub fn select_cell(
        &mut self,
        columns: &[CalculatedColumn],
        rows: &[Row],
        position: Position,
        open_editor: bool,
    ) -> SelectTransition {
        let in_bounds = position.within(columns.len(), rows.len());
        if in_bounds.is_none() && !position.is_sentinel() {
            return SelectTransition::default();
        }

        let commit = self.commit_edit(columns);
        self.clear_drag();

        let editable_row = in_bounds
            .filter(|_| open_editor && is_cell_editable(columns, rows, position))
            .and_then(|(_, row_idx)| rows.get(row_idx));

        if let Some(row) = editable_row {
            log::debug!("open editor at {position:?}");
            self.state = SelectionState::Edit(EditState {
                position,
                row: row.clone(),
                original_row: row.clone(),
                key: None,
            });
        } else {
            self.state = SelectionState::Select(position);
            self.anchor_col = position.col();
        }

        SelectTransition {
            commit,
            selected: Some(position),
        }
    }

    /// Leave edit mode without committing.
    pub fn close_editor(&mut self) {
        if let SelectionState::Edit(edit) = &self.state {
            log::debug!("close editor at {:?}", edit.position);
            self.state = SelectionState::Select(edit.position);
        }
    }

    /// Open the editor from a keystroke over the selected cell.
    ///
    /// The working cell is cleared so the editor can seed it with `key`.
    /// Returns false when the cell is not editable or the key is not input.
    pub fn open_editor_with_key(
        &mut self,
        columns: &[CalculatedColumn],
        rows: &[Row],
        input: &KeyInput,
    ) -> bool {
        let SelectionState::Select(position) = self.state else {
            return false;
        };
        if !input.is_default_input() || !is_cell_editable(columns, rows, position) {
            return false;
        }
        let Some((col, row_idx)) = position.within(columns.len(), rows.len()) else {
            return false;
        };
        let (Some(column), Some(row)) = (columns.get(col), rows.get(row_idx)) else {
            return false;
        };
        let cleared = match row.get(&column.key) {
            Some(cell) => cell.with_value(""),
            None => CellValue::Text(String::new()),
        };
        let mut working = row.clone();
        working.set(column.key.clone(), cleared);
        log::debug!("open editor at {position:?} with key {:?}", input.key);
        self.state = SelectionState::Edit(EditState {
            position,
            row: working,
            original_row: row.clone(),
            key: Some(input.key.clone()),
        });
        true
    }

    /// Replace the working row of the open edit.
    pub fn set_working_row(&mut self, row: Row) {
        if let SelectionState::Edit(edit) = &mut self.state {
            edit.row = row;
        }
    }

    /// Reconcile with data that may have shrunk or been replaced.
    pub fn validate(&mut self, column_count: usize, rows: &[Row]) -> Validation {
        let position = self.position();
        let stale = position.col().is_some_and(|c| c >= column_count)
            || position.row().is_some_and(|r| r >= rows.len());
        if stale {
            log::debug!("selection {position:?} out of range, resetting");
            self.state = SelectionState::Select(Position::SENTINEL);
            self.dragged_over_row = None;
            return Validation::Reset;
        }
        if let SelectionState::Edit(edit) = &self.state {
            let current = edit.position.row().and_then(|r| rows.get(r));
            if current != Some(&edit.original_row) {
                log::debug!(
                    "row under edit at {:?} changed, closing editor",
                    edit.position
                );
                self.state = SelectionState::Select(edit.position);
                return Validation::EditClosed;
            }
        }
        Validation::Valid
    }
}
