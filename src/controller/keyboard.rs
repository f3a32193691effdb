//! Keyboard handling, clipboard glue and the editor lifecycle.

use super::{GridController, KeyOutcome};
use crate::range::{copy, paste};
use crate::selection::{navigate, KeyInput, Navigation};
use crate::types::{PasteEvent, Position, Row, RowsChange};

impl GridController {
    /// Route a key press on the grid.
    pub fn handle_key_down(&mut self, input: &KeyInput) -> KeyOutcome {
        let in_bounds = self
            .selection
            .position()
            .within(self.layout.len(), self.rows.len())
            .is_some();

        // Clipboard shortcuts need a paste handler and a selected cell
        if self.callbacks.on_paste.is_some()
            && in_bounds
            && !self.selection.is_editing()
            && input.is_ctrl_held()
        {
            if input.is_shortcut('c') {
                self.copy_selection();
                return KeyOutcome::Handled;
            }
            if input.is_shortcut('v') {
                return KeyOutcome::PasteRequested;
            }
        }

        if input.key == "Escape" {
            self.copied = None;
            self.selection.close_editor();
            return KeyOutcome::Handled;
        }
        if input.is_navigation() {
            return self.navigate_key(input);
        }
        self.handle_cell_input(input)
    }

    fn navigate_key(&mut self, input: &KeyInput) -> KeyOutcome {
        if let Some(edit) = self.selection.state().edit() {
            let allowed = edit
                .position
                .col()
                .and_then(|c| self.layout.get(c))
                .and_then(|c| c.editor.as_ref())
                .is_some_and(|e| e.allows_navigation(&input.key));
            if !allowed {
                return KeyOutcome::Ignored;
            }
        }

        let current = self.selection.position();
        match navigate(&self.navigation_context(), current, input) {
            None => KeyOutcome::Ignored,
            Some(Navigation::ExitGrid) => {
                self.commit_open_edit();
                KeyOutcome::ExitGrid
            }
            Some(Navigation::MoveTo(next)) => {
                // Blocked moves land out of bounds and are dropped by select
                self.apply_select(next, false);
                KeyOutcome::Handled
            }
        }
    }

    fn handle_cell_input(&mut self, input: &KeyInput) -> KeyOutcome {
        if self
            .selection
            .position()
            .within(self.layout.len(), self.rows.len())
            .is_none()
        {
            return KeyOutcome::Ignored;
        }

        if self.selection.is_editing() {
            if input.key == "Enter" {
                self.commit_open_edit();
                self.selection.close_editor();
                return KeyOutcome::Handled;
            }
            // The editor handles its own keys
            return KeyOutcome::Ignored;
        }

        let consumed = self
            .selection
            .position()
            .col()
            .and_then(|c| self.layout.get(c))
            .and_then(|c| c.editor.as_ref())
            .is_some_and(|e| e.on_cell_key_down(input));
        if consumed {
            return KeyOutcome::Handled;
        }

        if input.is_ctrl_held() {
            return KeyOutcome::Ignored;
        }
        if self
            .selection
            .open_editor_with_key(&self.layout.columns, &self.rows, input)
        {
            KeyOutcome::Handled
        } else {
            KeyOutcome::Ignored
        }
    }

    // ========================================================================
    // Clipboard
    // ========================================================================

    /// Copy the selected range, record it for highlighting and write it to
    /// the system clipboard when one is attached. Returns the copied text.
    pub fn copy_selection(&mut self) -> Option<String> {
        let result = copy(
            &self.layout.columns,
            &self.rows,
            self.selection.position(),
            self.selection.dragged_over_row(),
        )?;
        self.copied = Some(result.range);
        if let Some(clipboard) = self.clipboard.as_mut() {
            if let Err(e) = clipboard.write_text(&result.text) {
                log::warn!("Failed to write to clipboard: {e}");
            }
        }
        Some(result.text)
    }

    /// Paste clipboard text at the selected cell.
    ///
    /// Requires both a paste and a rows-change handler. Returns whether a
    /// change was reported.
    pub fn paste_text(&mut self, text: &str) -> bool {
        if self.callbacks.on_paste.is_none() || self.callbacks.on_rows_change.is_none() {
            return false;
        }
        let position = self.selection.position();
        let Some(outcome) = paste(&self.layout.columns, &self.rows, position, text) else {
            return false;
        };

        let event = PasteEvent {
            source_column_key: self.copied.as_ref().map(|c| c.column_key.clone()),
            source_rows: self
                .copied
                .as_ref()
                .map(|c| c.rows.clone())
                .unwrap_or_default(),
            target_column_key: outcome.change.key.clone().unwrap_or_default(),
            target_rows: outcome
                .change
                .updated_target_rows
                .clone()
                .unwrap_or_default(),
        };
        self.emit_rows_change(outcome.change);
        if let Some(cb) = self.callbacks.on_paste.as_mut() {
            cb(&event);
        }

        // Mark the pasted block so it shows as dragged over
        self.selection.set_dragged_over_row(Some(outcome.end_row));
        if let Some(start_col) = position.col() {
            self.selection
                .set_dragged_over_cols((start_col..=outcome.end_col).collect());
        }
        self.copied = None;
        true
    }

    // ========================================================================
    // Selection and editor lifecycle
    // ========================================================================

    /// Select a cell, opening its editor when asked and possible.
    ///
    /// Any open edit is committed first. Returns false for out-of-bounds
    /// positions other than the sentinel.
    pub fn select_cell(&mut self, position: Position, open_editor: bool) -> bool {
        self.apply_select(position, open_editor)
    }

    /// Leave edit mode without committing.
    pub fn close_editor(&mut self) {
        self.selection.close_editor();
    }

    fn commit_open_edit(&mut self) {
        if let Some(commit) = self.selection.commit_edit(&self.layout.columns) {
            self.emit_commit(commit);
        }
    }

    /// The editor produced a new working row. With `commit` the edit is
    /// reported and the editor closes.
    pub fn editor_row_change(&mut self, row: Row, commit: bool) {
        if !self.selection.is_editing() {
            return;
        }
        self.selection.set_working_row(row);
        if commit {
            self.commit_open_edit();
            self.selection.close_editor();
        }
    }

    /// The editor's text changed; run it through the column's editor.
    pub fn editor_input(&mut self, text: &str) {
        let Some(edit) = self.selection.state().edit() else {
            return;
        };
        let Some(column) = edit.position.col().and_then(|c| self.layout.get(c)) else {
            return;
        };
        let Some(editor) = column.editor.as_ref() else {
            return;
        };
        let row = editor.apply(column, &edit.row, text);
        self.selection.set_working_row(row);
    }

    /// The editor lost focus or was dismissed.
    pub fn editor_close(&mut self, commit: bool) {
        if commit {
            self.commit_open_edit();
        }
        self.selection.close_editor();
    }

    /// A formatter changed a row directly (checkbox, toggle).
    pub fn formatter_row_change(&mut self, row_idx: usize, row: Row) {
        let mut new_rows = self.rows.clone();
        let Some(slot) = new_rows.get_mut(row_idx) else {
            return;
        };
        *slot = row;
        self.emit_rows_change(RowsChange::rows(new_rows));
    }
}
