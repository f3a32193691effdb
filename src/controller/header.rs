//! Header interactions: sorting and row selection.

use std::collections::HashSet;

use super::GridController;
use crate::error::{Result, XlgridError};
use crate::types::{RowKeyGetter, SortDirection};

impl GridController {
    /// Current sort direction shown by column `key`
    pub fn sort_direction_of(&self, key: &str) -> SortDirection {
        match &self.sort_column {
            Some(sorted) if sorted == key => self.sort_direction,
            _ => SortDirection::None,
        }
    }

    /// Click on the label of header cell `idx`.
    ///
    /// Sortable columns report the next direction in their cycle. The
    /// host applies it with `set_sort`.
    pub fn header_click(&mut self, idx: usize) -> Result<()> {
        let column = self
            .layout
            .get(idx)
            .ok_or(XlgridError::ColumnOutOfRange(idx))?;
        if !column.sortable {
            return Ok(());
        }
        let key = column.key.clone();
        let direction = self
            .sort_direction_of(&key)
            .next(column.sort_descending_first);
        if let Some(cb) = self.callbacks.on_sort.as_mut() {
            log::debug!("sort {key} {direction:?}");
            cb(&key, direction);
        }
        Ok(())
    }

    fn require_row_key_getter(&self) -> Result<RowKeyGetter> {
        self.row_key_getter
            .clone()
            .ok_or(XlgridError::MissingRowKeyGetter)
    }

    /// Check or uncheck row `row_idx`.
    ///
    /// A shift-click also checks every row between the previously checked
    /// row and this one. Unchecking resets that anchor. Does nothing
    /// without a selected-rows handler.
    pub fn select_row(&mut self, row_idx: usize, checked: bool, shift: bool) -> Result<()> {
        if self.callbacks.on_selected_rows_change.is_none() {
            return Ok(());
        }
        let getter = self.require_row_key_getter()?;
        let Some(row) = self.rows.get(row_idx) else {
            return Ok(());
        };

        let mut selected: HashSet<String> = self.selected_rows.clone().unwrap_or_default();
        let key = getter.key_of(row);
        if checked {
            selected.insert(key);
            let previous = self.last_selected_row.replace(row_idx);
            if let Some(previous) = previous.filter(|&p| shift && p != row_idx) {
                let between = if previous < row_idx {
                    previous + 1..row_idx
                } else {
                    row_idx + 1..previous
                };
                for row in self.rows.get(between).unwrap_or_default() {
                    selected.insert(getter.key_of(row));
                }
            }
        } else {
            selected.remove(&key);
            self.last_selected_row = None;
        }

        if let Some(cb) = self.callbacks.on_selected_rows_change.as_mut() {
            cb(&selected);
        }
        Ok(())
    }

    /// Check or uncheck every row (select-all checkbox).
    pub fn select_all_rows(&mut self, checked: bool) -> Result<()> {
        if self.callbacks.on_selected_rows_change.is_none() {
            return Ok(());
        }
        let getter = self.require_row_key_getter()?;
        let selected: HashSet<String> = if checked {
            self.rows.iter().map(|r| getter.key_of(r)).collect()
        } else {
            HashSet::new()
        };
        if let Some(cb) = self.callbacks.on_selected_rows_change.as_mut() {
            cb(&selected);
        }
        Ok(())
    }

    /// Whether every row is in the selected set
    pub(crate) fn all_rows_selected(&self) -> bool {
        self.selected_rows
            .as_ref()
            .is_some_and(|s| !self.rows.is_empty() && s.len() == self.rows.len())
    }

    pub(crate) fn is_row_selected(&self, row_idx: usize) -> bool {
        let (Some(selected), Some(row)) = (self.selected_rows.as_ref(), self.rows.get(row_idx))
        else {
            return false;
        };
        self.row_key(row).is_some_and(|k| selected.contains(&k))
    }
}
