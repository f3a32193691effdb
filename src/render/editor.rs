use std::fmt;
use std::rc::Rc;

use crate::selection::KeyInput;
use crate::types::{CalculatedColumn, Row};

/// Inline cell editor.
///
/// An editor works on a copy of the row. The grid seeds it, feeds it text
/// and asks it whether keyboard navigation may leave the cell.
pub trait CellEditor {
    /// Text shown when the editor opens. `key` is the keystroke that opened it.
    fn initial_text(&self, column: &CalculatedColumn, row: &Row, key: Option<&str>) -> String {
        match key {
            Some(k) if k.chars().count() == 1 => k.to_string(),
            _ => row
                .get(&column.key)
                .map(|cell| cell.display_value())
                .unwrap_or_default(),
        }
    }

    /// Working row after the user typed `text`.
    fn apply(&self, column: &CalculatedColumn, row: &Row, text: &str) -> Row {
        row.with_cell_value(&column.key, text)
    }

    /// Whether `key` may move the selection while this editor is open.
    fn allows_navigation(&self, key: &str) -> bool {
        key == "Tab"
    }

    /// Sees a key pressed over the selected, closed cell before the grid
    /// acts on it. Returning true consumes the key so the editor does not
    /// open.
    fn on_cell_key_down(&self, _input: &KeyInput) -> bool {
        false
    }
}

/// The built-in single-line text editor
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEditor;

impl CellEditor for TextEditor {}

/// Editor chosen for a column
#[derive(Clone)]
pub enum Editor {
    Text,
    Custom(Rc<dyn CellEditor>),
}

impl Editor {
    pub fn custom(editor: impl CellEditor + 'static) -> Self {
        Self::Custom(Rc::new(editor))
    }

    fn inner(&self) -> &dyn CellEditor {
        match self {
            Self::Text => &TextEditor,
            Self::Custom(e) => e.as_ref(),
        }
    }

    pub fn initial_text(&self, column: &CalculatedColumn, row: &Row, key: Option<&str>) -> String {
        self.inner().initial_text(column, row, key)
    }

    pub fn apply(&self, column: &CalculatedColumn, row: &Row, text: &str) -> Row {
        self.inner().apply(column, row, text)
    }

    pub fn allows_navigation(&self, key: &str) -> bool {
        self.inner().allows_navigation(key)
    }

    pub fn on_cell_key_down(&self, input: &KeyInput) -> bool {
        self.inner().on_cell_key_down(input)
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("Text"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
