use serde::Serialize;
use std::fmt;
use std::rc::Rc;

use crate::types::{CalculatedColumn, Row};

/// What a body cell displays
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CellContent {
    Text { text: String },
    Checkbox { checked: bool },
}

impl CellContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Per-cell state handed to formatters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterContext {
    pub row_idx: usize,
    pub is_row_selected: bool,
    pub is_cell_selected: bool,
}

/// Custom cell presentation.
pub trait CellFormatter {
    fn format(&self, column: &CalculatedColumn, row: &Row, ctx: &FormatterContext) -> CellContent;
}

/// Formatter chosen for a column
#[derive(Clone, Default)]
pub enum Formatter {
    /// Display value of the cell at the column key
    #[default]
    Value,
    /// Row-selection checkbox
    SelectRow,
    Custom(Rc<dyn CellFormatter>),
}

impl Formatter {
    pub fn custom(formatter: impl CellFormatter + 'static) -> Self {
        Self::Custom(Rc::new(formatter))
    }

    pub fn format(
        &self,
        column: &CalculatedColumn,
        row: &Row,
        ctx: &FormatterContext,
    ) -> CellContent {
        match self {
            Self::Value => CellContent::text(
                row.get(&column.key)
                    .map(|cell| cell.display_value())
                    .unwrap_or_default(),
            ),
            Self::SelectRow => CellContent::Checkbox {
                checked: ctx.is_row_selected,
            },
            Self::Custom(f) => f.format(column, row, ctx),
        }
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => f.write_str("Value"),
            Self::SelectRow => f.write_str("SelectRow"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
