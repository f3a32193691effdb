use serde::Serialize;
use std::fmt;
use std::rc::Rc;

use crate::types::{CalculatedColumn, SortDirection};

/// What a header cell displays
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HeaderContent {
    Label {
        text: String,
        /// Arrow for the active sort direction, empty when unsorted
        sort_glyph: String,
    },
    Checkbox { checked: bool },
}

/// Grid-level state handed to header renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderContext {
    /// Direction if this column is the sort column
    pub sort_direction: Option<SortDirection>,
    pub all_rows_selected: bool,
}

/// Custom header presentation.
pub trait HeaderCellRenderer {
    fn render(&self, column: &CalculatedColumn, ctx: &HeaderContext) -> HeaderContent;
}

/// Header renderer chosen for a column
#[derive(Clone, Default)]
pub enum HeaderRenderer {
    /// Column name plus sort arrow
    #[default]
    Default,
    /// Select-all checkbox
    SelectAll,
    Custom(Rc<dyn HeaderCellRenderer>),
}

impl HeaderRenderer {
    pub fn custom(renderer: impl HeaderCellRenderer + 'static) -> Self {
        Self::Custom(Rc::new(renderer))
    }

    pub fn render(&self, column: &CalculatedColumn, ctx: &HeaderContext) -> HeaderContent {
        match self {
            Self::Default => HeaderContent::Label {
                text: column.name.clone(),
                sort_glyph: ctx
                    .sort_direction
                    .map(|d| d.glyph().to_string())
                    .unwrap_or_default(),
            },
            Self::SelectAll => HeaderContent::Checkbox {
                checked: ctx.all_rows_selected,
            },
            Self::Custom(r) => r.render(column, ctx),
        }
    }
}

impl fmt::Debug for HeaderRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::SelectAll => f.write_str("SelectAll"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
