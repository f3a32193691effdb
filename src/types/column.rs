use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use super::Row;
use crate::render::{Editor, Formatter, HeaderRenderer};

/// Key of the reserved row-selection checkbox column. Always laid out first.
pub const SELECT_COLUMN_KEY: &str = "select-row";

/// Width of the row-selection checkbox column in pixels
pub const SELECT_COLUMN_WIDTH: f32 = 35.0;

/// Requested width for a column
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawWidth", into = "RawWidth")]
pub enum ColumnWidth {
    /// Fixed width in pixels
    Px(f32),
    /// Percentage of the viewport width (`"25%"`)
    Percent(u32),
    /// Share the remaining width with other auto columns
    #[default]
    Auto,
}

/// Wire form of [`ColumnWidth`]: a number, a `"<digits>%"` string, or absent.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawWidth {
    Number(f32),
    Text(String),
    Unset(()),
}

impl From<RawWidth> for ColumnWidth {
    fn from(raw: RawWidth) -> Self {
        match raw {
            RawWidth::Number(px) => Self::Px(px),
            RawWidth::Text(s) => Self::parse(&s),
            RawWidth::Unset(()) => Self::Auto,
        }
    }
}

impl From<ColumnWidth> for RawWidth {
    fn from(width: ColumnWidth) -> Self {
        match width {
            ColumnWidth::Px(px) => Self::Number(px),
            ColumnWidth::Percent(p) => Self::Text(format!("{p}%")),
            ColumnWidth::Auto => Self::Unset(()),
        }
    }
}

impl ColumnWidth {
    /// Parse a textual width. Only `^\d+%$` is recognised; anything else is auto.
    pub fn parse(s: &str) -> Self {
        let Some(digits) = s.strip_suffix('%') else {
            return Self::Auto;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Auto;
        }
        digits.parse().map_or(Self::Auto, Self::Percent)
    }
}

/// Side a frozen column is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrozenAlignment {
    Left,
    Right,
}

/// Horizontal text alignment inside cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellAlignment {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    None,
}

impl SortDirection {
    /// Direction after clicking a sortable header currently showing `self`.
    pub fn next(self, sort_descending_first: bool) -> Self {
        match (self, sort_descending_first) {
            (Self::Asc, false) => Self::Desc,
            (Self::Asc, true) => Self::None,
            (Self::Desc, false) => Self::None,
            (Self::Desc, true) => Self::Asc,
            (Self::None, false) => Self::Asc,
            (Self::None, true) => Self::Desc,
        }
    }

    pub fn aria_sort(self) -> &'static str {
        match self {
            Self::Asc => "ascending",
            Self::Desc => "descending",
            Self::None => "none",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Asc => "\u{25B2}",
            Self::Desc => "\u{25BC}",
            Self::None => "",
        }
    }
}

/// Per-row editability predicate
#[derive(Clone)]
pub struct RowPredicate(Rc<dyn Fn(&Row) -> bool>);

impl RowPredicate {
    pub fn new(f: impl Fn(&Row) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn test(&self, row: &Row) -> bool {
        (self.0)(row)
    }
}

impl fmt::Debug for RowPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RowPredicate(..)")
    }
}

/// Transforms pasted text before it is assigned to a cell
#[derive(Clone)]
pub struct ValueFormatFn(Rc<dyn Fn(&str) -> String>);

impl ValueFormatFn {
    pub fn new(f: impl Fn(&str) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn apply(&self, value: &str) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for ValueFormatFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormatFn(..)")
    }
}

/// User-supplied description of one column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnSpec {
    /// Unique, stable identity
    pub key: String,
    /// Header label
    pub name: String,
    pub width: ColumnWidth,
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub alignment: CellAlignment,
    pub frozen: bool,
    pub frozen_alignment: Option<FrozenAlignment>,
    pub resizable: Option<bool>,
    pub sortable: Option<bool>,
    /// First click sorts descending instead of ascending
    pub sort_descending_first: bool,
    /// `Some(true)` enables the default text editor when no editor is set;
    /// `Some(false)` disables editing even if an editor is set.
    pub editable: Option<bool>,
    /// Open the editor on a single click instead of a double click
    pub edit_on_click: bool,
    #[serde(skip)]
    pub editable_when: Option<RowPredicate>,
    #[serde(skip)]
    pub formatter: Option<Formatter>,
    #[serde(skip)]
    pub editor: Option<Editor>,
    #[serde(skip)]
    pub header_renderer: Option<HeaderRenderer>,
    #[serde(skip)]
    pub format_value: Option<ValueFormatFn>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// The reserved row-selection checkbox column.
    pub fn select_column() -> Self {
        Self {
            key: SELECT_COLUMN_KEY.to_string(),
            name: String::new(),
            width: ColumnWidth::Px(SELECT_COLUMN_WIDTH),
            max_width: Some(SELECT_COLUMN_WIDTH),
            resizable: Some(false),
            sortable: Some(false),
            frozen: true,
            formatter: Some(Formatter::SelectRow),
            header_renderer: Some(HeaderRenderer::SelectAll),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn min_width(mut self, px: f32) -> Self {
        self.min_width = Some(px);
        self
    }

    #[must_use]
    pub fn max_width(mut self, px: f32) -> Self {
        self.max_width = Some(px);
        self
    }

    #[must_use]
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    #[must_use]
    pub fn pinned_right(mut self) -> Self {
        self.frozen = true;
        self.frozen_alignment = Some(FrozenAlignment::Right);
        self
    }

    #[must_use]
    pub fn editable(mut self) -> Self {
        self.editable = Some(true);
        self
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = Some(true);
        self
    }

    #[must_use]
    pub fn resizable(mut self) -> Self {
        self.resizable = Some(true);
        self
    }

    #[must_use]
    pub fn edit_on_click(mut self) -> Self {
        self.edit_on_click = true;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_editor(mut self, editor: Editor) -> Self {
        self.editor = Some(editor);
        self
    }

    #[must_use]
    pub fn with_format_value(mut self, f: ValueFormatFn) -> Self {
        self.format_value = Some(f);
        self
    }
}

/// Grid-wide defaults applied to columns that leave an option unset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultColumnOptions {
    pub min_width: Option<f32>,
    pub sortable: Option<bool>,
    pub resizable: Option<bool>,
    #[serde(skip)]
    pub formatter: Option<Formatter>,
}

/// A column after layout: resolved width, left offset, and defaults applied.
///
/// Rebuilt from the [`ColumnSpec`]s on every layout pass, never mutated.
#[derive(Debug, Clone)]
pub struct CalculatedColumn {
    pub key: String,
    pub name: String,
    /// Position after the select-column reordering
    pub idx: usize,
    pub width: f32,
    /// Left offset in grid coordinates. Right-pinned columns do not advance it.
    pub left: f32,
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub alignment: CellAlignment,
    pub frozen: bool,
    pub frozen_alignment: Option<FrozenAlignment>,
    pub is_last_frozen_column: bool,
    pub sortable: bool,
    pub sort_descending_first: bool,
    pub resizable: bool,
    pub edit_on_click: bool,
    pub editable: Option<bool>,
    pub editable_when: Option<RowPredicate>,
    pub formatter: Formatter,
    pub editor: Option<Editor>,
    pub header_renderer: Option<HeaderRenderer>,
    pub format_value: Option<ValueFormatFn>,
}

impl CalculatedColumn {
    pub fn is_pinned_right(&self) -> bool {
        self.frozen_alignment == Some(FrozenAlignment::Right)
    }

    /// Whether cells of this column can be edited for `row`.
    pub fn is_editable(&self, row: &Row) -> bool {
        if self.editor.is_none() {
            return false;
        }
        match &self.editable_when {
            Some(predicate) => predicate.test(row),
            None => self.editable != Some(false),
        }
    }

    /// Left position relative to the grid's visible area.
    pub fn screen_left(&self, scroll_left: f32, viewport_width: f32) -> f32 {
        if self.is_pinned_right() {
            viewport_width - self.width
        } else if self.frozen {
            self.left
        } else {
            self.left - scroll_left
        }
    }
}
