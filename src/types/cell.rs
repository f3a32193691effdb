use serde::{Deserialize, Serialize};

/// A single cell value as supplied by the host.
///
/// Hosts may store bare primitives or a structured [`CellData`] carrying
/// flags (disabled, error, alert, warning) and a column span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Structured cell with metadata
    Cell(CellData),
    /// Plain text
    Text(String),
    /// Plain number
    Number(f64),
    /// Plain boolean
    Bool(bool),
}

/// Structured cell payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    /// The cell's value as text
    pub value: String,
    /// Disabled cells cannot be selected for editing, pasted into or filled
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    /// Marks the cell as holding an invalid value
    #[serde(default, skip_serializing_if = "is_false")]
    pub error: bool,
    /// Alert message shown as a tooltip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    /// Warning message shown as a tooltip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Number of columns the cell occupies.
    /// `Some(0)` marks a continuation cell covered by a preceding span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<u32>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

impl CellData {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: u32) -> Self {
        self.span = Some(span);
        self
    }
}

impl CellValue {
    /// Text shown for the cell and written to the clipboard.
    pub fn display_value(&self) -> String {
        match self {
            Self::Cell(cell) => cell.value.clone(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Cell(cell) if cell.disabled)
    }

    /// Declared span; primitives always span one column.
    pub fn span(&self) -> Option<u32> {
        match self {
            Self::Cell(cell) => cell.span,
            _ => None,
        }
    }

    /// Span used for layout, 1 when unset.
    pub fn effective_span(&self) -> u32 {
        self.span().unwrap_or(1)
    }

    pub fn is_span_continuation(&self) -> bool {
        self.span() == Some(0)
    }

    pub fn as_data(&self) -> Option<&CellData> {
        match self {
            Self::Cell(cell) => Some(cell),
            _ => None,
        }
    }

    /// Replace the value while keeping structured flags intact.
    #[must_use]
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        match self {
            Self::Cell(cell) => Self::Cell(CellData {
                value: value.into(),
                ..cell.clone()
            }),
            _ => Self::Text(value.into()),
        }
    }
}

/// A missing cell is never disabled.
pub fn is_cell_disabled(cell: Option<&CellValue>) -> bool {
    cell.is_some_and(CellValue::is_disabled)
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<CellData> for CellValue {
    fn from(cell: CellData) -> Self {
        Self::Cell(cell)
    }
}
