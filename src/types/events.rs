//! Payloads reported to the host. The grid never mutates host rows; it
//! describes the replacement row set and lets the host apply it.

use serde::{Deserialize, Serialize};

use super::{CalculatedColumn, Position, Row};

/// Kind of bulk mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Paste,
    Fill,
}

/// Column reference carried in range events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetColumn {
    pub idx: usize,
    pub key: String,
}

impl From<&CalculatedColumn> for TargetColumn {
    fn from(column: &CalculatedColumn) -> Self {
        Self {
            idx: column.idx,
            key: column.key.clone(),
        }
    }
}

/// One row-mutation batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowsChange {
    /// The full row set with replacements applied
    pub new_rows: Vec<Row>,
    /// Cell that was edited, for editor commits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Key of the anchor column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_target_rows: Option<Vec<Row>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cols: Option<Vec<TargetColumn>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_rows: Option<Vec<Row>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeType>,
}

impl RowsChange {
    pub fn rows(new_rows: Vec<Row>) -> Self {
        Self {
            new_rows,
            ..Self::default()
        }
    }
}

/// Request for the host to compute fill values.
///
/// The host returns one replacement row per entry in `target_rows`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillEvent {
    pub column_key: String,
    pub source_row: Row,
    pub target_rows: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cols: Option<Vec<TargetColumn>>,
    pub across: bool,
}

/// Notification describing an applied paste
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasteEvent {
    /// Column of the copied range, if the paste came from an internal copy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_column_key: Option<String>,
    pub source_rows: Vec<Row>,
    pub target_column_key: String,
    pub target_rows: Vec<Row>,
}
