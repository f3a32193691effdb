//! Render output: everything the host needs to paint one frame.

use serde::Serialize;

use super::{CellContent, HeaderContent};
use crate::types::Position;

/// The visible part of the grid after one controller pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSnapshot {
    /// Header row + body rows + summary rows
    pub aria_row_count: usize,
    pub aria_col_count: usize,
    pub aria_multiselectable: bool,
    pub total_column_width: f32,
    pub total_frozen_column_width: f32,
    /// Content height of the body, used for the scroll area
    pub total_row_height: f32,
    pub row_height: f32,
    pub header_row_height: f32,
    /// Right-pinned columns drop their shadow once the grid is scrolled fully right
    pub scrolled_to_end: bool,
    pub col_overscan_start: usize,
    pub col_overscan_end: usize,
    pub row_overscan_start: usize,
    pub row_overscan_end: usize,
    pub headers: Vec<HeaderCellSnapshot>,
    pub rows: Vec<RowSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<EditorSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCellSnapshot {
    pub idx: usize,
    pub key: String,
    /// Left edge relative to the visible area
    pub left: f32,
    pub width: f32,
    pub content: HeaderContent,
    pub aria_col_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_sort: Option<String>,
    pub sortable: bool,
    pub resizable: bool,
    pub frozen: bool,
    pub is_last_frozen_column: bool,
    pub pinned_right: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSnapshot {
    pub row_idx: usize,
    /// Top edge in body coordinates
    pub top: f32,
    /// 1-based; the header row is 1
    pub aria_row_index: usize,
    /// Set only when row selection is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_selected: Option<bool>,
    pub is_row_selected: bool,
    pub cells: Vec<CellSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSnapshot {
    pub idx: usize,
    pub key: String,
    pub left: f32,
    /// Width including spanned columns
    pub width: f32,
    pub content: CellContent,
    pub aria_col_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_col_span: Option<u32>,
    pub is_selected: bool,
    pub is_editing: bool,
    pub is_copied: bool,
    pub is_dragged_over: bool,
    pub is_disabled: bool,
    pub has_drag_handle: bool,
    pub frozen: bool,
    pub is_last_frozen_column: bool,
    pub pinned_right: bool,
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Placement and seed text of the open editor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub position: Position,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}
