//! Host-facing inputs and outputs of the controller.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Result;
use crate::types::{FillEvent, PasteEvent, Position, Row, RowsChange, SortDirection};

/// Optional host callbacks. Unset callbacks disable the matching feature
/// where noted.
#[derive(Default)]
pub struct GridCallbacks {
    /// Replacement row set after an edit, paste or fill
    pub on_rows_change: Option<Box<dyn FnMut(RowsChange)>>,
    /// Computes fill values; enables the fill handle
    pub on_fill: Option<Box<dyn FnMut(&FillEvent) -> Vec<Row>>>,
    /// Notified after a paste; enables Ctrl+C / Ctrl+V
    pub on_paste: Option<Box<dyn FnMut(&PasteEvent)>>,
    pub on_column_resize: Option<Box<dyn FnMut(usize, f32)>>,
    /// Enables row selection together with a selected-rows set
    pub on_selected_rows_change: Option<Box<dyn FnMut(&HashSet<String>)>>,
    pub on_selected_cell_change: Option<Box<dyn FnMut(Position)>>,
    pub on_sort: Option<Box<dyn FnMut(&str, SortDirection)>>,
    /// `(scroll_top, scroll_left)` after every host scroll event
    pub on_scroll: Option<Box<dyn FnMut(f32, f32)>>,
}

/// System clipboard writer. Reads are asynchronous and stay with the host.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// How the host should react to a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyOutcome {
    /// Consumed; prevent the browser default
    Handled,
    /// Not for the grid; let it through
    Ignored,
    /// Tab out of the grid; let focus move on
    ExitGrid,
    /// Read the clipboard and call `paste_text`
    PasteRequested,
}

/// Scroll the host should apply to the grid element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    pub smooth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// A pointer event as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointerInput {
    pub pointer_id: i32,
    pub pointer_type: PointerType,
    /// `MouseEvent.buttons` bit mask; 1 is the primary button
    pub buttons: u16,
    pub client_x: f32,
}

impl PointerInput {
    /// Primary-button mouse press
    pub fn primary(pointer_id: i32, client_x: f32) -> Self {
        Self {
            pointer_id,
            pointer_type: PointerType::Mouse,
            buttons: 1,
            client_x,
        }
    }

    #[must_use]
    pub fn with_buttons(mut self, buttons: u16) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn is_primary_only(&self) -> bool {
        self.buttons == 1
    }

    /// Mice must hold the primary button; pens and touches always count.
    pub fn is_pressed(&self) -> bool {
        self.pointer_type != PointerType::Mouse || self.buttons == 1
    }
}
