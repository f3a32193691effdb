//! Layout engine for virtualized grids.
//!
//! This module handles:
//! - Resolving column widths, order and left offsets
//! - The horizontal column window for a scroll offset
//! - The vertical row window with batch-aligned overscan
//! - Viewport state (scroll position, container size)

mod columns;
mod rows;
mod viewport;

pub use columns::{clamp_column_width, ColumnLayout, ColumnWindow, DEFAULT_MIN_COLUMN_WIDTH};
pub use rows::{RowWindow, RENDER_BATCH_SIZE, ROW_OVERSCAN};
pub use viewport::Viewport;

/// Floor a non-negative pixel ratio to an index. Negative and NaN map to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_index(value: f32) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.floor() as usize
    }
}
