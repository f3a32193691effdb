//! Range operations: copy, paste and fill.
//!
//! Every operation reads the current rows and returns a [`RowsChange`]
//! describing the full replacement row set. Row storage belongs to the
//! host, so nothing here mutates the input slice.
//!
//! [`RowsChange`]: crate::types::RowsChange

mod copy;
mod fill;
mod paste;

pub use copy::{copy, escape_cell_value, CopyResult};
pub use fill::{fill_drag, fill_to_end, FillDrag};
pub use paste::{parse_clipboard_text, paste, PasteOutcome};

use crate::types::Row;

/// Copy of `rows` with `updated` written over the block starting at `start`.
///
/// A fill callback that returns fewer rows than requested leaves the
/// remaining targets unchanged.
fn splice_rows(rows: &[Row], start: usize, expected: usize, updated: &[Row]) -> Vec<Row> {
    if updated.len() < expected {
        log::warn!(
            "fill callback returned {} rows for {expected} targets",
            updated.len()
        );
    }
    let mut new_rows = rows.to_vec();
    for (slot, row) in new_rows
        .iter_mut()
        .skip(start)
        .take(expected)
        .zip(updated.iter())
    {
        *slot = row.clone();
    }
    new_rows
}
