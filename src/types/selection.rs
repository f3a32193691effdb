use serde::{Deserialize, Serialize};

use super::Row;

/// Column/row index pair.
///
/// `-1` is meaningful: `{idx: -1, row_idx: -1}` is the "nothing selected"
/// sentinel and `idx == -1` on a valid row means the whole row is selected.
/// Candidate positions produced by navigation may fall outside the grid;
/// they are bounds-checked before being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub idx: i32,
    pub row_idx: i32,
}

impl Default for Position {
    fn default() -> Self {
        Self::SENTINEL
    }
}

impl Position {
    /// No cell selected
    pub const SENTINEL: Self = Self {
        idx: -1,
        row_idx: -1,
    };

    pub const fn new(idx: i32, row_idx: i32) -> Self {
        Self { idx, row_idx }
    }

    /// Build from in-range indices; saturates on absurdly large grids.
    pub fn at(idx: usize, row_idx: usize) -> Self {
        Self {
            idx: i32::try_from(idx).unwrap_or(i32::MAX),
            row_idx: i32::try_from(row_idx).unwrap_or(i32::MAX),
        }
    }

    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    /// Column index, if non-negative
    pub fn col(self) -> Option<usize> {
        usize::try_from(self.idx).ok()
    }

    /// Row index, if non-negative
    pub fn row(self) -> Option<usize> {
        usize::try_from(self.row_idx).ok()
    }

    /// Both indices as `(col, row)` when the position lies inside a
    /// `column_count` x `row_count` grid.
    pub fn within(self, column_count: usize, row_count: usize) -> Option<(usize, usize)> {
        let col = self.col().filter(|&c| c < column_count)?;
        let row = self.row().filter(|&r| r < row_count)?;
        Some((col, row))
    }

    #[must_use]
    pub fn with_idx(self, idx: i32) -> Self {
        Self { idx, ..self }
    }

    #[must_use]
    pub fn with_row(self, row_idx: i32) -> Self {
        Self { row_idx, ..self }
    }
}

/// Policy for keyboard moves that leave the current row horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellNavigationMode {
    /// Out-of-row moves are blocked
    #[default]
    None,
    /// Wrap to the next/previous row
    ChangeRow,
    /// Wrap within the same row
    LoopOverRow,
}

/// Rows and the single column currently marked as copied
#[derive(Debug, Clone, PartialEq)]
pub struct CopiedRange {
    pub rows: Vec<Row>,
    pub column_key: String,
}
