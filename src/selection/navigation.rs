//! Pure keyboard navigation.
//!
//! Nothing here touches selection state: the same inputs always produce the
//! same candidate position, which the state machine then bounds-checks.

use super::KeyInput;
use crate::types::{CalculatedColumn, CellNavigationMode, Position, Row};

/// Everything navigation reads
#[derive(Debug, Clone, Copy)]
pub struct NavigationContext<'a> {
    pub columns: &'a [CalculatedColumn],
    pub rows: &'a [Row],
    pub cell_navigation_mode: CellNavigationMode,
    /// Whole rows visible in the body, the PageUp/PageDown step
    pub rows_per_page: i32,
}

/// Result of a navigation key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Candidate position, possibly out of bounds
    MoveTo(Position),
    /// Tab at the first/last cell: give focus back to the page
    ExitGrid,
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

impl NavigationContext<'_> {
    fn column_count(&self) -> i32 {
        to_i32(self.columns.len())
    }

    fn row_count(&self) -> i32 {
        to_i32(self.rows.len())
    }

    fn column(&self, idx: i32) -> Option<&CalculatedColumn> {
        usize::try_from(idx).ok().and_then(|i| self.columns.get(i))
    }

    fn row(&self, row_idx: i32) -> Option<&Row> {
        usize::try_from(row_idx).ok().and_then(|i| self.rows.get(i))
    }

    /// Arrow keys only step onto columns flagged editable for the row.
    fn can_step_onto(&self, idx: i32, row: Option<&Row>) -> bool {
        let Some(column) = self.column(idx) else {
            return false;
        };
        let flagged = match (&column.editable_when, row) {
            (Some(predicate), Some(row)) => predicate.test(row),
            (Some(_), None) => false,
            (None, _) => column.editable == Some(true),
        };
        let disabled = row
            .and_then(|r| r.get(&column.key))
            .is_some_and(|cell| cell.is_disabled());
        flagged && !disabled
    }

    /// Columns covered by the cell at `position`, 1 unless it spans.
    fn span_at(&self, position: Position) -> i32 {
        let span = self
            .column(position.idx)
            .zip(self.row(position.row_idx))
            .and_then(|(column, row)| row.get(&column.key))
            .map_or(1, |cell| cell.effective_span());
        i32::try_from(span).unwrap_or(1).max(1)
    }
}

/// Candidate position for a navigation key, before mode resolution.
///
/// `ctrl` is the resolved Ctrl/Cmd state. Unknown keys return `current`.
pub fn next_position(
    ctx: &NavigationContext<'_>,
    current: Position,
    key: &str,
    ctrl: bool,
    shift: bool,
) -> Position {
    let Position { idx, row_idx } = current;
    let row = ctx.row(row_idx);
    let is_row_selected = idx == -1 && row.is_some();
    let last_col = ctx.column_count() - 1;
    let last_row = ctx.row_count() - 1;

    match key {
        "ArrowUp" => current.with_row(row_idx - 1),
        "ArrowDown" => current.with_row(row_idx + 1),
        "ArrowLeft" => {
            if ctx.can_step_onto(idx - 1, row) {
                current.with_idx(idx - 1)
            } else {
                current
            }
        }
        "ArrowRight" => {
            let next = idx + ctx.span_at(current);
            if ctx.can_step_onto(next, row) {
                current.with_idx(next)
            } else {
                current
            }
        }
        "Tab" => {
            if current.is_sentinel() {
                if shift {
                    Position::new(last_col, last_row)
                } else {
                    Position::new(0, 0)
                }
            } else if shift {
                current.with_idx(idx - 1)
            } else {
                current.with_idx(idx + ctx.span_at(current))
            }
        }
        "Home" => {
            if is_row_selected {
                current.with_row(0)
            } else if ctrl {
                Position::new(0, 0)
            } else {
                current.with_idx(0)
            }
        }
        "End" => {
            if is_row_selected {
                current.with_row(last_row)
            } else if ctrl {
                Position::new(last_col, last_row)
            } else {
                current.with_idx(last_col)
            }
        }
        "PageUp" => current.with_row(row_idx - ctx.rows_per_page),
        "PageDown" => current.with_row(row_idx + ctx.rows_per_page),
        _ => current,
    }
}

/// Apply the navigation-mode policy and span correction to a candidate.
///
/// A position one past either column edge wraps per `mode`; under `None`,
/// or at the first/last row under `ChangeRow`, it is returned unresolved
/// and the caller's bounds check blocks the move. A continuation cell
/// (`span == 0`) redirects to the nearest spanning cell on its left.
pub fn resolve_position(
    ctx: &NavigationContext<'_>,
    next: Position,
    mode: CellNavigationMode,
) -> Position {
    let column_count = ctx.column_count();
    let Position { idx, row_idx } = next;

    if mode != CellNavigationMode::None {
        if idx == column_count {
            match mode {
                CellNavigationMode::ChangeRow if row_idx != ctx.row_count() - 1 => {
                    return Position::new(0, row_idx + 1);
                }
                CellNavigationMode::LoopOverRow => return Position::new(0, row_idx),
                _ => {}
            }
        } else if idx == -1 {
            match mode {
                CellNavigationMode::ChangeRow if row_idx != 0 => {
                    return Position::new(column_count - 1, row_idx - 1);
                }
                CellNavigationMode::LoopOverRow => return Position::new(column_count - 1, row_idx),
                _ => {}
            }
        }
    }

    let (Some(column), Some(row)) = (ctx.column(idx), ctx.row(row_idx)) else {
        return next;
    };
    if !row.get(&column.key).is_some_and(|cell| cell.is_span_continuation()) {
        return next;
    }
    let owner = ctx
        .columns
        .iter()
        .take(column.idx)
        .rev()
        .find(|c| {
            row.get(&c.key)
                .is_some_and(|cell| cell.effective_span() > 1)
        });
    match owner {
        Some(c) => next.with_idx(to_i32(c.idx)),
        None => next,
    }
}

/// Whether Tab from `current` should leave the grid instead of moving.
pub fn can_exit_grid(ctx: &NavigationContext<'_>, current: Position, shift: bool) -> bool {
    match ctx.cell_navigation_mode {
        CellNavigationMode::None | CellNavigationMode::ChangeRow => {
            if shift {
                current.idx == 0 && current.row_idx == 0
            } else {
                current.idx == ctx.column_count() - 1 && current.row_idx == ctx.row_count() - 1
            }
        }
        CellNavigationMode::LoopOverRow => false,
    }
}

/// Map a navigation key to its outcome. `None` for keys that do not navigate.
///
/// Tab always wraps rows: `None` mode is upgraded to `ChangeRow` for it.
pub fn navigate(
    ctx: &NavigationContext<'_>,
    current: Position,
    input: &KeyInput,
) -> Option<Navigation> {
    if !input.is_navigation() {
        return None;
    }
    let ctrl = input.is_ctrl_held();
    let shift = input.shift_key;
    let mut mode = ctx.cell_navigation_mode;

    if input.key == "Tab" {
        if can_exit_grid(ctx, current, shift) {
            return Some(Navigation::ExitGrid);
        }
        if mode == CellNavigationMode::None {
            mode = CellNavigationMode::ChangeRow;
        }
    }

    let next = next_position(ctx, current, &input.key, ctrl, shift);
    Some(Navigation::MoveTo(resolve_position(ctx, next, mode)))
}
