use super::splice_rows;
use crate::types::{
    CalculatedColumn, ChangeType, FillEvent, Position, Row, RowsChange, TargetColumn,
};

/// Where a fill-handle drag started and ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillDrag {
    /// Selected cell the drag started from
    pub position: Position,
    /// Column the selection was anchored on
    pub anchor_col: usize,
    pub over_row: usize,
    pub over_col: usize,
}

/// Resolve a fill-handle release into one mutation batch.
///
/// Releasing in another column fills across: the columns from the anchor
/// (exclusive) to the release column (inclusive), over every row between
/// the anchor row and the release row. Releasing in the anchor column fills
/// down or up, excluding the anchor row. `on_fill` computes the values.
pub fn fill_drag(
    columns: &[CalculatedColumn],
    rows: &[Row],
    drag: FillDrag,
    on_fill: &mut dyn FnMut(&FillEvent) -> Vec<Row>,
) -> Option<RowsChange> {
    let (col, row_idx) = drag.position.within(columns.len(), rows.len())?;
    let column = columns.get(col)?;
    let source_row = rows.get(row_idx)?.clone();
    let over_row = drag.over_row.min(rows.len() - 1);

    if drag.over_col != drag.anchor_col {
        let over_col = drag.over_col.min(columns.len() - 1);
        let (lo, hi) = (row_idx.min(over_row), row_idx.max(over_row));
        let target_rows = rows.get(lo..=hi)?.to_vec();
        let target_cols: Vec<TargetColumn> = columns
            .iter()
            .filter(|c| {
                if over_col > drag.anchor_col {
                    c.idx > drag.anchor_col && c.idx <= over_col
                } else {
                    c.idx >= over_col && c.idx < drag.anchor_col
                }
            })
            .map(TargetColumn::from)
            .collect();
        if target_cols.is_empty() {
            return None;
        }

        log::debug!(
            "fill across rows {lo}..={hi}, {} columns",
            target_cols.len()
        );
        let updated = on_fill(&FillEvent {
            column_key: column.key.clone(),
            source_row,
            target_rows: target_rows.clone(),
            target_cols: Some(target_cols.clone()),
            across: true,
        });
        let new_rows = splice_rows(rows, lo, target_rows.len(), &updated);
        return Some(RowsChange {
            new_rows,
            updated_target_rows: Some(updated),
            target_cols: Some(target_cols),
            target_rows: Some(target_rows),
            change_type: Some(ChangeType::Fill),
            ..RowsChange::default()
        });
    }

    let (start, end) = if row_idx < over_row {
        (row_idx + 1, over_row + 1)
    } else {
        (over_row, row_idx)
    };
    if start >= end {
        return None;
    }
    let target_rows = rows.get(start..end)?.to_vec();

    log::debug!("fill column {} rows {start}..{end}", column.key);
    let updated = on_fill(&FillEvent {
        column_key: column.key.clone(),
        source_row,
        target_rows: target_rows.clone(),
        target_cols: None,
        across: false,
    });
    let new_rows = splice_rows(rows, start, target_rows.len(), &updated);
    Some(RowsChange {
        new_rows,
        key: Some(column.key.clone()),
        updated_target_rows: Some(updated),
        target_rows: Some(target_rows),
        change_type: Some(ChangeType::Fill),
        ..RowsChange::default()
    })
}

/// Fill from the row after `position` to the last row (fill-handle double click).
pub fn fill_to_end(
    columns: &[CalculatedColumn],
    rows: &[Row],
    position: Position,
    on_fill: &mut dyn FnMut(&FillEvent) -> Vec<Row>,
) -> Option<RowsChange> {
    let (col, row_idx) = position.within(columns.len(), rows.len())?;
    let column = columns.get(col)?;
    let target_rows = rows.get(row_idx + 1..)?.to_vec();
    if target_rows.is_empty() {
        return None;
    }
    let updated = on_fill(&FillEvent {
        column_key: column.key.clone(),
        source_row: rows.get(row_idx)?.clone(),
        target_rows: target_rows.clone(),
        target_cols: None,
        across: false,
    });
    Some(RowsChange::rows(splice_rows(rows, row_idx + 1, target_rows.len(), &updated)))
}
