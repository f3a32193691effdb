use crate::types::{is_cell_disabled, CalculatedColumn, CopiedRange, Position, Row};

/// A recorded copy and its clipboard text
#[derive(Debug, Clone, PartialEq)]
pub struct CopyResult {
    pub range: CopiedRange,
    /// Enabled values of the range, one per line. A trailing empty value
    /// of a multi-line copy is written as `""` so the last line survives
    /// a paste.
    pub text: String,
}

/// Copy the selected column over the rows between the selection and
/// `dragged_over_row` (inclusive, either direction).
///
/// Returns `None` without a selected cell or when that cell is disabled.
pub fn copy(
    columns: &[CalculatedColumn],
    rows: &[Row],
    position: Position,
    dragged_over_row: Option<usize>,
) -> Option<CopyResult> {
    let (col, row_idx) = position.within(columns.len(), rows.len())?;
    let column = columns.get(col)?;
    if is_cell_disabled(rows.get(row_idx)?.get(&column.key)) {
        return None;
    }

    let over = dragged_over_row
        .unwrap_or(row_idx)
        .min(rows.len().saturating_sub(1));
    let (lo, hi) = (row_idx.min(over), row_idx.max(over));
    let copied: Vec<Row> = rows.get(lo..=hi)?.to_vec();

    let mut values: Vec<String> = copied
        .iter()
        .filter_map(|row| {
            let cell = row.get(&column.key);
            if is_cell_disabled(cell) {
                return None;
            }
            let value = cell.map(|c| c.display_value()).unwrap_or_default();
            Some(escape_cell_value(&value))
        })
        .collect();
    if values.len() > 1 {
        if let Some(last) = values.last_mut().filter(|v| v.is_empty()) {
            *last = "\"\"".to_string();
        }
    }
    let text = values.join("\n");

    log::debug!("copied rows {lo}..={hi} of column {}", column.key);

    Some(CopyResult {
        range: CopiedRange {
            rows: copied,
            column_key: column.key.clone(),
        },
        text,
    })
}

/// Escape a cell value for TSV/clipboard format.
/// If the value contains tabs, newlines, or quotes, wrap in quotes and escape internal quotes
pub fn escape_cell_value(value: &str) -> String {
    let needs_quoting = value.contains('\t')
        || value.contains('\n')
        || value.contains('\r')
        || value.contains('"');

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_cell_value() {
        assert_eq!(escape_cell_value("plain"), "plain");
        assert_eq!(escape_cell_value("a\tb"), "\"a\tb\"");
        assert_eq!(escape_cell_value("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
