use crate::selection::is_cell_editable;
use crate::types::{
    is_cell_disabled, CalculatedColumn, ChangeType, Position, Row, RowsChange, TargetColumn,
};

/// An applied paste
#[derive(Debug, Clone, PartialEq)]
pub struct PasteOutcome {
    pub change: RowsChange,
    /// Far corner of the pasted block, clamped to the grid
    pub end_row: usize,
    pub end_col: usize,
}

/// Split clipboard text into rows of tab-separated fields.
///
/// One trailing line break is dropped, as spreadsheets append one. A field
/// starting with `"` is quoted: it may contain tabs and line breaks, and
/// `""` stands for a literal quote. An unterminated quote is taken literally.
pub fn parse_clipboard_text(text: &str) -> Vec<Vec<String>> {
    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut rest = text;
    loop {
        let (field, tail) = split_field(rest);
        row.push(field);
        match tail {
            Some(('\t', remaining)) => rest = remaining,
            Some((_, remaining)) => {
                rows.push(std::mem::take(&mut row));
                rest = remaining;
            }
            None => {
                rows.push(row);
                return rows;
            }
        }
    }
}

/// Take one field off the front of `s`.
///
/// Returns the field and the delimiter that ended it (`'\t'` or `'\n'`)
/// with the remaining input, or `None` at end of input.
fn split_field(s: &str) -> (String, Option<(char, &str)>) {
    if let Some(quoted) = s.strip_prefix('"') {
        if let Some((field, after)) = take_quoted(quoted) {
            match after.chars().next() {
                None => return (field, None),
                Some('\t') => return (field, Some(('\t', after.get(1..).unwrap_or_default()))),
                Some('\n') => return (field, Some(('\n', after.get(1..).unwrap_or_default()))),
                Some('\r') if after.get(1..2) == Some("\n") => {
                    return (field, Some(('\n', after.get(2..).unwrap_or_default())));
                }
                // Text after the closing quote: not a quoted field after all
                Some(_) => {}
            }
        }
    }

    match s.find(['\t', '\n']) {
        Some(pos) => {
            let field = s.get(..pos).unwrap_or_default();
            let delim = if s.get(pos..=pos) == Some("\t") {
                '\t'
            } else {
                '\n'
            };
            let field = field.strip_suffix('\r').unwrap_or(field);
            (field.to_string(), Some((delim, s.get(pos + 1..).unwrap_or_default())))
        }
        None => (s.strip_suffix('\r').unwrap_or(s).to_string(), None),
    }
}

/// Read a quoted field body (opening quote already consumed).
fn take_quoted(s: &str) -> Option<(String, &str)> {
    let mut out = String::new();
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            out.push(c);
            continue;
        }
        if matches!(chars.peek(), Some((_, '"'))) {
            out.push('"');
            chars.next();
            continue;
        }
        return Some((out, s.get(i + 1..).unwrap_or_default()));
    }
    None
}

/// Paste `text` with its top-left token at `position`.
///
/// Disabled targets and cells past the grid edges are skipped. Returns
/// `None` when the anchor cell is not editable or there is nothing to paste.
pub fn paste(
    columns: &[CalculatedColumn],
    rows: &[Row],
    position: Position,
    text: &str,
) -> Option<PasteOutcome> {
    let (start_col, start_row) = position.within(columns.len(), rows.len())?;
    if !is_cell_editable(columns, rows, position) {
        return None;
    }
    let grid = parse_clipboard_text(text);
    let width = grid.first().map_or(0, Vec::len);
    if grid.is_empty() || width == 0 {
        return None;
    }

    let mut new_rows = rows.to_vec();
    let mut updated_target_rows = Vec::with_capacity(grid.len());
    for (i, tokens) in grid.iter().enumerate() {
        let row_idx = start_row + i;
        let Some(slot) = new_rows.get_mut(row_idx) else {
            break;
        };
        for (offset, token) in tokens.iter().enumerate() {
            let Some(column) = columns.get(start_col + offset) else {
                break;
            };
            if is_cell_disabled(slot.get(&column.key)) {
                continue;
            }
            let value = match &column.format_value {
                Some(f) => f.apply(token),
                None => token.clone(),
            };
            *slot = slot.with_cell_value(&column.key, value);
        }
        updated_target_rows.push(slot.clone());
    }

    let end_row = (start_row + grid.len() - 1).min(rows.len() - 1);
    let end_col = (start_col + width - 1).min(columns.len() - 1);
    let target_cols: Vec<TargetColumn> = columns
        .get(start_col..=end_col)
        .unwrap_or_default()
        .iter()
        .map(TargetColumn::from)
        .collect();
    let key = columns.get(start_col).map(|c| c.key.clone());

    log::debug!("paste {}x{} at {position:?}", grid.len(), width);

    Some(PasteOutcome {
        change: RowsChange {
            new_rows,
            key,
            updated_target_rows: Some(updated_target_rows),
            target_cols: Some(target_cols),
            change_type: Some(ChangeType::Paste),
            ..RowsChange::default()
        },
        end_row,
        end_col,
    })
}
