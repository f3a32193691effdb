use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::CellValue;

/// A host-owned record. The grid only reads cells by column key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(key.into(), value.into());
    }

    /// Copy of this row with the cell at `key` set to `value`.
    ///
    /// Structured cells keep their flags; a missing cell becomes plain text.
    #[must_use]
    pub fn with_cell_value(&self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let cell = match self.cells.get(key) {
            Some(existing) => existing.with_value(value),
            None => CellValue::Text(value),
        };
        let mut row = self.clone();
        row.cells.insert(key.to_string(), cell);
        row
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Extracts a stable identity from a row, used for row selection and for
/// tracking copied rows across re-renders.
#[derive(Clone)]
pub struct RowKeyGetter(Rc<dyn Fn(&Row) -> String>);

impl RowKeyGetter {
    pub fn new(f: impl Fn(&Row) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Use the display value of one column as the key.
    pub fn from_column(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(move |row| {
            row.get(&key)
                .map(CellValue::display_value)
                .unwrap_or_default()
        })
    }

    pub fn key_of(&self, row: &Row) -> String {
        (self.0)(row)
    }
}

impl fmt::Debug for RowKeyGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RowKeyGetter(..)")
    }
}
