use serde::{Deserialize, Serialize};

use super::{CellNavigationMode, DefaultColumnOptions};

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 35.0;

/// Grid configuration supplied by the host.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    /// Height of every body row in pixels
    pub row_height: f32,
    /// Height of the header row; falls back to `row_height`
    pub header_row_height: Option<f32>,
    /// Summary rows rendered below the body; they take space but are not navigable
    pub summary_rows_count: usize,
    pub default_column_options: DefaultColumnOptions,
    pub cell_navigation_mode: CellNavigationMode,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            header_row_height: None,
            summary_rows_count: 0,
            default_column_options: DefaultColumnOptions::default(),
            cell_navigation_mode: CellNavigationMode::None,
        }
    }
}

impl GridOptions {
    pub fn header_row_height(&self) -> f32 {
        self.header_row_height.unwrap_or(self.row_height)
    }

    /// Row height guarded against zero/negative values from the host.
    pub fn effective_row_height(&self) -> f32 {
        if self.row_height.is_finite() && self.row_height >= 1.0 {
            self.row_height
        } else {
            1.0
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let opts: GridOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(opts.header_row_height(), DEFAULT_ROW_HEIGHT);
        assert_eq!(opts.cell_navigation_mode, CellNavigationMode::None);
    }

    #[test]
    fn test_camel_case_fields() {
        let opts: GridOptions = serde_json::from_str(
            r#"{"rowHeight":20,"headerRowHeight":40,"cellNavigationMode":"LOOP_OVER_ROW","defaultColumnOptions":{"minWidth":80}}"#,
        )
        .unwrap();
        assert_eq!(opts.row_height, 20.0);
        assert_eq!(opts.header_row_height(), 40.0);
        assert_eq!(opts.default_column_options.min_width, Some(80.0));
        assert_eq!(opts.cell_navigation_mode, CellNavigationMode::LoopOverRow);
    }

    #[test]
    fn test_zero_row_height_is_guarded() {
        let opts = GridOptions {
            row_height: 0.0,
            ..GridOptions::default()
        };
        assert_eq!(opts.effective_row_height(), 1.0);
    }
}
