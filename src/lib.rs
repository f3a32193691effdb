//! xlgrid - headless data grid core
//!
//! Everything an interactive spreadsheet-style grid needs except drawing:
//! - Column layout with frozen and right-pinned columns
//! - Batch-aligned row and column windowing for virtualized rendering
//! - Cell selection, inline editing and keyboard navigation
//! - Copy, paste and fill-handle range operations
//! - A controller that turns host events into callbacks and a render snapshot
//!
//! # Usage (Rust)
//!
//! ```
//! use xlgrid::{ColumnSpec, GridController, GridOptions, Row};
//!
//! let mut grid = GridController::new(GridOptions::default());
//! grid.resize(400.0, 300.0);
//! grid.set_columns(vec![
//!     ColumnSpec::new("id", "ID"),
//!     ColumnSpec::new("title", "Title").editable(),
//! ]);
//! grid.set_rows(vec![Row::new().with("id", 0.0).with("title", "Example")]);
//! let snapshot = grid.render();
//! assert_eq!(snapshot.rows.len(), 1);
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { XlGrid } from 'xlgrid';
//! await init();
//! const grid = new XlGrid({ rowHeight: 35 });
//! grid.setColumns([{ key: 'id', name: 'ID' }]);
//! grid.setRows([{ id: 1 }]);
//! const snapshot = grid.render();
//! ```

pub mod controller;
pub mod error;
pub mod layout;
pub mod range;
pub mod render;
pub mod selection;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

use wasm_bindgen::prelude::*;

pub use controller::{GridCallbacks, GridController, KeyOutcome, PointerInput};
pub use error::{Result, XlgridError};
pub use layout::{ColumnLayout, RowWindow, Viewport};
pub use render::ViewportSnapshot;
pub use selection::{KeyInput, SelectionState};

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
