//! Presentation capabilities and the render snapshot.
//!
//! The grid never draws. Each column selects a formatter, an editor and a
//! header renderer from a small fixed set of variants at layout time, and
//! [`ViewportSnapshot`] describes what the host should paint for the
//! current window.

mod editor;
mod formatter;
mod header;
mod snapshot;

pub use editor::{CellEditor, Editor, TextEditor};
pub use formatter::{CellContent, CellFormatter, Formatter, FormatterContext};
pub use header::{HeaderCellRenderer, HeaderContent, HeaderContext, HeaderRenderer};
pub use snapshot::{CellSnapshot, EditorSnapshot, HeaderCellSnapshot, RowSnapshot, ViewportSnapshot};
