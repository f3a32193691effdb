//! Structured error types for xlgrid.
//!
//! Almost every grid condition degrades gracefully (stale selections are
//! clamped, a missing clipboard is skipped). Only host misconfiguration is
//! surfaced as an error.

/// All errors that can be surfaced to the grid host.
#[derive(Debug, thiserror::Error)]
pub enum XlgridError {
    /// Row selection was requested but no row-key extractor is configured.
    #[error("Please specify a row key getter to use row selection")]
    MissingRowKeyGetter,

    /// A column index does not exist in the current layout.
    #[error("Column index {0} is out of range")]
    ColumnOutOfRange(usize),

    /// Host payload (rows, columns, options) could not be (de)serialized.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlgridError>;

impl From<String> for XlgridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for XlgridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<XlgridError> for wasm_bindgen::JsValue {
    fn from(e: XlgridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
