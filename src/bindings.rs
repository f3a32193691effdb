//! `XlGrid` - the WebAssembly surface of the grid controller.
//!
//! Hosts pass plain JS objects (rows, columns, options, key and pointer
//! events) which are converted with `serde-wasm-bindgen`, and receive the
//! render snapshot the same way.
//!
//! Callbacks raised while the controller is borrowed are queued and
//! delivered to JS after the borrow ends, so a handler may call straight
//! back into the grid (e.g. `setRows` from `onRowsChange`). The fill
//! handler is the exception: it must return rows synchronously and must
//! not call back into the grid.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use js_sys::Function;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::controller::{ClipboardSink, GridController, KeyOutcome, PointerInput};
use crate::error::XlgridError;
use crate::selection::KeyInput;
use crate::types::{
    ColumnSpec, FillEvent, GridOptions, PasteEvent, Position, Row, RowKeyGetter, RowsChange,
    SortDirection,
};

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Writes copies to `navigator.clipboard`
struct BrowserClipboard;

impl ClipboardSink for BrowserClipboard {
    fn write_text(&mut self, text: &str) -> crate::error::Result<()> {
        let window = web_sys::window().ok_or(XlgridError::Other("no window".into()))?;
        let _ = window.navigator().clipboard().write_text(text);
        Ok(())
    }
}

/// A callback raised by the controller, waiting for delivery
enum Outgoing {
    RowsChange(RowsChange),
    Paste(PasteEvent),
    ColumnResize(usize, f32),
    SelectedRows(HashSet<String>),
    SelectedCell(Position),
    Sort(String, SortDirection),
    Scroll(f32, f32),
}

#[derive(Clone, Default)]
struct JsHandlers {
    on_rows_change: Option<Function>,
    on_paste: Option<Function>,
    on_column_resize: Option<Function>,
    on_selected_rows_change: Option<Function>,
    on_selected_cell_change: Option<Function>,
    on_sort: Option<Function>,
    on_scroll: Option<Function>,
}

impl JsHandlers {
    fn dispatch(&self, event: Outgoing) -> Result<(), JsValue> {
        let this = JsValue::NULL;
        match event {
            Outgoing::RowsChange(change) => {
                if let Some(f) = &self.on_rows_change {
                    f.call1(&this, &to_js(&change)?)?;
                }
            }
            Outgoing::Paste(event) => {
                if let Some(f) = &self.on_paste {
                    f.call1(&this, &to_js(&event)?)?;
                }
            }
            Outgoing::ColumnResize(idx, width) => {
                if let Some(f) = &self.on_column_resize {
                    f.call2(&this, &JsValue::from(idx as f64), &JsValue::from(width))?;
                }
            }
            Outgoing::SelectedRows(keys) => {
                if let Some(f) = &self.on_selected_rows_change {
                    let mut keys: Vec<String> = keys.into_iter().collect();
                    keys.sort();
                    f.call1(&this, &to_js(&keys)?)?;
                }
            }
            Outgoing::SelectedCell(position) => {
                if let Some(f) = &self.on_selected_cell_change {
                    f.call1(&this, &to_js(&position)?)?;
                }
            }
            Outgoing::Sort(key, direction) => {
                if let Some(f) = &self.on_sort {
                    f.call2(&this, &JsValue::from_str(&key), &to_js(&direction)?)?;
                }
            }
            Outgoing::Scroll(top, left) => {
                if let Some(f) = &self.on_scroll {
                    f.call2(&this, &JsValue::from(top), &JsValue::from(left))?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
struct Shared {
    grid: Rc<RefCell<GridController>>,
    outbox: Rc<RefCell<Vec<Outgoing>>>,
    handlers: Rc<RefCell<JsHandlers>>,
}

impl Shared {
    fn with_grid<R>(&self, f: impl FnOnce(&mut GridController) -> R) -> Result<R, JsValue> {
        let result = {
            let mut grid = self
                .grid
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("grid is busy (called from inside onFill?)"))?;
            f(&mut grid)
        };
        self.flush();
        Ok(result)
    }

    fn flush(&self) {
        let events = std::mem::take(&mut *self.outbox.borrow_mut());
        if events.is_empty() {
            return;
        }
        let handlers = self.handlers.borrow().clone();
        for event in events {
            if let Err(e) = handlers.dispatch(event) {
                log::warn!("grid callback failed: {e:?}");
            }
        }
    }

    fn queue(&self) -> impl Fn(Outgoing) + 'static {
        let outbox = Rc::clone(&self.outbox);
        move |event| outbox.borrow_mut().push(event)
    }
}

/// Browser binding of [`GridController`]
#[wasm_bindgen]
pub struct XlGrid {
    shared: Shared,
}

impl XlGrid {
    fn paste_from_clipboard(&self) {
        let shared = self.shared.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let Some(window) = web_sys::window() else {
                return;
            };
            let promise = window.navigator().clipboard().read_text();
            match JsFuture::from(promise).await {
                Ok(text) => {
                    let text = text.as_string().unwrap_or_default();
                    if let Err(e) = shared.with_grid(|g| g.paste_text(&text)) {
                        log::warn!("paste failed: {e:?}");
                    }
                }
                Err(e) => log::warn!("Failed to read clipboard: {e:?}"),
            }
        });
    }
}

#[wasm_bindgen]
impl XlGrid {
    /// Create a grid. `options` is a `GridOptions` object or `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<XlGrid, JsValue> {
        console_error_panic_hook::set_once();

        let options: GridOptions = if options.is_undefined() || options.is_null() {
            GridOptions::default()
        } else {
            from_js(options)?
        };
        let mut grid = GridController::new(options);
        grid.set_clipboard(Some(Box::new(BrowserClipboard)));

        Ok(XlGrid {
            shared: Shared {
                grid: Rc::new(RefCell::new(grid)),
                outbox: Rc::new(RefCell::new(Vec::new())),
                handlers: Rc::new(RefCell::new(JsHandlers::default())),
            },
        })
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    #[wasm_bindgen(js_name = setColumns)]
    pub fn set_columns(&self, columns: JsValue) -> Result<(), JsValue> {
        let specs: Vec<ColumnSpec> = from_js(columns)?;
        self.shared.with_grid(|g| g.set_columns(specs))
    }

    #[wasm_bindgen(js_name = setRows)]
    pub fn set_rows(&self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<Row> = from_js(rows)?;
        self.shared.with_grid(|g| g.set_rows(rows))
    }

    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&self, options: JsValue) -> Result<(), JsValue> {
        let options: GridOptions = from_js(options)?;
        self.shared.with_grid(|g| g.set_options(options))
    }

    /// Use the display value of column `key` as the row key.
    #[wasm_bindgen(js_name = setRowKeyColumn)]
    pub fn set_row_key_column(&self, key: Option<String>) -> Result<(), JsValue> {
        self.shared
            .with_grid(|g| g.set_row_key_getter(key.map(RowKeyGetter::from_column)))
    }

    /// Selected row keys as an array, or `null` to disable row selection.
    #[wasm_bindgen(js_name = setSelectedRows)]
    pub fn set_selected_rows(&self, keys: JsValue) -> Result<(), JsValue> {
        let keys: Option<HashSet<String>> = if keys.is_null() || keys.is_undefined() {
            None
        } else {
            Some(from_js(keys)?)
        };
        self.shared.with_grid(|g| g.set_selected_rows(keys))
    }

    /// `direction` is `"ASC"`, `"DESC"` or `"NONE"`.
    #[wasm_bindgen(js_name = setSort)]
    pub fn set_sort(&self, column: Option<String>, direction: JsValue) -> Result<(), JsValue> {
        let direction: SortDirection = if direction.is_undefined() {
            SortDirection::None
        } else {
            from_js(direction)?
        };
        self.shared.with_grid(|g| g.set_sort(column, direction))
    }

    pub fn resize(&self, width: f32, height: f32) -> Result<(), JsValue> {
        self.shared.with_grid(|g| g.resize(width, height))
    }

    // ========================================================================
    // Rendering and scrolling
    // ========================================================================

    /// Run a render pass and return the `ViewportSnapshot`.
    pub fn render(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.shared.with_grid(GridController::render)?;
        to_js(&snapshot)
    }

    #[wasm_bindgen(js_name = handleScroll)]
    pub fn handle_scroll(&self, scroll_left: f32, scroll_top: f32) -> Result<(), JsValue> {
        self.shared
            .with_grid(|g| g.handle_scroll(scroll_left, scroll_top))
    }

    #[wasm_bindgen(js_name = scrollToColumn)]
    pub fn scroll_to_column(&self, idx: usize) -> Result<(), JsValue> {
        self.shared
            .with_grid(|g| g.scroll_to_column(idx))?
            .map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = scrollToRow)]
    pub fn scroll_to_row(&self, row_idx: usize) -> Result<(), JsValue> {
        self.shared.with_grid(|g| g.scroll_to_row(row_idx))
    }

    /// Pending `{left?, top?, smooth}` scroll, or `undefined`.
    #[wasm_bindgen(js_name = takeScrollRequest)]
    pub fn take_scroll_request(&self) -> Result<JsValue, JsValue> {
        match self.shared.with_grid(GridController::take_scroll_request)? {
            Some(request) => to_js(&request),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(js_name = takeFocusRequest)]
    pub fn take_focus_request(&self) -> Result<bool, JsValue> {
        self.shared.with_grid(GridController::take_focus_request)
    }

    #[wasm_bindgen(js_name = handleCellFocus)]
    pub fn handle_cell_focus(&self) -> Result<(), JsValue> {
        self.shared.with_grid(GridController::handle_cell_focus)
    }

    // ========================================================================
    // Selection and keyboard
    // ========================================================================

    #[wasm_bindgen(js_name = selectCell)]
    pub fn select_cell(&self, idx: i32, row_idx: i32, open_editor: bool) -> Result<bool, JsValue> {
        self.shared
            .with_grid(|g| g.select_cell(Position::new(idx, row_idx), open_editor))
    }

    /// Handle a `KeyboardEvent`-shaped object. Returns `"handled"`,
    /// `"ignored"`, `"exitGrid"` or `"pasteRequested"`; for the last the
    /// clipboard is read and pasted asynchronously.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, event: JsValue) -> Result<JsValue, JsValue> {
        let input: KeyInput = from_js(event)?;
        let outcome = self.shared.with_grid(|g| g.handle_key_down(&input))?;
        if outcome == KeyOutcome::PasteRequested {
            self.paste_from_clipboard();
        }
        to_js(&outcome)
    }

    /// Copy the selected range; returns the copied text.
    pub fn copy(&self) -> Result<Option<String>, JsValue> {
        self.shared.with_grid(GridController::copy_selection)
    }

    /// Paste `text` at the selected cell.
    pub fn paste(&self, text: &str) -> Result<bool, JsValue> {
        self.shared.with_grid(|g| g.paste_text(text))
    }

    #[wasm_bindgen(js_name = editorInput)]
    pub fn editor_input(&self, text: &str) -> Result<(), JsValue> {
        self.shared.with_grid(|g| g.editor_input(text))
    }

    #[wasm_bindgen(js_name = editorClose)]
    pub fn editor_close(&self, commit: bool) -> Result<(), JsValue> {
        self.shared.with_grid(|g| g.editor_close(commit))
    }

    #[wasm_bindgen(js_name = selectRow)]
    pub fn select_row(&self, row_idx: usize, checked: bool, shift: bool) -> Result<(), JsValue> {
        self.shared
            .with_grid(|g| g.select_row(row_idx, checked, shift))?
            .map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = selectAllRows)]
    pub fn select_all_rows(&self, checked: bool) -> Result<(), JsValue> {
        self.shared
            .with_grid(|g| g.select_all_rows(checked))?
            .map_err(JsValue::from)
    }

    // ========================================================================
    // Pointer
    // ========================================================================

    #[wasm_bindgen(js_name = cellPointerDown)]
    pub fn cell_pointer_down(&self, idx: i32, row_idx: i32, event: JsValue) -> Result<(), JsValue> {
        let input: PointerInput = from_js(event)?;
        self.shared
            .with_grid(|g| g.cell_pointer_down(Position::new(idx, row_idx), &input))
    }

    #[wasm_bindgen(js_name = cellPointerEnter)]
    pub fn cell_pointer_enter(&self, idx: i32, row_idx: i32, buttons: u16) -> Result<(), JsValue> {
        self.shared
            .with_grid(|g| g.cell_pointer_enter(Position::new(idx, row_idx), buttons))
    }

    #[wasm_bindgen(js_name = cellDoubleClick)]
    pub fn cell_double_click(&self, idx: i32, row_idx: i32) -> Result<(), JsValue> {
        self.shared
            .with_grid(|g| g.cell_double_click(Position::new(idx, row_idx)))
    }

    #[wasm_bindgen(js_name = fillHandlePointerDown)]
    pub fn fill_handle_pointer_down(&self, event: JsValue) -> Result<(), JsValue> {
        let input: PointerInput = from_js(event)?;
        self.shared
            .with_grid(|g| g.fill_handle_pointer_down(&input))
    }

    #[wasm_bindgen(js_name = fillHandleDoubleClick)]
    pub fn fill_handle_double_click(&self) -> Result<(), JsValue> {
        self.shared
            .with_grid(GridController::fill_handle_double_click)
    }

    /// Returns true when a column resize started.
    #[wasm_bindgen(js_name = headerPointerDown)]
    pub fn header_pointer_down(&self, idx: usize, event: JsValue) -> Result<bool, JsValue> {
        let input: PointerInput = from_js(event)?;
        self.shared
            .with_grid(|g| g.header_resize_pointer_down(idx, &input))
    }

    #[wasm_bindgen(js_name = headerClick)]
    pub fn header_click(&self, idx: usize) -> Result<(), JsValue> {
        self.shared
            .with_grid(|g| g.header_click(idx))?
            .map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, event: JsValue) -> Result<(), JsValue> {
        let input: PointerInput = from_js(event)?;
        self.shared.with_grid(|g| g.pointer_move(&input))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, pointer_id: i32) -> Result<(), JsValue> {
        self.shared.with_grid(|g| g.pointer_up(pointer_id))
    }

    // ========================================================================
    // Callbacks (pass `null` to remove)
    // ========================================================================

    #[wasm_bindgen(js_name = onRowsChange)]
    pub fn on_rows_change(&self, f: Option<Function>) -> Result<(), JsValue> {
        let enabled = f.is_some();
        self.shared.handlers.borrow_mut().on_rows_change = f;
        let queue = self.shared.queue();
        self.shared.with_grid(|g| {
            g.callbacks_mut().on_rows_change = enabled.then(|| {
                Box::new(move |c: RowsChange| queue(Outgoing::RowsChange(c)))
                    as Box<dyn FnMut(RowsChange)>
            });
        })
    }

    /// `f(event)` must return the replacement rows synchronously.
    #[wasm_bindgen(js_name = onFill)]
    pub fn on_fill(&self, f: Option<Function>) -> Result<(), JsValue> {
        self.shared.with_grid(|g| {
            g.callbacks_mut().on_fill = f.map(|f| {
                Box::new(move |event: &FillEvent| -> Vec<Row> {
                    let rows = to_js(event)
                        .and_then(|arg| f.call1(&JsValue::NULL, &arg))
                        .and_then(from_js::<Vec<Row>>);
                    rows.unwrap_or_else(|e| {
                        log::warn!("onFill failed: {e:?}");
                        Vec::new()
                    })
                }) as Box<dyn FnMut(&FillEvent) -> Vec<Row>>
            });
        })
    }

    #[wasm_bindgen(js_name = onPaste)]
    pub fn on_paste(&self, f: Option<Function>) -> Result<(), JsValue> {
        let enabled = f.is_some();
        self.shared.handlers.borrow_mut().on_paste = f;
        let queue = self.shared.queue();
        self.shared.with_grid(|g| {
            g.callbacks_mut().on_paste = enabled.then(|| {
                Box::new(move |e: &PasteEvent| queue(Outgoing::Paste(e.clone())))
                    as Box<dyn FnMut(&PasteEvent)>
            });
        })
    }

    #[wasm_bindgen(js_name = onColumnResize)]
    pub fn on_column_resize(&self, f: Option<Function>) -> Result<(), JsValue> {
        let enabled = f.is_some();
        self.shared.handlers.borrow_mut().on_column_resize = f;
        let queue = self.shared.queue();
        self.shared.with_grid(|g| {
            g.callbacks_mut().on_column_resize = enabled.then(|| {
                Box::new(move |idx: usize, width: f32| queue(Outgoing::ColumnResize(idx, width)))
                    as Box<dyn FnMut(usize, f32)>
            });
        })
    }

    #[wasm_bindgen(js_name = onSelectedRowsChange)]
    pub fn on_selected_rows_change(&self, f: Option<Function>) -> Result<(), JsValue> {
        let enabled = f.is_some();
        self.shared.handlers.borrow_mut().on_selected_rows_change = f;
        let queue = self.shared.queue();
        self.shared.with_grid(|g| {
            g.callbacks_mut().on_selected_rows_change = enabled.then(|| {
                Box::new(move |keys: &HashSet<String>| queue(Outgoing::SelectedRows(keys.clone())))
                    as Box<dyn FnMut(&HashSet<String>)>
            });
        })
    }

    #[wasm_bindgen(js_name = onSelectedCellChange)]
    pub fn on_selected_cell_change(&self, f: Option<Function>) -> Result<(), JsValue> {
        let enabled = f.is_some();
        self.shared.handlers.borrow_mut().on_selected_cell_change = f;
        let queue = self.shared.queue();
        self.shared.with_grid(|g| {
            g.callbacks_mut().on_selected_cell_change = enabled.then(|| {
                Box::new(move |p: Position| queue(Outgoing::SelectedCell(p)))
                    as Box<dyn FnMut(Position)>
            });
        })
    }

    #[wasm_bindgen(js_name = onSort)]
    pub fn on_sort(&self, f: Option<Function>) -> Result<(), JsValue> {
        let enabled = f.is_some();
        self.shared.handlers.borrow_mut().on_sort = f;
        let queue = self.shared.queue();
        self.shared.with_grid(|g| {
            g.callbacks_mut().on_sort = enabled.then(|| {
                Box::new(move |key: &str, d: SortDirection| {
                    queue(Outgoing::Sort(key.to_string(), d))
                }) as Box<dyn FnMut(&str, SortDirection)>
            });
        })
    }

    #[wasm_bindgen(js_name = onScroll)]
    pub fn on_scroll(&self, f: Option<Function>) -> Result<(), JsValue> {
        let enabled = f.is_some();
        self.shared.handlers.borrow_mut().on_scroll = f;
        let queue = self.shared.queue();
        self.shared.with_grid(|g| {
            g.callbacks_mut().on_scroll = enabled.then(|| {
                Box::new(move |top: f32, left: f32| queue(Outgoing::Scroll(top, left)))
                    as Box<dyn FnMut(f32, f32)>
            });
        })
    }
}
