//! Scroll handling and scroll-into-view requests.

use super::{GridController, ScrollRequest};
use crate::error::{Result, XlgridError};
use crate::types::Position;

impl GridController {
    /// The host's grid element scrolled.
    pub fn handle_scroll(&mut self, scroll_left: f32, scroll_top: f32) {
        self.viewport.scroll_left = scroll_left.max(0.0);
        self.viewport.scroll_top = scroll_top.max(0.0);
        if let Some(cb) = self.callbacks.on_scroll.as_mut() {
            cb(scroll_top, scroll_left);
        }
    }

    /// Bring column `idx` into horizontal view.
    pub fn scroll_to_column(&mut self, idx: usize) -> Result<()> {
        if idx >= self.layout.len() {
            return Err(XlgridError::ColumnOutOfRange(idx));
        }
        if let Some(left) = self.column_scroll_target(idx) {
            self.request_scroll(Some(left), None, false);
        }
        Ok(())
    }

    /// Smooth-scroll so row `row_idx` is at the top.
    pub fn scroll_to_row(&mut self, row_idx: usize) {
        let top = row_idx as f32 * self.row_height();
        self.request_scroll(None, Some(top), true);
    }

    /// Scroll needed to reveal `position`, if any.
    pub(crate) fn scroll_to_cell(&mut self, position: Position) {
        let left = position
            .col()
            .and_then(|idx| self.column_scroll_target(idx));
        let top = position.row().and_then(|row_idx| {
            self.viewport
                .scroll_top_for_row(row_idx, self.row_height(), self.client_height())
        });
        if left.is_some() || top.is_some() {
            self.request_scroll(left, top, false);
        }
    }

    fn column_scroll_target(&self, idx: usize) -> Option<f32> {
        self.layout
            .scroll_left_for_column(idx, self.viewport.scroll_left, self.viewport.width)
    }

    /// Queue a scroll for the host and apply it to the local viewport.
    fn request_scroll(&mut self, left: Option<f32>, top: Option<f32>, smooth: bool) {
        let content_height = self.content_height();
        let content_width = self.layout.total_column_width;
        self.viewport.set_scroll(
            left.unwrap_or(self.viewport.scroll_left),
            top.unwrap_or(self.viewport.scroll_top),
            content_width,
            content_height,
        );
        let request = self
            .scroll_request
            .get_or_insert_with(ScrollRequest::default);
        if left.is_some() {
            request.left = Some(self.viewport.scroll_left);
        }
        if top.is_some() {
            request.top = Some(self.viewport.scroll_top);
        }
        request.smooth = smooth;
    }

    /// Pending scroll for the host to apply, cleared on read.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll_request.take()
    }

    /// Whether the host should focus the grid's focus sink, cleared on read.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// A cell received focus directly, so the next scroll-into-view skips
    /// the focus request.
    pub fn handle_cell_focus(&mut self) {
        self.cell_focused = true;
    }
}
