//! Viewport state management for scrolling and container size.

/// Viewport state - the visible area of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll position in grid coordinates
    pub scroll_left: f32,
    /// Vertical scroll position in grid coordinates
    pub scroll_top: f32,
    /// Container width in pixels
    pub width: f32,
    /// Container height in pixels, header and summary rows included
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a viewport at the 1x1 size used until the container is measured.
    pub fn new() -> Self {
        Self {
            scroll_left: 0.0,
            scroll_top: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }

    /// Height available to body rows.
    pub fn client_height(
        &self,
        header_row_height: f32,
        summary_rows: usize,
        row_height: f32,
    ) -> f32 {
        (self.height - header_row_height - summary_rows as f32 * row_height).max(0.0)
    }

    /// Number of whole rows that fit in `client_height`, used by PageUp/PageDown.
    pub fn rows_per_page(client_height: f32, row_height: f32) -> i32 {
        if row_height <= 0.0 {
            return 0;
        }
        to_i32((client_height / row_height).floor())
    }

    /// Clamp scroll position to `[0, content - viewport]`.
    pub fn clamp_scroll(&mut self, content_width: f32, content_height: f32) {
        let max_left = (content_width - self.width).max(0.0);
        let max_top = (content_height - self.height).max(0.0);
        self.scroll_left = self.scroll_left.clamp(0.0, max_left);
        self.scroll_top = self.scroll_top.clamp(0.0, max_top);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, left: f32, top: f32, content_width: f32, content_height: f32) {
        self.scroll_left = left;
        self.scroll_top = top;
        self.clamp_scroll(content_width, content_height);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// True once the right edge of the columns is in view.
    pub fn scrolled_to_end(&self, total_column_width: f32) -> bool {
        self.width + self.scroll_left >= total_column_width
    }

    /// New `scroll_top` that reveals row `row_idx`, or `None` if it is already visible.
    pub fn scroll_top_for_row(
        &self,
        row_idx: usize,
        row_height: f32,
        client_height: f32,
    ) -> Option<f32> {
        let top = row_idx as f32 * row_height;
        let bottom = top + row_height;
        if top < self.scroll_top {
            Some(top)
        } else if bottom > self.scroll_top + client_height {
            Some(bottom - client_height)
        } else {
            None
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_i32(value: f32) -> i32 {
    // `as` saturates and maps NaN to 0
    value as i32
}
