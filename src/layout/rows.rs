//! Vertical row window with batch-aligned overscan.

use super::to_index;

/// Rendered row ranges are snapped outward to multiples of this
pub const RENDER_BATCH_SIZE: usize = 8;

/// Rows rendered beyond the visible area in each direction
pub const ROW_OVERSCAN: usize = 4;

/// Inclusive range of rows to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub overscan_start: usize,
    pub overscan_end: usize,
}

impl RowWindow {
    /// Window for `row_count` rows of `row_height` pixels seen through a
    /// `client_height` tall body scrolled to `scroll_top`.
    ///
    /// Returns `None` when there are no rows. Snapping to the batch size keeps
    /// the rendered row set stable across small scroll deltas.
    pub fn compute(
        row_count: usize,
        row_height: f32,
        client_height: f32,
        scroll_top: f32,
    ) -> Option<Self> {
        let last_idx = row_count.checked_sub(1)?;
        let row_height = if row_height.is_finite() && row_height >= 1.0 {
            row_height
        } else {
            1.0
        };
        let scroll_top = scroll_top.max(0.0);
        let client_height = client_height.max(0.0);

        let visible_start = to_index(scroll_top / row_height);
        let visible_end = last_idx.min(to_index((scroll_top + client_height) / row_height));

        let batch_end =
            (visible_end + ROW_OVERSCAN).div_ceil(RENDER_BATCH_SIZE) * RENDER_BATCH_SIZE;
        let overscan_end = last_idx.min(batch_end);
        let batch_start =
            visible_start.saturating_sub(ROW_OVERSCAN) / RENDER_BATCH_SIZE * RENDER_BATCH_SIZE;
        let overscan_start = batch_start.min(overscan_end);

        log::trace!("row window: {overscan_start}..={overscan_end} of {row_count}");

        Some(Self {
            overscan_start,
            overscan_end,
        })
    }

    pub fn contains(&self, row_idx: usize) -> bool {
        row_idx >= self.overscan_start && row_idx <= self.overscan_end
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.overscan_start..=self.overscan_end
    }
}
