//! Per-frame layout computation.
//!
//! A [`Layout`] is derived from the current terminal size and the frame
//! dimensions at the start of every frame and thrown away afterwards.
//! Nothing caches screen positions across frames, which is what keeps the
//! first frame after a resize fully consistent. The visibility predicates
//! encode the skip rules for undersized terminals: a layer that does not
//! fit is omitted entirely, never clipped mid-glyph or wrapped.

use crate::scene::FrameSize;

/// Cell width of each frequency bar (excluding brackets).
pub const BAR_WIDTH: u16 = 20;
/// Columns between adjacent bars.
pub const BAR_GAP: u16 = 5;
/// Cell width of the energy gauge.
pub const ENERGY_WIDTH: u16 = 20;
/// Rows at the bottom reserved for bars, gauge and status.
pub const BOTTOM_MARGIN: u16 = 4;
/// Most reflection rows ever drawn below the ground line.
pub const SHADOW_MAX_ROWS: u16 = 4;

/// Screen placements for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: u16,
    pub cols: u16,
    pub frame: FrameSize,
    /// Top row of the dancer frame.
    pub start_row: u16,
    /// Left column of the dancer frame.
    pub start_col: u16,
    /// Row of the ground line, directly under the frame.
    pub ground_row: u16,
    /// First row of the mirrored reflection.
    pub shadow_row: u16,
    /// Row the three frequency bars share.
    pub bar_row: u16,
    /// Left column of each bar's opening bracket (bass, mid, treble).
    pub bar_cols: [u16; 3],
    pub energy_row: u16,
    pub energy_col: u16,
    pub status_row: u16,
}

impl Layout {
    /// Compute placements for a `rows x cols` terminal showing a frame of
    /// the given size.
    pub fn compute(rows: u16, cols: u16, frame: FrameSize) -> Self {
        let h = i32::from(frame.height);
        let w = i32::from(frame.width);
        let start_row = ((i32::from(rows) - h) / 2 - 4).max(0) as u16;
        let start_col = ((i32::from(cols) - w) / 2).max(0) as u16;
        let ground_row = start_row.saturating_add(frame.height);

        let bar_row = rows.saturating_sub(5);
        let bars_total = i32::from(BAR_WIDTH) * 3 + i32::from(BAR_GAP) * 2;
        let bars_start = ((i32::from(cols) - bars_total) / 2).max(2) as u16;
        let step = BAR_WIDTH + BAR_GAP;
        let bar_cols = [bars_start, bars_start + step, bars_start + step * 2];

        Layout {
            rows,
            cols,
            frame,
            start_row,
            start_col,
            ground_row,
            shadow_row: ground_row.saturating_add(1),
            bar_row,
            bar_cols,
            energy_row: bar_row.saturating_add(2),
            energy_col: ((i32::from(cols) - 30) / 2).max(0) as u16,
            status_row: rows.saturating_sub(1),
        }
    }

    /// Last row the dancer/shadow area may use (exclusive).
    fn floor_limit(&self) -> u16 {
        self.rows.saturating_sub(BOTTOM_MARGIN)
    }

    /// Whether the ground line fits above the reserved bottom margin.
    pub fn ground_visible(&self) -> bool {
        self.ground_row < self.floor_limit()
    }

    /// Column span of the ground line, or `None` when the terminal is too
    /// narrow to show any of it.
    pub fn ground_span(&self) -> Option<(u16, u16)> {
        let width = i32::from(self.frame.width) * 2;
        let start = ((i32::from(self.cols) - width) / 2).max(2);
        let end = (start + width).min(i32::from(self.cols) - 2);
        (end > start).then(|| (start as u16, end as u16))
    }

    /// Number of reflection rows that fit between the ground line and the
    /// reserved margin. Never exceeds `min(frame.height, SHADOW_MAX_ROWS)`.
    pub fn shadow_rows(&self) -> u16 {
        let cap = self.frame.height.min(SHADOW_MAX_ROWS);
        let room = self.floor_limit().saturating_sub(self.shadow_row);
        cap.min(room)
    }

    /// Dancer rows that fit on screen; rows past this are simply not drawn.
    pub fn dancer_rows(&self) -> u16 {
        self.frame
            .height
            .min(self.rows.saturating_sub(self.start_row))
    }

    /// Whether the bar/gauge block has room below the dancer.
    pub fn bars_visible(&self) -> bool {
        self.bar_row >= self.frame.height.saturating_add(4)
    }
}
