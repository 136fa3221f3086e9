//! Input data model for the renderer.
//!
//! Everything here is produced by upstream collaborators (the pose state
//! machine and the audio analysis pipeline) and consumed read-only by the
//! rendering engine: a glyph grid, three band intensities, and an optional
//! status/HUD payload bundled per tick into a [`Scene`].

/// Dimensions of the animation frame grid.
///
/// These are runtime configuration, not compile-time constants: the upstream
/// animator decides how large its frames are and the layout adapts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u16,
    pub height: u16,
}

impl FrameSize {
    pub fn new(width: u16, height: u16) -> Self {
        FrameSize { width, height }
    }
}

/// A fixed-size grid of display glyphs, one `String` per row.
///
/// Rows may contain multi-byte Unicode (the upstream animator typically
/// emits braille art). The grid is read-only to the renderer.
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    size: FrameSize,
    rows: Vec<String>,
}

impl AnimationFrame {
    /// Build a frame from pre-split rows, padding or truncating to the
    /// declared height so the renderer can always index `0..height`.
    pub fn from_rows(size: FrameSize, mut rows: Vec<String>) -> Self {
        rows.truncate(size.height as usize);
        while rows.len() < size.height as usize {
            rows.push(String::new());
        }
        AnimationFrame { size, rows }
    }

    /// Build a frame from a `\n`-delimited buffer, the shape the upstream
    /// frame composer hands over.
    pub fn from_text(size: FrameSize, text: &str) -> Self {
        let rows = text.lines().map(str::to_owned).collect();
        Self::from_rows(size, rows)
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Row `i` of the grid, empty past the end.
    pub fn row(&self, i: u16) -> &str {
        self.rows.get(i as usize).map(String::as_str).unwrap_or("")
    }
}

/// Bass/mid/treble band intensities, each clamped to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intensity {
    bass: f32,
    mid: f32,
    treble: f32,
}

impl Intensity {
    pub fn new(bass: f32, mid: f32, treble: f32) -> Self {
        Intensity {
            bass: bass.clamp(0.0, 1.0),
            mid: mid.clamp(0.0, 1.0),
            treble: treble.clamp(0.0, 1.0),
        }
    }

    pub fn bass(&self) -> f32 {
        self.bass
    }

    pub fn mid(&self) -> f32 {
        self.mid
    }

    pub fn treble(&self) -> f32 {
        self.treble
    }

    /// Overall energy: the mean of the three bands. Recomputed on every
    /// call; never cached across frames.
    pub fn energy(&self) -> f32 {
        (self.bass + self.mid + self.treble) / 3.0
    }
}

/// Optional performance readout supplied by the caller's profiler.
///
/// The renderer only displays these numbers; it does not collect them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStats {
    pub fps: f64,
    pub frame_ms: f64,
}

/// Everything the engine needs to draw one frame.
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    /// The current animation frame.
    pub frame: &'a AnimationFrame,
    /// Band intensities for this tick.
    pub levels: Intensity,
    /// Monotonic frame counter, shown in the default status line.
    pub frame_no: u64,
    /// Custom status text; `None` selects the frame/intensity readout.
    pub status: Option<&'a str>,
    /// Performance HUD values, drawn top-right when present.
    pub hud: Option<HudStats>,
}
