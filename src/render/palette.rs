//! Color theme table.
//!
//! Maps a (theme, channel, energy) triple to a concrete [`Color`]. Every
//! energy-driven channel carries a gradient of [`GRADIENT_STEPS`] buckets on
//! the 256-color tier; terminals without extended color get the same channel
//! semantics from a coarser [`BASIC_STEPS`]-bucket table of named ANSI
//! colors. Lookups are pure and never fail: energy is clamped before
//! bucketing and a default theme is active from construction.

use ratatui::style::Color;

use crate::caps::TermCaps;

/// Gradient buckets on the 256-color tier.
pub const GRADIENT_STEPS: usize = 10;

/// Gradient buckets on the reduced 16-color tier.
pub const BASIC_STEPS: usize = 4;

/// Available color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Spectrum,
    Fire,
    Ocean,
    Matrix,
    Mono,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Spectrum,
        Theme::Fire,
        Theme::Ocean,
        Theme::Matrix,
        Theme::Mono,
    ];

    /// Cycle to the next theme (for the theme hotkey).
    pub fn next(self) -> Self {
        match self {
            Theme::Spectrum => Theme::Fire,
            Theme::Fire => Theme::Ocean,
            Theme::Ocean => Theme::Matrix,
            Theme::Matrix => Theme::Mono,
            Theme::Mono => Theme::Spectrum,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Spectrum => "spectrum",
            Theme::Fire => "fire",
            Theme::Ocean => "ocean",
            Theme::Matrix => "matrix",
            Theme::Mono => "mono",
        }
    }

    /// Parse a theme name as given on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        Theme::ALL.into_iter().find(|t| t.label() == name)
    }
}

/// Visual channels with independently themed colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Dancer,
    Shadow,
    Ground,
    Bass,
    Mid,
    Treble,
    Info,
    Bpm,
    Energy,
}

/// 256-color palette for one theme. Gradients run low energy to high.
struct ExtendedPalette {
    dancer: [u8; GRADIENT_STEPS],
    shadow: [u8; GRADIENT_STEPS],
    ground: u8,
    bass: [u8; GRADIENT_STEPS],
    mid: [u8; GRADIENT_STEPS],
    treble: [u8; GRADIENT_STEPS],
    info: u8,
    bpm: u8,
    energy: [u8; GRADIENT_STEPS],
}

/// Reduced palette for 8/16-color terminals.
struct BasicPalette {
    dancer: [Color; BASIC_STEPS],
    shadow: [Color; BASIC_STEPS],
    ground: Color,
    bass: [Color; BASIC_STEPS],
    mid: [Color; BASIC_STEPS],
    treble: [Color; BASIC_STEPS],
    info: Color,
    bpm: Color,
    energy: [Color; BASIC_STEPS],
}

const SPECTRUM_256: ExtendedPalette = ExtendedPalette {
    dancer: [27, 33, 39, 45, 51, 50, 226, 220, 208, 196],
    shadow: [233, 234, 235, 236, 237, 238, 239, 240, 241, 242],
    ground: 240,
    bass: [52, 88, 124, 160, 196, 197, 198, 199, 200, 201],
    mid: [22, 28, 34, 40, 46, 47, 48, 49, 50, 51],
    treble: [17, 18, 19, 20, 21, 27, 33, 39, 45, 51],
    info: 245,
    bpm: 214,
    energy: [21, 27, 33, 39, 45, 51, 190, 226, 214, 196],
};

const FIRE_256: ExtendedPalette = ExtendedPalette {
    dancer: [52, 88, 124, 160, 196, 202, 208, 214, 220, 226],
    shadow: [233, 233, 234, 234, 235, 235, 236, 52, 52, 88],
    ground: 94,
    bass: [52, 88, 124, 160, 196, 196, 202, 202, 208, 208],
    mid: [130, 136, 166, 172, 202, 208, 214, 214, 220, 220],
    treble: [220, 221, 222, 223, 224, 225, 226, 227, 228, 229],
    info: 223,
    bpm: 208,
    energy: [52, 88, 124, 160, 196, 202, 208, 214, 220, 226],
};

const OCEAN_256: ExtendedPalette = ExtendedPalette {
    dancer: [17, 18, 19, 20, 27, 33, 39, 45, 51, 87],
    shadow: [232, 233, 234, 235, 236, 17, 17, 18, 18, 19],
    ground: 24,
    bass: [17, 18, 19, 20, 21, 26, 27, 32, 33, 38],
    mid: [23, 29, 30, 36, 37, 43, 44, 50, 51, 87],
    treble: [39, 45, 51, 87, 123, 159, 195, 231, 231, 231],
    info: 152,
    bpm: 81,
    energy: [17, 19, 21, 27, 33, 39, 45, 51, 87, 123],
};

const MATRIX_256: ExtendedPalette = ExtendedPalette {
    dancer: [22, 22, 28, 28, 34, 34, 40, 46, 82, 118],
    shadow: [232, 233, 234, 235, 236, 22, 22, 22, 28, 28],
    ground: 22,
    bass: [22, 28, 34, 40, 46, 46, 82, 82, 118, 118],
    mid: [22, 28, 34, 40, 46, 82, 118, 154, 156, 158],
    treble: [46, 82, 118, 154, 156, 158, 194, 194, 231, 231],
    info: 35,
    bpm: 118,
    energy: [22, 28, 34, 40, 46, 82, 118, 154, 190, 226],
};

const MONO_256: ExtendedPalette = ExtendedPalette {
    dancer: [238, 240, 242, 244, 246, 248, 250, 252, 254, 255],
    shadow: [232, 233, 233, 234, 234, 235, 235, 236, 236, 237],
    ground: 240,
    bass: [236, 238, 240, 242, 244, 246, 248, 250, 252, 255],
    mid: [236, 238, 240, 242, 244, 246, 248, 250, 252, 255],
    treble: [236, 238, 240, 242, 244, 246, 248, 250, 252, 255],
    info: 247,
    bpm: 255,
    energy: [236, 238, 240, 242, 244, 246, 248, 250, 252, 255],
};

const SPECTRUM_16: BasicPalette = BasicPalette {
    dancer: [Color::Blue, Color::Cyan, Color::Yellow, Color::Red],
    shadow: [Color::DarkGray; BASIC_STEPS],
    ground: Color::DarkGray,
    bass: [Color::Red, Color::Red, Color::LightRed, Color::LightMagenta],
    mid: [Color::Green, Color::Green, Color::LightGreen, Color::LightCyan],
    treble: [Color::Blue, Color::Blue, Color::LightBlue, Color::LightCyan],
    info: Color::Gray,
    bpm: Color::LightYellow,
    energy: [Color::Blue, Color::Cyan, Color::Yellow, Color::Red],
};

const FIRE_16: BasicPalette = BasicPalette {
    dancer: [Color::Red, Color::LightRed, Color::Yellow, Color::LightYellow],
    shadow: [Color::DarkGray; BASIC_STEPS],
    ground: Color::DarkGray,
    bass: [Color::Red, Color::Red, Color::LightRed, Color::LightRed],
    mid: [Color::Yellow, Color::Yellow, Color::LightYellow, Color::LightYellow],
    treble: [Color::LightYellow, Color::LightYellow, Color::White, Color::White],
    info: Color::Gray,
    bpm: Color::LightRed,
    energy: [Color::Red, Color::LightRed, Color::Yellow, Color::LightYellow],
};

const OCEAN_16: BasicPalette = BasicPalette {
    dancer: [Color::Blue, Color::LightBlue, Color::Cyan, Color::LightCyan],
    shadow: [Color::DarkGray; BASIC_STEPS],
    ground: Color::Blue,
    bass: [Color::Blue, Color::Blue, Color::LightBlue, Color::LightBlue],
    mid: [Color::Cyan, Color::Cyan, Color::LightCyan, Color::LightCyan],
    treble: [Color::LightCyan, Color::LightCyan, Color::White, Color::White],
    info: Color::Gray,
    bpm: Color::LightCyan,
    energy: [Color::Blue, Color::LightBlue, Color::Cyan, Color::LightCyan],
};

const MATRIX_16: BasicPalette = BasicPalette {
    dancer: [Color::Green, Color::Green, Color::LightGreen, Color::LightGreen],
    shadow: [Color::DarkGray; BASIC_STEPS],
    ground: Color::Green,
    bass: [Color::Green, Color::Green, Color::LightGreen, Color::LightGreen],
    mid: [Color::Green, Color::Green, Color::LightGreen, Color::LightGreen],
    treble: [Color::LightGreen, Color::LightGreen, Color::White, Color::White],
    info: Color::Green,
    bpm: Color::LightGreen,
    energy: [Color::Green, Color::Green, Color::LightGreen, Color::White],
};

const MONO_16: BasicPalette = BasicPalette {
    dancer: [Color::DarkGray, Color::Gray, Color::White, Color::White],
    shadow: [Color::DarkGray; BASIC_STEPS],
    ground: Color::DarkGray,
    bass: [Color::DarkGray, Color::Gray, Color::Gray, Color::White],
    mid: [Color::DarkGray, Color::Gray, Color::Gray, Color::White],
    treble: [Color::DarkGray, Color::Gray, Color::Gray, Color::White],
    info: Color::Gray,
    bpm: Color::White,
    energy: [Color::DarkGray, Color::Gray, Color::White, Color::White],
};

fn extended(theme: Theme) -> &'static ExtendedPalette {
    match theme {
        Theme::Spectrum => &SPECTRUM_256,
        Theme::Fire => &FIRE_256,
        Theme::Ocean => &OCEAN_256,
        Theme::Matrix => &MATRIX_256,
        Theme::Mono => &MONO_256,
    }
}

fn basic(theme: Theme) -> &'static BasicPalette {
    match theme {
        Theme::Spectrum => &SPECTRUM_16,
        Theme::Fire => &FIRE_16,
        Theme::Ocean => &OCEAN_16,
        Theme::Matrix => &MATRIX_16,
        Theme::Mono => &MONO_16,
    }
}

/// Quantize an energy value into a gradient bucket.
pub(crate) fn bucket(energy: f32, steps: usize) -> usize {
    let e = energy.clamp(0.0, 1.0);
    (e * (steps - 1) as f32).floor() as usize
}

/// The active color table. Switching themes replaces one field, so the
/// change is atomic from the renderer's perspective: no frame ever sees a
/// partially applied palette.
#[derive(Debug, Clone)]
pub struct ColorTable {
    theme: Theme,
    extended_color: bool,
}

impl ColorTable {
    pub fn new(caps: &TermCaps) -> Self {
        ColorTable {
            theme: Theme::default(),
            extended_color: caps.supports_enhanced_color(),
        }
    }

    /// Construct with an explicit capability tier. Used by tests.
    pub fn with_support(extended_color: bool) -> Self {
        ColorTable {
            theme: Theme::default(),
            extended_color,
        }
    }

    /// Switch the active palette. Takes effect with the next lookup.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn supports_256(&self) -> bool {
        self.extended_color
    }

    /// Number of gradient buckets on the current tier.
    pub fn buckets(&self) -> usize {
        if self.extended_color {
            GRADIENT_STEPS
        } else {
            BASIC_STEPS
        }
    }

    /// Look up the color for `channel` at the given energy/intensity.
    ///
    /// Pure and deterministic. Energy is clamped to `[0, 1]`; channels
    /// without a gradient (ground, info, bpm) ignore it.
    pub fn color_for(&self, channel: Channel, energy: f32) -> Color {
        if self.extended_color {
            let p = extended(self.theme);
            let i = bucket(energy, GRADIENT_STEPS);
            match channel {
                Channel::Dancer => Color::Indexed(p.dancer[i]),
                Channel::Shadow => Color::Indexed(p.shadow[i]),
                Channel::Ground => Color::Indexed(p.ground),
                Channel::Bass => Color::Indexed(p.bass[i]),
                Channel::Mid => Color::Indexed(p.mid[i]),
                Channel::Treble => Color::Indexed(p.treble[i]),
                Channel::Info => Color::Indexed(p.info),
                Channel::Bpm => Color::Indexed(p.bpm),
                Channel::Energy => Color::Indexed(p.energy[i]),
            }
        } else {
            let p = basic(self.theme);
            let i = bucket(energy, BASIC_STEPS);
            match channel {
                Channel::Dancer => p.dancer[i],
                Channel::Shadow => p.shadow[i],
                Channel::Ground => p.ground,
                Channel::Bass => p.bass[i],
                Channel::Mid => p.mid[i],
                Channel::Treble => p.treble[i],
                Channel::Info => p.info,
                Channel::Bpm => p.bpm,
                Channel::Energy => p.energy[i],
            }
        }
    }
}
