//! Terminal capability detection from the environment.
//!
//! The renderer never speaks escape-sequence queries itself; anything that
//! needs a control-sequence round trip (Sixel DA1 probing and friends) lives
//! outside this crate. What we read here are plain environment values
//! (`TERM`, `COLORTERM`, `TERM_PROGRAM`, and the locale), which is enough to
//! pick a color tier and a glyph tier. Absence of a capability downgrades
//! silently; it never errors.

use std::fmt;

/// Detected terminal capabilities.
#[derive(Debug, Clone)]
pub struct TermCaps {
    term_name: String,
    truecolor: bool,
    extended_color: bool,
    unicode: bool,
    kitty: bool,
    iterm2: bool,
}

impl TermCaps {
    /// Detect capabilities from the process environment.
    pub fn detect() -> Self {
        let term_name = std::env::var("TERM").unwrap_or_else(|_| "unknown".into());
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        let term_program = std::env::var("TERM_PROGRAM").unwrap_or_default();
        let locale = std::env::var("LC_ALL")
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_default();
        Self::from_env_values(&term_name, &colorterm, &term_program, &locale)
    }

    /// Build capabilities from explicit env values. Used by [`detect`] and
    /// directly by tests.
    ///
    /// [`detect`]: TermCaps::detect
    pub fn from_env_values(term: &str, colorterm: &str, term_program: &str, locale: &str) -> Self {
        let truecolor = colorterm.contains("truecolor") || colorterm.contains("24bit");
        let extended_color = truecolor || term.contains("256color");
        let locale_upper = locale.to_ascii_uppercase();
        let unicode = locale_upper.contains("UTF-8") || locale_upper.contains("UTF8");
        let kitty = term.contains("kitty");
        let iterm2 = term_program == "iTerm.app";
        TermCaps {
            term_name: term.to_owned(),
            truecolor,
            extended_color,
            unicode,
            kitty,
            iterm2,
        }
    }

    pub fn term_name(&self) -> &str {
        &self.term_name
    }

    /// True when the terminal advertises at least 256 colors.
    pub fn supports_enhanced_color(&self) -> bool {
        self.extended_color
    }

    pub fn supports_truecolor(&self) -> bool {
        self.truecolor
    }

    /// True when the locale indicates multi-byte glyphs will display.
    pub fn supports_unicode(&self) -> bool {
        self.unicode
    }

    pub fn max_colors(&self) -> u32 {
        if self.truecolor {
            16_777_216
        } else if self.extended_color {
            256
        } else {
            16
        }
    }
}

impl fmt::Display for TermCaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yn = |b: bool| if b { "yes" } else { "no" };
        writeln!(f, "Terminal Capabilities")?;
        writeln!(f, "=====================")?;
        writeln!(f, "Terminal:    {}", self.term_name)?;
        writeln!(f, "True color:  {}", yn(self.truecolor))?;
        writeln!(f, "Max colors:  {}", self.max_colors())?;
        writeln!(f, "Unicode:     {}", yn(self.unicode))?;
        writeln!(f, "Kitty:       {}", yn(self.kitty))?;
        write!(f, "iTerm2:      {}", yn(self.iterm2))
    }
}
