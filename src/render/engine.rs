//! Rendering engine facade.
//!
//! [`Engine`] sequences one frame: absorb any pending resize and clear,
//! compose the layers back-to-front, flush. It owns the surface, the color
//! table, and the ground/shadow toggles, and enforces the state machine
//! `Uninitialized → Active → ShuttingDown → Terminated`. Drawing is only
//! valid in `Active`; a draw call in any other state is a contract
//! violation that asserts in test builds and is a no-op in release. Theme
//! and toggle changes are between-frames operations.

use std::io::Stdout;

use ratatui::backend::{Backend, CrosstermBackend};

use super::geometry::Layout;
use super::layers;
use super::palette::{ColorTable, Theme};
use super::surface::Surface;
use crate::caps::TermCaps;
use crate::error::Result;
use crate::picker::{self, AudioSource};
use crate::scene::Scene;
use crossterm::event::KeyEvent;

/// Configuration consumed at engine start; everything here can also be
/// changed between frames through the setters.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub theme: Theme,
    pub ground: bool,
    pub shadow: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            theme: Theme::default(),
            ground: true,
            shadow: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Uninitialized,
    Active,
    ShuttingDown,
    Terminated,
}

/// The rendering engine. Generic over the terminal backend so tests can
/// drive it with `ratatui::backend::TestBackend`.
pub struct Engine<B: Backend> {
    surface: Surface<B>,
    caps: TermCaps,
    colors: ColorTable,
    state: EngineState,
    ground: bool,
    shadow: bool,
}

impl Engine<CrosstermBackend<Stdout>> {
    /// Detect terminal capabilities, take ownership of stdout, and enter
    /// the `Active` state.
    pub fn init(config: EngineConfig) -> Result<Self> {
        let caps = TermCaps::detect();
        let surface = Surface::init()?;
        Ok(Self::assemble(surface, caps, config))
    }
}

impl<B: Backend> Engine<B> {
    /// Build an engine over an existing surface. Used by tests.
    pub fn with_surface(surface: Surface<B>, caps: TermCaps, config: EngineConfig) -> Self {
        Self::assemble(surface, caps, config)
    }

    fn assemble(surface: Surface<B>, caps: TermCaps, config: EngineConfig) -> Self {
        let mut colors = ColorTable::new(&caps);
        colors.apply_theme(config.theme);
        let mut engine = Engine {
            surface,
            caps,
            colors,
            state: EngineState::Uninitialized,
            ground: config.ground,
            shadow: config.shadow,
        };
        engine.state = EngineState::Active;
        tracing::debug!(
            theme = config.theme.label(),
            extended_color = engine.colors.supports_256(),
            "render engine active"
        );
        engine
    }

    /// Render one frame.
    ///
    /// Per-frame sequence invariant: the surface is cleared (absorbing any
    /// pending resize) before any layer draws, and the output is flushed
    /// after all of them. Layer order is fixed: ground, shadow, dancer,
    /// bars, energy meter, HUD, status.
    pub fn render(&mut self, scene: &Scene) -> Result<()> {
        if self.state != EngineState::Active {
            debug_assert!(false, "draw call outside the Active state");
            return Ok(());
        }
        self.surface.clear_frame()?;

        let (rows, cols) = self.surface.size();
        let layout = Layout::compute(rows, cols, scene.frame.size());
        let energy = scene.levels.energy();
        let unicode = self.caps.supports_unicode();
        let (ground, shadow) = (self.ground, self.shadow);
        let colors = &self.colors;

        self.surface.draw(|frame| {
            let buf = frame.buffer_mut();
            if ground {
                layers::draw_ground(buf, &layout, colors, unicode);
            }
            if shadow {
                layers::draw_shadow(buf, &layout, colors, scene.frame, energy);
            }
            layers::draw_dancer(buf, &layout, colors, scene.frame, energy);
            layers::draw_bars(buf, &layout, colors, &scene.levels, unicode);
            layers::draw_energy_meter(buf, &layout, colors, energy, unicode);
            if let Some(hud) = scene.hud {
                layers::draw_hud(buf, &layout, colors, &hud);
            }
            layers::draw_status(buf, &layout, colors, scene);
        })
    }

    /// Switch the color theme. Takes effect with the next frame.
    pub fn set_theme(&mut self, theme: Theme) {
        tracing::debug!(theme = theme.label(), "theme switched");
        self.colors.apply_theme(theme);
    }

    pub fn theme(&self) -> Theme {
        self.colors.theme()
    }

    pub fn set_ground(&mut self, enabled: bool) {
        self.ground = enabled;
    }

    pub fn ground(&self) -> bool {
        self.ground
    }

    pub fn set_shadow(&mut self, enabled: bool) {
        self.shadow = enabled;
    }

    pub fn shadow(&self) -> bool {
        self.shadow
    }

    pub fn supports_256(&self) -> bool {
        self.colors.supports_256()
    }

    pub fn caps(&self) -> &TermCaps {
        &self.caps
    }

    /// Current terminal size as `(rows, cols)`.
    pub fn size(&self) -> (u16, u16) {
        self.surface.size()
    }

    /// The owned surface, for backend inspection in tests.
    pub fn surface(&self) -> &Surface<B> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface<B> {
        &mut self.surface
    }

    /// Non-blocking key poll; see [`Surface::poll_key`].
    pub fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        self.surface.poll_key()
    }

    /// Consume a pending resize; see [`Surface::check_resize`].
    pub fn check_resize(&mut self) -> Result<bool> {
        self.surface.check_resize()
    }

    /// Run the audio-source selection menu on this engine's surface.
    /// Returns the index of the chosen source, or `None` if cancelled.
    pub fn pick_source(&mut self, sources: &[AudioSource]) -> Result<Option<usize>> {
        picker::run(&mut self.surface, sources, &self.colors)
    }

    /// Leave `Active`, restore the terminal, and terminate. Restore failure
    /// is fatal here and nowhere else.
    pub fn shutdown(mut self) -> Result<()> {
        self.state = EngineState::ShuttingDown;
        self.surface.shutdown()?;
        self.state = EngineState::Terminated;
        Ok(())
    }
}
