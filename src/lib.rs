//! # Introduction
//!
//! dancetty is the rendering half of a terminal music visualizer. An
//! upstream collaborator feeds it, once per tick, an animation frame (a
//! fixed-size grid of glyphs) and three band intensities; the engine owns
//! the terminal and turns that into a composed picture (dancer, ground
//! line, mirrored shadow, frequency bars, energy gauge, status line)
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Render pipeline
//!
//! ```text
//! Scene (frame + intensities) → clear/resize absorb → layers back-to-front → flush
//! ```
//!
//! 1. [`scene`] — the read-only input model handed over each tick.
//! 2. [`caps`] — terminal capability values read from the environment;
//!    missing capabilities downgrade the palette and glyph set silently.
//! 3. [`render`] — the core: surface ownership, the color theme table,
//!    per-frame geometry, the layer compositor, and the engine facade.
//! 4. [`picker`] — an optional audio-source selection menu shown before
//!    the render loop.
//!
//! The entry point for consumers is [`Engine`]: construct it with
//! [`Engine::init`] and call [`Engine::render`] once per tick with the
//! current [`Scene`].
//!
//! [`Engine`]: render::Engine
//! [`Engine::init`]: render::Engine::init
//! [`Engine::render`]: render::Engine::render
//! [`Scene`]: scene::Scene

pub mod caps;
pub mod error;
pub mod picker;
pub mod render;
pub mod scene;

pub use caps::TermCaps;
pub use error::{RenderError, Result};
pub use picker::AudioSource;
pub use render::{Engine, EngineConfig, Theme};
pub use scene::{AnimationFrame, FrameSize, HudStats, Intensity, Scene};
