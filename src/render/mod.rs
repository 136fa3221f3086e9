//! The rendering core.
//!
//! Four pieces, composed by the [`engine::Engine`] facade every frame:
//!
//! - **[`surface`]** — terminal ownership: raw mode, size tracking, the
//!   pending-resize flag, non-blocking key polling, restore-on-exit
//! - **[`palette`]** — the color theme table mapping (theme, channel,
//!   energy) to concrete colors, with a reduced tier for 16-color terminals
//! - **[`geometry`]** — per-frame layout math and the skip rules for
//!   undersized terminals
//! - **[`layers`]** — stateless back-to-front draw functions (ground,
//!   shadow, dancer, bars, energy meter, HUD, status)

pub mod engine;
pub mod geometry;
pub mod layers;
pub mod palette;
pub mod surface;

pub use engine::{Engine, EngineConfig};
pub use geometry::Layout;
pub use palette::{Channel, ColorTable, Theme};
pub use surface::{StdSurface, Surface};
