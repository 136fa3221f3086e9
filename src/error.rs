//! Error types for the rendering engine.
//!
//! The taxonomy is deliberately small. Degraded color capability is not an
//! error at all (the palette silently uses its reduced table), and a layer
//! that does not fit the current terminal is skipped, not reported. What
//! remains is terminal I/O, split by when it is allowed to be fatal:
//! [`RenderError::Restore`] failures surface at shutdown, while draw
//! failures mid-loop are returned so the caller can skip the frame and keep
//! the terminal in a consistent state.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors produced by the rendering engine.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Entering raw mode or the alternate screen failed at startup.
    #[error("terminal initialization failed: {0}")]
    Init(#[source] std::io::Error),

    /// A draw or input operation on the live terminal failed. Callers should
    /// skip the frame and continue rather than tear down mid-loop.
    #[error("terminal draw failed: {0}")]
    Draw(#[from] std::io::Error),

    /// Restoring the original terminal mode failed. This is the one failure
    /// that is fatal, and only at shutdown.
    #[error("terminal restore failed: {0}")]
    Restore(#[source] std::io::Error),
}
