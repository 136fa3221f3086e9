//! Terminal surface ownership.
//!
//! [`Surface`] is the exclusive owner of the display handle: raw mode,
//! alternate screen, hidden cursor, the tracked terminal size, and the
//! pending-resize flag. The resize notification is two-phase: the notify
//! side ([`Surface::note_resize`], or a host's signal handler holding the
//! [`Surface::resize_notifier`] handle) performs a single atomic store and
//! nothing else, so it is safe from an interrupt-like context; the render
//! loop consumes the flag synchronously in [`Surface::check_resize`] /
//! [`Surface::clear_frame`]. Teardown restores the original terminal mode on
//! every path: explicitly via [`Surface::shutdown`], or best-effort on drop.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};

use crate::error::{RenderError, Result};

/// The surface type the demo binary runs on.
pub type StdSurface = Surface<CrosstermBackend<Stdout>>;

/// Owns the terminal and its mode for the lifetime of the engine.
pub struct Surface<B: Backend> {
    terminal: Terminal<B>,
    rows: u16,
    cols: u16,
    resize_pending: Arc<AtomicBool>,
    /// Whether we changed the real tty's mode and owe it a restore.
    raw_mode: bool,
}

impl StdSurface {
    /// Enter raw, non-blocking, cursor-hidden mode on stdout.
    ///
    /// Color capability is not probed here; a terminal without extended
    /// color simply gets the reduced palette. Nothing about initialization
    /// aborts for a less capable terminal.
    pub fn init() -> Result<Self> {
        enable_raw_mode().map_err(RenderError::Init)?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = disable_raw_mode();
            return Err(RenderError::Init(e));
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(RenderError::Init)?;
        let mut surface = Surface::wrap(terminal, true);
        surface.refresh_size()?;
        tracing::debug!(rows = surface.rows, cols = surface.cols, "surface initialized");
        Ok(surface)
    }
}

impl<B: Backend> Surface<B> {
    /// Wrap an existing terminal without touching tty modes. This is the
    /// entry point for tests running on `ratatui::backend::TestBackend`.
    pub fn with_terminal(terminal: Terminal<B>) -> Result<Self> {
        let mut surface = Surface::wrap(terminal, false);
        surface.refresh_size()?;
        Ok(surface)
    }

    fn wrap(terminal: Terminal<B>, raw_mode: bool) -> Self {
        Surface {
            terminal,
            rows: 0,
            cols: 0,
            resize_pending: Arc::new(AtomicBool::new(false)),
            raw_mode,
        }
    }

    /// Current logical size as `(rows, cols)`.
    pub fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    /// The underlying terminal, for backend inspection in tests.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Handle for an out-of-band notifier (e.g. a SIGWINCH handler). The
    /// holder may only store `true`; all re-querying happens on the render
    /// loop side.
    pub fn resize_notifier(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.resize_pending)
    }

    /// Record that the host environment reported a resize. A single atomic
    /// store; no I/O, no allocation.
    pub fn note_resize(&self) {
        self.resize_pending.store(true, Ordering::Release);
    }

    /// Consume a pending resize notification, re-querying the size exactly
    /// once per notification. Idempotent: a second call without a new
    /// notification returns `false` and has no effect.
    pub fn check_resize(&mut self) -> Result<bool> {
        if self.resize_pending.swap(false, Ordering::AcqRel) {
            self.refresh_size()?;
            tracing::debug!(rows = self.rows, cols = self.cols, "terminal resized");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Prepare the surface for a new frame.
    ///
    /// On a pending resize the display buffer is fully reinitialized so no
    /// glyph remnants from the old dimensions survive; otherwise the next
    /// draw's diff performs a lightweight erase. The size is re-read either
    /// way.
    pub fn clear_frame(&mut self) -> Result<()> {
        if self.check_resize()? {
            self.terminal.clear()?;
        }
        self.refresh_size()
    }

    /// Draw one frame's worth of layers and flush.
    pub fn draw<F: FnOnce(&mut Frame)>(&mut self, render: F) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Non-blocking key poll. Returns immediately with `None` when no input
    /// is pending. Resize events encountered while draining the queue raise
    /// the pending flag and are not returned.
    pub fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
                Event::Resize(_, _) => self.note_resize(),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Restore the original terminal mode. Failure here is the one fatal
    /// error in the crate, and only at shutdown.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.raw_mode {
            self.raw_mode = false;
            disable_raw_mode().map_err(RenderError::Restore)?;
            execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
                .map_err(RenderError::Restore)?;
            tracing::debug!("surface restored");
        }
        Ok(())
    }

    fn refresh_size(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        self.rows = size.height;
        self.cols = size.width;
        Ok(())
    }
}

impl<B: Backend> Drop for Surface<B> {
    fn drop(&mut self) {
        // covers panic and early-return paths; shutdown() already cleared
        // raw_mode on the orderly path
        if self.raw_mode {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn test_surface(rows: u16, cols: u16) -> Surface<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(cols, rows)).expect("terminal");
        Surface::with_terminal(terminal).expect("surface")
    }

    #[test]
    fn check_resize_consumes_notification_once() {
        let mut surface = test_surface(24, 80);
        assert!(!surface.check_resize().unwrap());
        surface.note_resize();
        assert!(surface.check_resize().unwrap());
        assert!(!surface.check_resize().unwrap());
    }

    #[test]
    fn check_resize_requeries_size() {
        let mut surface = test_surface(24, 80);
        assert_eq!(surface.size(), (24, 80));
        surface.terminal.backend_mut().resize(40, 10);
        surface.note_resize();
        assert!(surface.check_resize().unwrap());
        assert_eq!(surface.size(), (10, 40));
    }

    #[test]
    fn clear_frame_rereads_size_without_notification() {
        let mut surface = test_surface(24, 80);
        surface.terminal.backend_mut().resize(100, 30);
        surface.clear_frame().unwrap();
        assert_eq!(surface.size(), (30, 100));
    }

    #[test]
    fn notifier_handle_raises_the_flag() {
        let mut surface = test_surface(24, 80);
        let notifier = surface.resize_notifier();
        notifier.store(true, Ordering::Release);
        assert!(surface.check_resize().unwrap());
    }
}
