//! Audio-source selection menu.
//!
//! The renderer does not enumerate audio devices; the caller supplies a
//! list of `{id, label}` entries (however it obtained them) and gets back
//! the chosen index. The menu itself is a plain up/down/enter/q list drawn
//! on the engine's surface before the render loop starts.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    style::{Modifier, Style},
    Frame,
};

use crate::error::Result;
use crate::render::layers::put_str;
use crate::render::palette::{Channel, ColorTable};
use crate::render::surface::Surface;

/// One selectable audio source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    pub id: String,
    pub label: String,
}

impl AudioSource {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        AudioSource {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Parse a `id=label,id=label` list, the format of the
    /// `DANCETTY_SOURCES` environment variable. Entries without an `=` use
    /// the id as their label; empty entries are skipped.
    pub fn parse_list(s: &str) -> Vec<AudioSource> {
        s.split(',')
            .filter_map(|entry| {
                let entry = entry.trim();
                if entry.is_empty() {
                    return None;
                }
                Some(match entry.split_once('=') {
                    Some((id, label)) => AudioSource::new(id.trim(), label.trim()),
                    None => AudioSource::new(entry, entry),
                })
            })
            .collect()
    }
}

/// Selection cursor with wrap-around.
#[derive(Debug, Default)]
pub struct PickerState {
    selection: usize,
}

impl PickerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn move_up(&mut self, len: usize) {
        if len > 0 {
            self.selection = (self.selection + len - 1) % len;
        }
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 {
            self.selection = (self.selection + 1) % len;
        }
    }
}

/// Draw the menu. Layout follows the classic picker: title, key help,
/// source list from row 7, selected id on the bottom row.
pub fn render_picker(
    frame: &mut Frame,
    sources: &[AudioSource],
    state: &PickerState,
    colors: &ColorTable,
) {
    let buf = frame.buffer_mut();
    let rows = buf.area.height;
    let info = Style::default().fg(colors.color_for(Channel::Info, 0.0));
    let title = info.add_modifier(Modifier::BOLD);

    put_str(buf, 2, 2, "dancetty - audio source selection", title);
    put_str(
        buf,
        2,
        4,
        "UP/DOWN to select, ENTER to confirm, 'q' to cancel",
        info,
    );

    for (i, source) in sources.iter().enumerate() {
        let y = 7 + i as u16;
        if y + 2 >= rows {
            break;
        }
        let line = format!("[{}] {}", i, source.label);
        if i == state.selection {
            let selected = info.add_modifier(Modifier::REVERSED);
            put_str(buf, 2, y, "> ", selected);
            put_str(buf, 4, y, &line, selected);
        } else {
            put_str(buf, 4, y, &line, info);
        }
    }

    if let Some(source) = sources.get(state.selection) {
        let line = format!("Selected: {}", source.id);
        put_str(buf, 2, rows.saturating_sub(2), &line, info);
    }
}

/// Run the menu loop until a source is confirmed or the menu is cancelled.
/// Returns the chosen index. An empty list cancels immediately.
pub fn run<B: Backend>(
    surface: &mut Surface<B>,
    sources: &[AudioSource],
    colors: &ColorTable,
) -> Result<Option<usize>> {
    if sources.is_empty() {
        return Ok(None);
    }
    let mut state = PickerState::new();
    loop {
        surface.clear_frame()?;
        surface.draw(|frame| render_picker(frame, sources, &state, colors))?;

        // short poll so a resize redraws promptly
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Up => state.move_up(sources.len()),
                KeyCode::Down => state.move_down(sources.len()),
                KeyCode::Enter => return Ok(Some(state.selection())),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(None),
                _ => {}
            },
            Event::Resize(_, _) => surface.note_resize(),
            _ => {}
        }
    }
}
