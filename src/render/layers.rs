//! Layer compositor.
//!
//! Stateless draw functions, one per visual layer, called back-to-front by
//! the engine: ground line, mirrored shadow, dancer glyphs, frequency bars,
//! energy gauge, perf HUD, status text. Each function takes the frame's
//! [`Layout`] and writes directly into a [`Buffer`] at absolute positions,
//! clipped to the terminal bounds. A layer that does not fit the current
//! geometry draws nothing at all.

use ratatui::{
    buffer::Buffer,
    style::{Modifier, Style},
};

use super::geometry::{Layout, BAR_WIDTH, ENERGY_WIDTH};
use super::palette::{Channel, ColorTable};
use crate::scene::{AnimationFrame, HudStats, Intensity, Scene};

/// Write a string at `(x, y)`, clipped to the buffer's right edge.
pub(crate) fn put_str(buf: &mut Buffer, x: u16, y: u16, s: &str, style: Style) {
    let area = buf.area;
    if y >= area.bottom() || x >= area.right() {
        return;
    }
    let max_width = usize::from(area.right() - x);
    buf.set_stringn(x, y, s, max_width, style);
}

/// Horizontal rule under the dancer, with a tick mark every 4 columns.
pub fn draw_ground(buf: &mut Buffer, layout: &Layout, colors: &ColorTable, unicode: bool) {
    if !layout.ground_visible() {
        return;
    }
    let Some((start, end)) = layout.ground_span() else {
        return;
    };
    let (rule, tick) = if unicode { ('─', '┴') } else { ('-', '+') };
    let line: String = (start..end)
        .map(|x| if (x - start) % 4 == 0 { tick } else { rule })
        .collect();
    let style = Style::default()
        .fg(colors.color_for(Channel::Ground, 0.0))
        .add_modifier(Modifier::DIM);
    put_str(buf, start, layout.ground_row, &line, style);
}

/// Mirrored reflection of the frame's bottom rows, just below the ground
/// line. Nearest-to-ground rows first; rows that would enter the reserved
/// bottom margin are omitted.
pub fn draw_shadow(
    buf: &mut Buffer,
    layout: &Layout,
    colors: &ColorTable,
    frame: &AnimationFrame,
    energy: f32,
) {
    let n = layout.shadow_rows();
    if n == 0 {
        return;
    }
    let style = Style::default()
        .fg(colors.color_for(Channel::Shadow, energy))
        .add_modifier(Modifier::DIM);
    let height = frame.size().height;
    for i in 0..n {
        let src = height - 1 - i;
        put_str(
            buf,
            layout.start_col,
            layout.shadow_row + i,
            frame.row(src),
            style,
        );
    }
}

/// The animation frame itself, one render row per input row, bold, colored
/// by overall energy. Rows past the bottom of the terminal are not drawn.
pub fn draw_dancer(
    buf: &mut Buffer,
    layout: &Layout,
    colors: &ColorTable,
    frame: &AnimationFrame,
    energy: f32,
) {
    let style = Style::default()
        .fg(colors.color_for(Channel::Dancer, energy))
        .add_modifier(Modifier::BOLD);
    for row in 0..layout.dancer_rows() {
        put_str(
            buf,
            layout.start_col,
            layout.start_row + row,
            frame.row(row),
            style,
        );
    }
}

/// Render one bracket-delimited block-fill bar into a string.
fn bar_text(level: f32, unicode: bool) -> String {
    let fill = (level.clamp(0.0, 1.0) * f32::from(BAR_WIDTH)).round() as u16;
    let block = if unicode { '█' } else { '#' };
    let mut s = String::with_capacity(usize::from(BAR_WIDTH) + 2);
    s.push('[');
    for i in 0..BAR_WIDTH {
        s.push(if i < fill { block } else { ' ' });
    }
    s.push(']');
    s
}

/// Bass/mid/treble bars with their labels, each colored by its own
/// intensity bucket. Skipped entirely when the terminal is too short.
pub fn draw_bars(
    buf: &mut Buffer,
    layout: &Layout,
    colors: &ColorTable,
    levels: &Intensity,
    unicode: bool,
) {
    if !layout.bars_visible() {
        return;
    }
    let bars = [
        ("BASS", Channel::Bass, levels.bass()),
        ("MID", Channel::Mid, levels.mid()),
        ("TREBLE", Channel::Treble, levels.treble()),
    ];
    let label_row = layout.bar_row.saturating_sub(1);
    for (i, (label, channel, level)) in bars.into_iter().enumerate() {
        let col = layout.bar_cols[i];
        let color = colors.color_for(channel, level);
        let label_col = col + BAR_WIDTH / 2 - (label.len() / 2) as u16;
        put_str(buf, label_col, label_row, label, Style::default().fg(color));
        put_str(
            buf,
            col,
            layout.bar_row,
            &bar_text(level, unicode),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );
    }
}

/// 20-cell gauge below the bars, filled proportionally to overall energy.
pub fn draw_energy_meter(
    buf: &mut Buffer,
    layout: &Layout,
    colors: &ColorTable,
    energy: f32,
    unicode: bool,
) {
    if !layout.bars_visible() {
        return;
    }
    let fill = (energy.clamp(0.0, 1.0) * f32::from(ENERGY_WIDTH)).round() as u16;
    let (full, empty) = if unicode { ('▓', '░') } else { ('#', '.') };
    let mut s = String::from("Energy: ");
    for i in 0..ENERGY_WIDTH {
        s.push(if i < fill { full } else { empty });
    }
    let style = Style::default().fg(colors.color_for(Channel::Energy, energy));
    put_str(buf, layout.energy_col, layout.energy_row, &s, style);
}

/// Caller-supplied performance readout, top-right corner.
pub fn draw_hud(buf: &mut Buffer, layout: &Layout, colors: &ColorTable, stats: &HudStats) {
    let text = format!("{:5.1} fps | {:5.2} ms", stats.fps, stats.frame_ms);
    let col = layout.cols.saturating_sub(text.len() as u16 + 2);
    let style = Style::default().fg(colors.color_for(Channel::Info, 0.0));
    put_str(buf, col, 0, &text, style);
}

/// Bottom status line: caller text, or the frame/intensity readout. Always
/// drawn last so no other layer can overdraw it.
pub fn draw_status(buf: &mut Buffer, layout: &Layout, colors: &ColorTable, scene: &Scene) {
    let style = Style::default().fg(colors.color_for(Channel::Info, 0.0));
    match scene.status {
        Some(text) => put_str(buf, 2, layout.status_row, text, style),
        None => {
            let levels = scene.levels;
            let text = format!(
                "Frame: {} | B:{:.2} M:{:.2} T:{:.2} | Press 'q' to quit",
                scene.frame_no,
                levels.bass(),
                levels.mid(),
                levels.treble()
            );
            put_str(buf, 2, layout.status_row, &text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::FrameSize;
    use ratatui::layout::Rect;

    fn buffer(rows: u16, cols: u16) -> Buffer {
        Buffer::empty(Rect::new(0, 0, cols, rows))
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.left()..area.right())
            .map(|x| buf.get(x, y).symbol().to_owned())
            .collect()
    }

    #[test]
    fn bar_text_fill_is_rounded() {
        assert_eq!(bar_text(0.8, false), format!("[{}{}]", "#".repeat(16), " ".repeat(4)));
        assert_eq!(bar_text(0.0, false), format!("[{}]", " ".repeat(20)));
        assert_eq!(bar_text(1.0, true), format!("[{}]", "█".repeat(20)));
        // 0.525 * 20 = 10.5 rounds up
        assert_eq!(bar_text(0.525, false).matches('#').count(), 11);
    }

    #[test]
    fn ground_draws_rule_with_ticks() {
        let mut buf = buffer(24, 80);
        let layout = Layout::compute(24, 80, FrameSize::new(32, 12));
        let colors = ColorTable::with_support(true);
        draw_ground(&mut buf, &layout, &colors, true);
        let (start, _) = layout.ground_span().unwrap();
        assert_eq!(buf.get(start, layout.ground_row).symbol(), "┴");
        assert_eq!(buf.get(start + 1, layout.ground_row).symbol(), "─");
        assert_eq!(buf.get(start + 4, layout.ground_row).symbol(), "┴");
    }

    #[test]
    fn ground_skipped_near_bottom_edge() {
        // 14 rows, frame height 12: ground would land in the reserved margin
        let mut buf = buffer(14, 80);
        let layout = Layout::compute(14, 80, FrameSize::new(32, 12));
        let colors = ColorTable::with_support(true);
        draw_ground(&mut buf, &layout, &colors, true);
        assert_eq!(buf, buffer(14, 80));
    }

    #[test]
    fn shadow_mirrors_bottom_rows() {
        let mut buf = buffer(24, 80);
        let layout = Layout::compute(24, 80, FrameSize::new(4, 6));
        let colors = ColorTable::with_support(true);
        let frame = AnimationFrame::from_text(FrameSize::new(4, 6), "r0\nr1\nr2\nr3\nr4\nr5");
        draw_shadow(&mut buf, &layout, &colors, &frame, 0.5);
        // nearest-to-ground first: bottom frame row on the first shadow row
        let first = row_text(&buf, layout.shadow_row);
        let second = row_text(&buf, layout.shadow_row + 1);
        assert!(first.contains("r5"));
        assert!(second.contains("r4"));
    }

    #[test]
    fn bars_skipped_when_terminal_too_short() {
        let mut buf = buffer(10, 80);
        let layout = Layout::compute(10, 80, FrameSize::new(32, 12));
        let colors = ColorTable::with_support(true);
        let levels = Intensity::new(1.0, 1.0, 1.0);
        draw_bars(&mut buf, &layout, &colors, &levels, false);
        draw_energy_meter(&mut buf, &layout, &colors, 1.0, false);
        assert_eq!(buf, buffer(10, 80));
    }

    #[test]
    fn status_uses_default_readout() {
        let mut buf = buffer(24, 80);
        let layout = Layout::compute(24, 80, FrameSize::new(32, 12));
        let colors = ColorTable::with_support(true);
        let frame = AnimationFrame::from_text(FrameSize::new(32, 12), "");
        let scene = Scene {
            frame: &frame,
            levels: Intensity::new(0.8, 0.3, 0.1),
            frame_no: 7,
            status: None,
            hud: None,
        };
        draw_status(&mut buf, &layout, &colors, &scene);
        let line = row_text(&buf, layout.status_row);
        assert!(line.contains("Frame: 7 | B:0.80 M:0.30 T:0.10"));
    }

    #[test]
    fn long_status_is_clipped_not_wrapped() {
        let mut buf = buffer(5, 20);
        let layout = Layout::compute(5, 20, FrameSize::new(4, 2));
        let colors = ColorTable::with_support(false);
        let frame = AnimationFrame::from_text(FrameSize::new(4, 2), "");
        let long = "x".repeat(100);
        let scene = Scene {
            frame: &frame,
            levels: Intensity::new(0.0, 0.0, 0.0),
            frame_no: 0,
            status: Some(&long),
            hud: None,
        };
        draw_status(&mut buf, &layout, &colors, &scene);
        // row above the status line untouched
        assert_eq!(row_text(&buf, layout.status_row - 1).trim(), "");
    }
}
