// End-to-end rendering tests over ratatui's TestBackend

use dancetty::render::{Engine, EngineConfig, Surface};
use dancetty::{AnimationFrame, FrameSize, Intensity, Scene, TermCaps};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

fn extended_caps() -> TermCaps {
    TermCaps::from_env_values("xterm-256color", "", "", "en_US.UTF-8")
}

fn test_engine(rows: u16, cols: u16) -> Engine<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(cols, rows)).expect("terminal");
    let surface = Surface::with_terminal(terminal).expect("surface");
    Engine::with_surface(surface, extended_caps(), EngineConfig::default())
}

fn solid_frame(size: FrameSize) -> AnimationFrame {
    let rows: Vec<String> = (0..size.height)
        .map(|_| "X".repeat(size.width as usize))
        .collect();
    AnimationFrame::from_rows(size, rows)
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf.get(x, y).symbol().to_owned())
        .collect()
}

fn count_in_row(buf: &Buffer, y: u16, glyph: &str) -> usize {
    (0..buf.area.width)
        .filter(|&x| buf.get(x, y).symbol() == glyph)
        .count()
}

#[test]
fn standard_scene_draws_every_layer() {
    let mut engine = test_engine(24, 80);
    let frame = solid_frame(FrameSize::new(32, 12));
    let scene = Scene {
        frame: &frame,
        levels: Intensity::new(0.8, 0.3, 0.1),
        frame_no: 1,
        status: None,
        hud: None,
    };
    engine.render(&scene).expect("render");

    let buf = engine.surface().terminal().backend().buffer();

    // dancer rows verbatim at (start_row, start_col) = (2, 24)
    for y in 2..14 {
        assert!(row_text(buf, y).contains(&"X".repeat(32)), "row {y}");
    }

    // ground line at start_row + frame_height with tick marks
    let ground = row_text(buf, 14);
    assert!(ground.contains('─'));
    assert!(ground.contains('┴'));

    // shadow: 4 mirrored rows directly below the ground line
    for y in 15..19 {
        assert!(row_text(buf, y).contains("XXXX"), "shadow row {y}");
    }

    // bar labels one row above the bars
    let labels = row_text(buf, 18);
    assert!(labels.contains("BASS"));
    assert!(labels.contains("MID"));
    assert!(labels.contains("TREBLE"));

    // bar fills: round(0.8*20)=16, round(0.3*20)=6, round(0.1*20)=2
    assert_eq!(count_in_row(buf, 19, "█"), 16 + 6 + 2);
    let bars = row_text(buf, 19);
    assert_eq!(bars.matches('[').count(), 3);
    assert_eq!(bars.matches(']').count(), 3);

    // energy gauge: round(0.4*20)=8 filled cells
    let gauge = row_text(buf, 21);
    assert!(gauge.contains("Energy: "));
    assert_eq!(count_in_row(buf, 21, "▓"), 8);
    assert_eq!(count_in_row(buf, 21, "░"), 12);

    // status readout on the bottom row
    assert!(row_text(buf, 23).contains("Frame: 1 | B:0.80 M:0.30 T:0.10"));
}

#[test]
fn bass_fill_occupies_the_bass_bar() {
    let mut engine = test_engine(24, 80);
    let frame = solid_frame(FrameSize::new(32, 12));
    let scene = Scene {
        frame: &frame,
        levels: Intensity::new(1.0, 0.0, 0.0),
        frame_no: 0,
        status: None,
        hud: None,
    };
    engine.render(&scene).expect("render");
    let buf = engine.surface().terminal().backend().buffer();

    // bass bar spans cols 5..=26; its 20 interior cells are all filled
    for x in 6..26 {
        assert_eq!(buf.get(x, 19).symbol(), "█", "col {x}");
    }
    // mid and treble bars are empty
    for x in 31..51 {
        assert_eq!(buf.get(x, 19).symbol(), " ", "col {x}");
    }
    for x in 56..76 {
        assert_eq!(buf.get(x, 19).symbol(), " ", "col {x}");
    }
}

#[test]
fn resize_produces_consistent_layout_without_stale_glyphs() {
    let mut engine = test_engine(24, 80);
    let frame = solid_frame(FrameSize::new(32, 12));
    let scene = Scene {
        frame: &frame,
        levels: Intensity::new(0.8, 0.3, 0.1),
        frame_no: 0,
        status: None,
        hud: None,
    };
    engine.render(&scene).expect("render");

    // host reports a resize to 40x10
    engine
        .surface_mut()
        .terminal_mut()
        .backend_mut()
        .resize(40, 10);
    engine.surface_mut().note_resize();
    engine.render(&scene).expect("render after resize");

    // the notification was consumed by the render's clear_frame
    assert!(!engine.check_resize().expect("check_resize"));
    assert_eq!(engine.size(), (10, 40));

    let buf = engine.surface().terminal().backend().buffer();
    assert_eq!(buf.area.width, 40);
    assert_eq!(buf.area.height, 10);

    // 10 rows cannot fit bars, gauge or ground under a 12-row frame:
    // nothing from the old 80x24 layout may survive
    for y in 0..10 {
        let row = row_text(buf, y);
        assert!(!row.contains('█'), "stale bar glyph on row {y}");
        assert!(!row.contains('▓'), "stale gauge glyph on row {y}");
        assert!(!row.contains('─'), "stale ground glyph on row {y}");
        assert!(!row.contains("BASS"), "stale label on row {y}");
    }
    // the status line is drawn last and wins the bottom row
    assert!(row_text(buf, 9).contains("Frame: 0"));
}

#[test]
fn check_resize_is_idempotent() {
    let mut engine = test_engine(24, 80);
    engine.surface_mut().note_resize();
    assert!(engine.check_resize().expect("first"));
    assert!(!engine.check_resize().expect("second"));
}

#[test]
fn ground_and_shadow_toggles_take_effect_next_frame() {
    let mut engine = test_engine(24, 80);
    engine.set_ground(false);
    engine.set_shadow(false);
    let frame = solid_frame(FrameSize::new(32, 12));
    let scene = Scene {
        frame: &frame,
        levels: Intensity::new(1.0, 1.0, 1.0),
        frame_no: 0,
        status: None,
        hud: None,
    };
    engine.render(&scene).expect("render");
    let buf = engine.surface().terminal().backend().buffer();

    assert_eq!(count_in_row(buf, 14, "─"), 0);
    for y in 15..19 {
        assert!(!row_text(buf, y).contains('X'), "shadow drawn on row {y}");
    }
}

#[test]
fn custom_status_text_replaces_readout() {
    let mut engine = test_engine(24, 80);
    let frame = solid_frame(FrameSize::new(32, 12));
    let scene = Scene {
        frame: &frame,
        levels: Intensity::new(0.0, 0.0, 0.0),
        frame_no: 0,
        status: Some("Source: monitor of Built-in Audio"),
        hud: None,
    };
    engine.render(&scene).expect("render");
    let buf = engine.surface().terminal().backend().buffer();
    let status = row_text(buf, 23);
    assert!(status.contains("Source: monitor of Built-in Audio"));
    assert!(!status.contains("Frame:"));
}

#[test]
fn tiny_terminal_renders_without_panicking() {
    for (rows, cols) in [(1u16, 1u16), (2, 10), (5, 5), (4, 120)] {
        let mut engine = test_engine(rows, cols);
        let frame = solid_frame(FrameSize::new(32, 12));
        let scene = Scene {
            frame: &frame,
            levels: Intensity::new(1.0, 1.0, 1.0),
            frame_no: 0,
            status: None,
            hud: None,
        };
        engine
            .render(&scene)
            .unwrap_or_else(|e| panic!("render failed at {rows}x{cols}: {e}"));
    }
}

#[test]
fn reduced_color_tier_still_renders() {
    let caps = TermCaps::from_env_values("vt100", "", "", "C");
    let terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
    let surface = Surface::with_terminal(terminal).expect("surface");
    let mut engine = Engine::with_surface(surface, caps, EngineConfig::default());
    assert!(!engine.supports_256());

    let frame = solid_frame(FrameSize::new(32, 12));
    let scene = Scene {
        frame: &frame,
        levels: Intensity::new(0.9, 0.9, 0.9),
        frame_no: 0,
        status: None,
        hud: None,
    };
    engine.render(&scene).expect("render");
    let buf = engine.surface().terminal().backend().buffer();

    // ASCII glyph tier: '#' bars, '-'/'+' ground, '#'/'.' gauge
    assert_eq!(count_in_row(buf, 19, "#"), 18 * 3);
    assert!(row_text(buf, 14).contains('-'));
    assert!(row_text(buf, 21).contains("Energy: "));
    assert_eq!(count_in_row(buf, 21, "#"), 18);
}
