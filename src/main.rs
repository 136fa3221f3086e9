// dancetty: terminal music-visualizer rendering engine demo

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use tracing_subscriber::EnvFilter;

use dancetty::{
    AnimationFrame, AudioSource, Engine, EngineConfig, FrameSize, HudStats, Intensity, Scene,
    TermCaps, Theme,
};

/// Stand-in for the upstream pose state machine: a few fixed poses the demo
/// cycles through while synthesizing intensities.
const POSE_WIDTH: u16 = 13;
const POSE_HEIGHT: u16 = 6;
const POSES: [&str; 4] = [
    "    \\ o /    \n     \\|/     \n      |      \n     / \\     \n    /   \\    \n   _/   \\_   ",
    "      o      \n     /|\\     \n    / | \\    \n     / \\     \n    |   |    \n   _|   |_   ",
    "    \\ o      \n     \\|\\     \n      | \\    \n     / \\     \n    /   |    \n   _/   |_   ",
    "      o /    \n     /|/     \n    / |      \n     / \\     \n    |   \\    \n   _|   \\_   ",
];

struct Options {
    theme: Theme,
    ground: bool,
    shadow: bool,
    pick: bool,
    caps: bool,
    hud: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options {
        theme: Theme::default(),
        ground: true,
        shadow: true,
        pick: false,
        caps: false,
        hud: false,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--theme" => {
                let name = iter
                    .next()
                    .ok_or_else(|| "--theme requires a value".to_string())?;
                opts.theme = Theme::from_name(name)
                    .ok_or_else(|| format!("unknown theme '{}'", name))?;
            }
            "--no-ground" => opts.ground = false,
            "--no-shadow" => opts.shadow = false,
            "--pick" => opts.pick = true,
            "--caps" => opts.caps = true,
            "--hud" => opts.hud = true,
            "-h" | "--help" => return Err(String::new()),
            other => return Err(format!("unknown option '{}'", other)),
        }
    }
    Ok(opts)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --theme <name>   Color theme: spectrum, fire, ocean, matrix, mono");
    eprintln!("  --no-ground      Disable the ground line");
    eprintln!("  --no-shadow      Disable the reflection below the ground");
    eprintln!("  --pick           Show the audio source menu before starting");
    eprintln!("  --caps           Print the terminal capability report and exit");
    eprintln!("  --hud            Start with the performance HUD visible");
    eprintln!();
    eprintln!("Keys: q quit, t theme, g ground, s shadow, p HUD");
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(|s| s.as_str()).unwrap_or("dancetty");
    let opts = match parse_args(&args[1..]) {
        Ok(opts) => opts,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("Error: {}", msg);
                eprintln!();
            }
            print_usage(program);
            std::process::exit(if msg.is_empty() { 0 } else { 1 });
        }
    };

    if opts.caps {
        println!("{}", TermCaps::detect());
        return Ok(());
    }

    let mut engine = Engine::init(EngineConfig {
        theme: opts.theme,
        ground: opts.ground,
        shadow: opts.shadow,
    })?;

    let mut source_status = None;
    if opts.pick {
        let mut sources = vec![AudioSource::new("default", "Auto-detect (recommended)")];
        if let Ok(extra) = std::env::var("DANCETTY_SOURCES") {
            sources.extend(AudioSource::parse_list(&extra));
        }
        match engine.pick_source(&sources)? {
            Some(index) => {
                let chosen = &sources[index];
                tracing::info!(id = %chosen.id, "audio source selected");
                source_status = Some(format!(
                    "Source: {} | t theme g ground s shadow | Press 'q' to quit",
                    chosen.label
                ));
            }
            None => {
                // menu cancelled
                engine.shutdown()?;
                return Ok(());
            }
        }
    }

    let result = run_demo(&mut engine, source_status.as_deref(), opts.hud);
    engine.shutdown()?;
    result
}

fn run_demo(
    engine: &mut Engine<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    status: Option<&str>,
    mut show_hud: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let size = FrameSize::new(POSE_WIDTH, POSE_HEIGHT);
    let poses: Vec<AnimationFrame> = POSES
        .iter()
        .map(|text| AnimationFrame::from_text(size, text))
        .collect();

    let start = Instant::now();
    let mut frame_no: u64 = 0;
    let mut fps = 0.0;
    let mut frame_ms = 0.0;

    loop {
        while let Some(key) = engine.poll_key()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                KeyCode::Char('t') => {
                    let next = engine.theme().next();
                    engine.set_theme(next);
                }
                KeyCode::Char('g') => engine.set_ground(!engine.ground()),
                KeyCode::Char('s') => engine.set_shadow(!engine.shadow()),
                KeyCode::Char('p') => show_hud = !show_hud,
                _ => {}
            }
        }

        // synthesized intensities; a real host feeds analysis output here
        let t = start.elapsed().as_secs_f32();
        let levels = Intensity::new(
            0.5 + 0.5 * (t * 2.0).sin(),
            0.5 + 0.5 * (t * 3.1 + 1.0).sin(),
            0.5 + 0.5 * (t * 5.3 + 2.0).sin(),
        );
        let pose = &poses[(frame_no / 4) as usize % poses.len()];

        let scene = Scene {
            frame: pose,
            levels,
            frame_no,
            status,
            hud: show_hud.then_some(HudStats { fps, frame_ms }),
        };

        let drew = Instant::now();
        if let Err(e) = engine.render(&scene) {
            // skip the frame; tearing down mid-loop would leave raw mode on
            tracing::warn!(error = %e, "frame skipped");
        }
        let elapsed = drew.elapsed();
        frame_ms = elapsed.as_secs_f64() * 1000.0;
        if frame_ms > 0.0 {
            fps = 0.9 * fps + 0.1 * (1000.0 / frame_ms.max(0.01));
        }

        frame_no += 1;
        std::thread::sleep(Duration::from_millis(33));
    }
}
