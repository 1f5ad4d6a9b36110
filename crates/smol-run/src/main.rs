//! Headless demo runner.
//!
//! Runs a demo against the recording surface on a synthetic frame clock,
//! optionally clicking every N frames, then prints a summary and (with
//! `--dump FILE`) writes the last frame's draw commands as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use smol_core::{
    CanvasConfig, CanvasHost, DrawCommand, HeadlessEnvironment, HostStats, InputEvent,
    RecordingSurface, SketchError,
};
use smol_demos::DemoKind;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown demo `{0}` (expected one of: {names})", names = demo_names())]
    UnknownDemo(String),
    #[error("could not read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Sketch(#[from] SketchError),
    #[error("could not encode draw commands: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    WriteDump {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Parser, Debug)]
#[command(name = "smol-run", about = "Run a SmolCanvas demo headlessly")]
struct Cli {
    /// Demo name: hello, particles or shuffle-sort.
    demo: String,

    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Synthetic time between frames.
    #[arg(long, default_value_t = 16.0)]
    interval_ms: f64,

    /// Random seed; overrides the config file's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport width seen by `fill_window`.
    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// JSON canvas config applied before the demo's own setup.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Inject a click at the pointer every N frames.
    #[arg(long)]
    press_every: Option<u32>,

    /// Write the last frame's draw commands to this file as JSON.
    #[arg(long)]
    dump: Option<PathBuf>,
}

#[derive(Debug)]
struct Report {
    demo: DemoKind,
    frames: u64,
    fps: f64,
    size: (u32, u32),
    stats: HostStats,
    last_frame: Vec<DrawCommand>,
}

fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let report = run(&cli, config.as_ref())?;

    println!(
        "{}: {} frames, {:.1} fps, {}x{}",
        report.demo, report.frames, report.fps, report.size.0, report.size.1
    );
    let s = report.stats;
    println!(
        "failures: update={} draw={} events={} unbalanced={}",
        s.failed_updates, s.failed_draws, s.failed_events, s.unbalanced_frames
    );
    println!("last frame: {} draw commands", report.last_frame.len());
    if let Some(path) = &cli.dump {
        let json = serde_json::to_string_pretty(&report.last_frame)?;
        fs::write(path, json).map_err(|source| CliError::WriteDump {
            path: path.clone(),
            source,
        })?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<CanvasConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(CanvasConfig::from_json(&text)?)
}

fn run(cli: &Cli, config: Option<&CanvasConfig>) -> Result<Report, CliError> {
    let demo = DemoKind::from_name(&cli.demo).ok_or_else(|| CliError::UnknownDemo(cli.demo.clone()))?;

    let surface = RecordingSurface::new(300, 150);
    let log = surface.log();
    let seed = cli.seed.or(config.and_then(|c| c.seed)).unwrap_or(0);
    let env = HeadlessEnvironment::new(cli.width, cli.height).with_seed(seed);
    let mut host = CanvasHost::new(surface, env);

    if let Some(config) = config {
        host.configure(config);
    }
    if cli.seed.is_some() {
        host.canvas_mut().reseed(seed);
    }
    demo.install(&mut host)?;

    for i in 0..cli.frames {
        if let Some(n) = cli.press_every.filter(|&n| n > 0) {
            if i > 0 && i % n == 0 {
                let (x, y) = (host.mouse_x(), host.mouse_y());
                host.handle_input(InputEvent::PointerDown { x, y });
            }
        }
        if i + 1 == cli.frames {
            log.take();
        }
        host.tick(f64::from(i) * cli.interval_ms);
    }

    Ok(Report {
        demo,
        frames: host.stats().frames,
        fps: host.fps(),
        size: (host.width(), host.height()),
        stats: host.stats(),
        last_frame: log.take(),
    })
}

fn demo_names() -> String {
    DemoKind::ALL.map(DemoKind::name).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("smol-run").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let c = cli(&["hello"]);
        assert_eq!(c.frames, 120);
        assert_eq!(c.interval_ms, 16.0);
        assert_eq!((c.width, c.height), (800, 600));
        assert_eq!(c.dump, None);
    }

    #[test]
    fn unknown_demo_is_rejected() {
        let err = run(&cli(&["nope"]), None).unwrap_err();
        assert!(matches!(err, CliError::UnknownDemo(name) if name == "nope"));
    }

    #[test]
    fn hello_runs_requested_frames() {
        let report = run(&cli(&["hello", "--frames", "10"]), None).unwrap();
        assert_eq!(report.frames, 10);
        assert_eq!(report.size, (500, 500));
        // still converging towards 62.5 from zero
        assert!(report.fps > 0.0 && report.fps < 62.5, "fps = {}", report.fps);
        assert!(!report.last_frame.is_empty());
    }

    #[test]
    fn last_frame_holds_a_single_scope() {
        let report = run(&cli(&["particles", "--frames", "3", "--width", "320", "--height", "200"]), None)
            .unwrap();
        assert_eq!(report.size, (320, 200));
        assert_eq!(report.last_frame.first(), Some(&DrawCommand::Save));
        assert_eq!(report.last_frame.last(), Some(&DrawCommand::Restore));
    }

    #[test]
    fn clicks_are_injected() {
        let report = run(&cli(&["shuffle-sort", "--frames", "20", "--press-every", "5"]), None).unwrap();
        assert_eq!(report.stats.failed_events, 0);
        assert_eq!(report.frames, 20);
    }

    #[test]
    fn same_seed_same_output() {
        let args = ["particles", "--frames", "5", "--seed", "42"];
        let a = run(&cli(&args), None).unwrap();
        let b = run(&cli(&args), None).unwrap();
        assert_eq!(a.last_frame, b.last_frame);
    }

    #[test]
    fn config_applies_before_demo_setup() {
        let config = CanvasConfig::from_json(r#"{"title":"ignored","smoothing":0.5}"#).unwrap();
        let report = run(&cli(&["hello", "--frames", "2"]), Some(&config)).unwrap();
        // hello sizes itself in setup
        assert_eq!(report.size, (500, 500));
    }
}
