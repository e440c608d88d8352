mod render;

use clap::Parser;
use render::GifRecorder;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wildfire_core::{SimError, SimulationConfig, WildfireSimulation, WindDirection};

/// Headless wildfire run with per-frame readout and optional GIF output
#[derive(Parser, Debug)]
#[command(name = "wildfire-demo")]
#[command(about = "Cellular wildfire simulation with wind, clouds and daily temperature", long_about = None)]
struct Args {
    /// TOML file with a `SimulationConfig`; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid height in cells
    #[arg(long)]
    rows: Option<usize>,

    /// Grid width in cells
    #[arg(long)]
    cols: Option<usize>,

    /// Number of frames (hours) to simulate
    #[arg(short, long, default_value_t = 80)]
    frames: u64,

    /// RNG seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Wind direction (calm, N, S, E, W, NE, NW, SE, SW)
    #[arg(short, long)]
    wind: Option<WindDirection>,

    /// Spontaneous ignition probability per tree per hour
    #[arg(long)]
    fire_probability: Option<f64>,

    /// Regrowth probability per empty cell per hour
    #[arg(long)]
    regrowth: Option<f64>,

    /// Base bedrock placement probability
    #[arg(long)]
    bedrock: Option<f64>,

    /// Base water placement probability
    #[arg(long)]
    water: Option<f64>,

    /// Chance of a new cloud patch per hour
    #[arg(long)]
    cloud_coverage: Option<f64>,

    /// Write an animated GIF of the run
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per cell in the GIF
    #[arg(long, default_value_t = 8)]
    scale: u32,

    /// GIF playback speed
    #[arg(long, default_value_t = 1.5)]
    fps: f32,

    /// Print the map as text every frame
    #[arg(long)]
    ascii: bool,
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("gif output failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("{0}")]
    InvalidArgument(String),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path) -> Result<SimulationConfig, DemoError> {
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Start from the config file (or defaults) and apply command-line overrides
fn build_config(args: &Args) -> Result<SimulationConfig, DemoError> {
    let mut config = args
        .config
        .as_deref()
        .map(load_config)
        .transpose()?
        .unwrap_or_default();

    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(wind) = args.wind {
        config.wind = wind;
    }
    if let Some(p) = args.fire_probability {
        config.fire_probability = p;
    }
    if let Some(p) = args.regrowth {
        config.regrowth_probability = p;
    }
    if let Some(p) = args.bedrock {
        config.bedrock = p;
    }
    if let Some(p) = args.water {
        config.water = p;
    }
    if args.cloud_coverage.is_some() {
        config.cloud_coverage = args.cloud_coverage;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}

/// Info panel shown above each frame
fn frame_summary(sim: &WildfireSimulation, frame: u64) -> String {
    format!(
        "Day {} {:02}:00\nWind: {}\nTemperature: {}\nBurned area: {}\nTree cover: {}",
        frame / 24 + 1,
        frame % 24,
        sim.wind(),
        sim.current_temperature(frame),
        sim.burned_ratio(),
        sim.tree_cover(),
    )
}

fn run(args: &Args) -> Result<(), DemoError> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        return Err(DemoError::InvalidArgument(format!(
            "fps must be positive, got {}",
            args.fps
        )));
    }
    if args.scale == 0 {
        return Err(DemoError::InvalidArgument("scale must be at least 1".into()));
    }

    let config = build_config(args)?;
    let mut sim = WildfireSimulation::new(config)?;
    info!(
        rows = sim.rows(),
        cols = sim.cols(),
        frames = args.frames,
        cloud_coverage = sim.cloud_coverage().value(),
        "starting run"
    );

    let mut recorder = args
        .output
        .as_deref()
        .map(|path| GifRecorder::create(path, args.scale, args.fps))
        .transpose()?;

    for frame in 0..args.frames {
        println!("{}", frame_summary(&sim, frame));
        if args.ascii {
            println!("{}", render::ascii(sim.landscape()));
        }
        if let Some(recorder) = recorder.as_mut() {
            recorder.push(sim.landscape())?;
        }
        sim.step(frame);
    }

    let stats = sim.stats();
    info!(
        burned = %stats.burned_ratio,
        trees = %stats.tree_cover,
        "run finished"
    );
    if let (Some(recorder), Some(path)) = (recorder, args.output.as_ref()) {
        info!(frames = recorder.frames(), path = %path.display(), "gif written");
    }
    Ok(())
}
