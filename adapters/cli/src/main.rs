#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Monkey Tribe Wars session.

mod autopilot;
mod headless;
mod session;

use std::{cell::RefCell, fs, path::Path, path::PathBuf, rc::Rc};

use anyhow::{Context, Result as AnyResult};
use clap::Parser;
use monkey_tribe_core::GameConfig;
use monkey_tribe_rendering::{Color, Presentation, RenderingBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    autopilot::Autopilot,
    headless::{HeadlessBackend, LoggingAudio},
    session::Session,
};

const WINDOW_TITLE: &str = "Monkey Tribe Wars";

#[derive(Parser, Debug)]
#[command(name = "monkey-tribe")]
#[command(author, version, about = "Runs a headless Monkey Tribe Wars session", long_about = None)]
struct Args {
    /// Seed for the world and the autopilot. Overrides the config file.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of frames to simulate.
    #[arg(short, long, default_value = "3600")]
    frames: u64,

    /// Simulated frames per second.
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// TOML file with tuning overrides.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run without autopilot input.
    #[arg(long)]
    idle: bool,
}

/// Entry point for the Monkey Tribe Wars command-line interface.
fn main() -> AnyResult<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let autopilot = if args.idle {
        Autopilot::idle()
    } else {
        Autopilot::seeded(config.seed)
    };
    info!(
        seed = config.seed,
        frames = args.frames,
        fps = args.fps,
        idle = args.idle,
        "starting session"
    );

    let session = Session::start(config, LoggingAudio::default())?;
    println!("{}", session.welcome_banner());
    let presentation = Presentation::new(
        WINDOW_TITLE,
        Color::from_rgb_u8(34, 85, 34),
        session.scene()?,
    );

    let session = Rc::new(RefCell::new(session));
    let frame_session = Rc::clone(&session);
    HeadlessBackend::new(args.frames, args.fps, autopilot).run(
        presentation,
        move |dt, input, scene| frame_session.borrow_mut().frame(dt, input, scene),
    )?;

    let session = session.borrow();
    println!("{}", session.report());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(path: &Path) -> AnyResult<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
}
