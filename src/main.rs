//! arplace - anchor-driven placement for AR sessions
//!
//! Headless driver that replays a scripted session through the anchor router.

mod config;
mod headless;
mod session_script;

use anyhow::{Context, Result};
use arplace_assets::{load_cube_materials, load_reference_images, DirAssetSource};
use arplace_host::{
    RecordingHaptics, RunOptions, SceneGraph, SessionConfiguration, SessionDriver,
    SimulatedSession,
};
use arplace_router::AnchorEventRouter;
use clap::Parser;
use config::SessionConfig;
use headless::HeadlessConfig;
use session_script::SessionScriptPlayer;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay an AR session script through the anchor router", long_about = None)]
struct Cli {
    /// Session config (TOML). Defaults to config/session.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session script (JSON) to replay
    #[arg(long)]
    script: Option<PathBuf>,

    /// Override the configured asset directory
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Where to write applied commands as JSONL
    #[arg(long, default_value = "target/commands.jsonl")]
    command_log: PathBuf,

    /// Stop after this many frames even if the script has more steps
    #[arg(long)]
    max_frames: Option<u64>,

    /// Write the effective config to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Disable the run option that clears anchors from a previous run
    #[arg(long)]
    keep_existing_anchors: bool,
}

fn main() -> Result<()> {
    // WARN by default; override via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting arplace v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let mut cfg = match &cli.config {
        Some(path) => SessionConfig::load_strict(path)
            .with_context(|| format!("failed to load session config {}", path.display()))?,
        None => SessionConfig::load(),
    };
    if let Some(dir) = cli.assets {
        cfg.asset_dir = dir;
    }

    if let Some(path) = &cli.write_config {
        cfg.save_to_path(path)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        info!(path = %path.display(), "Wrote session config");
        return Ok(());
    }

    let Some(script_path) = cli.script else {
        anyhow::bail!("--script is required unless --write-config is given");
    };
    let script = SessionScriptPlayer::from_path(&script_path)
        .with_context(|| format!("failed to load session script {}", script_path.display()))?;

    let source = DirAssetSource::new(&cfg.asset_dir);
    info!(assets = %source.root().display(), "Loading session assets");
    let cube_materials = load_cube_materials(&source, &cfg.materials)
        .with_context(|| format!("failed to load cube textures from {}", cfg.asset_dir.display()))?;
    let detection_images = load_reference_images(&source, &cfg.detection_images)
        .context("failed to load detection images")?;

    let mut driver = SessionDriver::new(
        AnchorEventRouter::new(cube_materials),
        SimulatedSession::new(cfg.camera.to_camera()),
        SceneGraph::new(),
        RecordingHaptics::new(),
    );
    driver.start(
        SessionConfiguration {
            plane_detection: cfg.plane_detection,
            detection_images,
            debug: cfg.debug,
        },
        RunOptions {
            remove_existing_anchors: !cli.keep_existing_anchors,
        },
    );

    headless::run(
        &mut driver,
        HeadlessConfig {
            script,
            command_log: cli.command_log,
            max_frames: cli.max_frames,
        },
    )?;
    Ok(())
}
