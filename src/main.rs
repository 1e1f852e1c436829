use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{GameConfig, GameEngine, SystemClock};
use grid_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed grid with speed-changing food")]
struct Cli {
    /// Grid width (ignored when --config is given)
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height (ignored when --config is given)
    #[arg(long, default_value = "20")]
    height: usize,

    /// JSON file with game settings; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    grid_snake::logging::init(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::new(cli.width, cli.height),
    };

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_parts(config, seed, Box::new(SystemClock::new())),
        None => GameEngine::new(config),
    }
    .context("Invalid game configuration")?;

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await?;

    Ok(())
}
