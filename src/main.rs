use anyhow::{Context, Result};
use clap::Parser;
use snake_slither::audio::Audio;
use snake_slither::game::GameConfig;
use snake_slither::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snake_slither")]
#[command(version, about = "Snake game for the terminal")]
struct Cli {
    /// JSON game configuration; grid flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid [default: 25]
    #[arg(long)]
    blocks: Option<usize>,

    /// Cell size in pixel units [default: 20]
    #[arg(long)]
    block_size: Option<i32>,

    /// Ticks per second [default: 8]
    #[arg(long)]
    fps: Option<u32>,

    /// Directory holding hit.mp3 and food.mp3 [default: Sounds]
    #[arg(long)]
    sounds_dir: Option<PathBuf>,

    /// Never open the audio device
    #[arg(long)]
    mute: bool,

    /// Keep food off the snake's body when relocating it
    #[arg(long)]
    food_avoids_snake: bool,

    /// Write logs to this file (stderr is taken by the game screen)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(blocks) = self.blocks {
            config.blocks = blocks;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(dir) = &self.sounds_dir {
            config.sounds_dir = dir.clone();
        }
        if self.food_avoids_snake {
            config.food_avoids_snake = true;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_slither=info".into()),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    info!(
        blocks = config.blocks,
        block_size = config.block_size,
        fps = config.fps,
        "starting snake_slither"
    );

    let audio = if cli.mute {
        None
    } else {
        Audio::open(&config)?
    };

    let mut human_mode = HumanMode::new(config, audio);
    human_mode.run().await?;

    Ok(())
}
