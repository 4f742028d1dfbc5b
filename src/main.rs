use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tsnake::game::{GameConfig, Status};
use tsnake::logging;
use tsnake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "tsnake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width, border included
    #[arg(long)]
    width: Option<usize>,

    /// Grid height, border included
    #[arg(long)]
    height: Option<usize>,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs
    #[arg(long, default_value = "tsnake.log")]
    log_file: PathBuf,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_file)?;
    let config = cli.game_config()?;
    tracing::info!(?config, "starting");

    let mut human_mode = HumanMode::new(config);
    match human_mode.run().await? {
        Some(Status::Won) => println!("You WON!"),
        Some(Status::Lost) => println!("You lost!"),
        _ => println!("Exiting"),
    }

    Ok(())
}
