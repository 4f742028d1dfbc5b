use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::engine::max_initial_length;

/// Smallest board that fits a length-3 snake inside the border wall
pub const MIN_GRID_SIZE: usize = 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("grid must be at least {min}x{min}, got {width}x{height}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("initial snake length must be at least 1")]
    EmptySnake,

    #[error("initial snake length {length} does not fit a {width}x{height} grid (max {max})")]
    SnakeTooLong {
        length: usize,
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("min tick ({min_ms} ms) must be positive and not exceed initial tick ({initial_ms} ms)")]
    TickRange { min_ms: u64, initial_ms: u64 },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid, border included
    pub grid_width: usize,
    /// Height of the game grid, border included
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Growth granted by each food item
    pub food_value: usize,
    /// Optional seed for reproducible food and start placement
    pub seed: Option<u64>,

    // Pacing (driver only)
    /// Tick interval at the start of a game
    pub initial_tick_ms: u64,
    /// Fastest tick interval reachable by eating
    pub min_tick_ms: u64,
    /// How much each food shortens the tick interval
    pub tick_step_ms: u64,
    /// Maximum number of buffered steering inputs
    pub input_queue_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 20,
            initial_snake_length: 3,
            food_value: 1,
            seed: None,
            initial_tick_ms: 260,
            min_tick_ms: 70,
            tick_step_ms: 10,
            input_queue_capacity: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a TOML config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < MIN_GRID_SIZE || self.grid_height < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_GRID_SIZE,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        let max = max_initial_length(self.grid_width, self.grid_height);
        if self.initial_snake_length > max {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                width: self.grid_width,
                height: self.grid_height,
                max,
            });
        }
        if self.min_tick_ms == 0 || self.min_tick_ms > self.initial_tick_ms {
            return Err(ConfigError::TickRange {
                min_ms: self.min_tick_ms,
                initial_ms: self.initial_tick_ms,
            });
        }
        Ok(())
    }
}
