//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A [`Game`] is advanced one step at a time by whoever owns it.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use engine::{Game, Status};
pub use state::{Food, Position, Snake};
