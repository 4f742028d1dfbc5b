//! tsnake - a terminal snake game
//!
//! This library provides:
//! - Core game logic (game module): board, snake, food, stepping and text rendering
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session metrics (metrics module)
//! - The interactive driver (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
