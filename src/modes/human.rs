//! Keyboard-driven play in the terminal
//!
//! Keys are buffered in a bounded queue and at most one is applied per tick.
//! Each food eaten shortens the tick interval down to the configured floor.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::VecDeque;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};

use super::pace::Pace;
use crate::game::{Action, Direction, Game, GameConfig, Status};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    config: GameConfig,
    game: Game,
    /// Set once the game returns Won or Lost
    outcome: Option<Status>,
    pending_directions: VecDeque<Direction>,
    pace: Pace,
    /// Tick timer needs rebuilding with the current pace
    retime: bool,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let game = new_game(&config);
        let pace = Pace::from_config(&config);

        Self {
            pending_directions: VecDeque::with_capacity(config.input_queue_capacity),
            config,
            game,
            outcome: None,
            pace,
            retime: false,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Play until the user quits. Returns how the last game ended, if it did.
    pub async fn run(&mut self) -> Result<Option<Status>> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result.map(|()| self.outcome)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.pace.interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.outcome.is_none() {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.outcome.is_none() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, self.outcome, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.retime {
                retime(&mut tick_timer, self.pace.interval());
                self.retime = false;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                if self.pending_directions.len() < self.config.input_queue_capacity {
                    self.pending_directions.push_back(direction);
                } else {
                    tracing::debug!(?direction, "input queue full, dropping");
                }
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {
                tracing::debug!(code = ?key.code, "unknown key");
            }
        }
    }

    /// Apply at most one buffered direction and advance the game
    fn update_game(&mut self) {
        let action = Action::from(self.pending_directions.pop_front());

        let status = self.game.step(action);

        if status == Status::Ate && self.pace.speed_up() {
            self.retime = true;
        }

        if status.is_terminal() {
            tracing::info!(
                ?status,
                score = self.game.score(),
                steps = self.game.steps(),
                "game over"
            );
            self.metrics.on_game_over(self.game.score(), status);
            self.outcome = Some(status);
        }
    }

    fn reset_game(&mut self) {
        tracing::info!("restarting");
        self.game = new_game(&self.config);
        self.outcome = None;
        self.pending_directions.clear();
        self.pace.reset();
        self.retime = true;
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn new_game(config: &GameConfig) -> Game {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Game::from_config(config, rng)
}

/// Restart the timer with a new period, first tick one period from now
fn retime(timer: &mut Interval, period: Duration) {
    *timer = interval_at(Instant::now() + period, period);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn seeded_config() -> GameConfig {
        GameConfig {
            seed: Some(11),
            ..GameConfig::small()
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(seeded_config());
        assert!(mode.outcome.is_none());
        assert_eq!(mode.game.score(), 0);
        assert_eq!(mode.game.snake().len(), 3);
        assert_eq!(mode.pace.interval(), Duration::from_millis(260));
    }

    #[test]
    fn test_seeded_games_repeat() {
        let a = HumanMode::new(seeded_config());
        let b = HumanMode::new(seeded_config());
        assert_eq!(a.game.to_string(), b.game.to_string());
    }

    #[test]
    fn test_steering_is_queued() {
        let mut mode = HumanMode::new(seeded_config());

        mode.handle_event(key('w'));
        mode.handle_event(key('d'));
        assert_eq!(
            mode.pending_directions,
            VecDeque::from([Direction::Up, Direction::Right])
        );

        mode.update_game();
        assert_eq!(mode.pending_directions, VecDeque::from([Direction::Right]));
        assert_eq!(mode.game.steps(), 1);
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut mode = HumanMode::new(GameConfig {
            input_queue_capacity: 2,
            ..seeded_config()
        });

        for c in ['w', 'a', 's', 'd'] {
            mode.handle_event(key(c));
        }
        assert_eq!(mode.pending_directions.len(), 2);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(seeded_config());
        mode.handle_event(key('q'));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_straight_line_ends_game() {
        let mut mode = HumanMode::new(seeded_config());

        // Heading left on a 10x10 board the wall is at most 8 cells away
        for _ in 0..20 {
            if mode.outcome.is_some() {
                break;
            }
            mode.update_game();
        }

        assert_eq!(mode.outcome, Some(Status::Lost));
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = HumanMode::new(seeded_config());
        mode.outcome = Some(Status::Lost);
        mode.pending_directions.push_back(Direction::Up);
        mode.pace.speed_up();

        mode.handle_event(key('r'));

        assert!(mode.outcome.is_none());
        assert!(mode.pending_directions.is_empty());
        assert_eq!(mode.game.steps(), 0);
        assert_eq!(mode.pace.interval(), Duration::from_millis(260));
        assert!(mode.retime);
    }
}
