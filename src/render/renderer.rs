use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::game::engine::{FOOD_CHAR, SNAKE_CHAR};
use crate::game::board::WALL_CHAR;
use crate::game::{Game, Status};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame. `outcome` is the terminal status once the game has ended.
    pub fn render<R>(
        &self,
        frame: &mut Frame,
        game: &Game<R>,
        outcome: Option<Status>,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(game, metrics), chunks[0]);

        let board_area = centered(chunks[1], game.width() as u16, game.height() as u16);
        frame.render_widget(self.render_grid(game), board_area);

        if let Some(status) = outcome {
            let popup = centered(chunks[1], 30, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(game, status), popup);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid<R>(&self, game: &Game<R>) -> Paragraph<'static> {
        let lines: Vec<Line> = game
            .rows()
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .chars()
                    .map(|c| Span::styled(c.to_string(), cell_style(c)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
    }

    fn render_stats<R>(&self, game: &Game<R>, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(game.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(game.snake().len().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Wins: ", label),
            Span::styled(
                format!("{}/{}", metrics.games_won, metrics.games_played),
                value,
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over<R>(&self, game: &Game<R>, status: Status) -> Paragraph<'static> {
        let (headline, color) = match status {
            Status::Won => ("You WON!", Color::Green),
            _ => ("You lost!", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    game.score().to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(" restart  ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(" quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(", "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("HJKL", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_style(c: char) -> Style {
    match c {
        WALL_CHAR => Style::default().fg(Color::DarkGray),
        FOOD_CHAR => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        SNAKE_CHAR => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        _ => Style::default(),
    }
}

/// A `width` x `height` rect centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(game: &Game, outcome: Option<Status>) -> String {
        draw_with(game, outcome, &GameMetrics::new())
    }

    fn draw_with(game: &Game, outcome: Option<Status>, metrics: &GameMetrics) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, game, outcome, metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_board_is_drawn() {
        let game = Game::with_seed(12, 8, 1);
        let screen = draw(&game, None);

        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("############"));
        assert_eq!(screen.matches(SNAKE_CHAR).count(), 3);
    }

    #[test]
    fn test_header_shows_wins() {
        let game = Game::with_seed(12, 8, 1);
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(4, Status::Lost);
        metrics.on_game_over(9, Status::Won);

        let screen = draw_with(&game, None, &metrics);
        assert!(screen.contains("Best: 9"));
        assert!(screen.contains("Wins: 1/2"));
    }

    #[test]
    fn test_game_over_message() {
        let game = Game::with_seed(12, 8, 1);

        assert!(draw(&game, Some(Status::Lost)).contains("You lost!"));
        assert!(draw(&game, Some(Status::Won)).contains("You WON!"));
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(centered(area, 4, 3), Rect::new(3, 1, 4, 3));
        assert_eq!(centered(area, 40, 30), area);
    }
}
