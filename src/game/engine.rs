use std::fmt;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::{Action, Direction},
    board::Board,
    config::GameConfig,
    state::{Food, Position, Snake},
};

pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const DEFAULT_FOOD_VALUE: usize = 1;

pub const FOOD_CHAR: char = '*';
pub const SNAKE_CHAR: char = '@';

/// Random food samples per board cell before falling back to a scan
const FOOD_SAMPLES_PER_CELL: usize = 4;

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Ate,
    Won,
    Lost,
}

impl Status {
    /// Won and Lost end the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Won | Status::Lost)
    }
}

/// A single game: board, snake, food and the random source that places them.
///
/// The game is a plain state machine. Each call to [`Game::step`] moves the
/// snake one cell and reports what happened. Once `Won` or `Lost` is
/// returned the caller is expected to stop stepping.
///
/// Boards smaller than about 7x7 are not rejected here but produce
/// degenerate starting layouts where the snake may overlap the wall.
pub struct Game<R = StdRng> {
    board: Board,
    snake: Snake,
    food: Food,
    food_value: usize,
    rng: R,
    steps: u32,
    foods_eaten: u32,
}

impl Game<StdRng> {
    /// Create a game seeded from OS entropy
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Create a reproducible game
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(width: usize, height: usize, rng: R) -> Self {
        Self::build(width, height, INITIAL_SNAKE_LENGTH, DEFAULT_FOOD_VALUE, rng)
    }

    pub fn from_config(config: &GameConfig, rng: R) -> Self {
        Self::build(
            config.grid_width,
            config.grid_height,
            config.initial_snake_length,
            config.food_value,
            rng,
        )
    }

    fn build(
        width: usize,
        height: usize,
        snake_length: usize,
        food_value: usize,
        mut rng: R,
    ) -> Self {
        let board = Board::new(width, height);
        let snake = spawn_snake(&board, snake_length.max(1), &mut rng);
        let food = Food::new(snake.head(), food_value);

        let mut game = Self {
            board,
            snake,
            food,
            food_value,
            rng,
            steps: 0,
            foods_eaten: 0,
        };
        game.place_food();

        tracing::info!(
            width,
            height,
            head = ?game.snake.head(),
            food = ?game.food.position,
            "new game"
        );
        game
    }

    /// Advance the snake one cell.
    ///
    /// A requested turn straight back into the body is ignored and the
    /// snake keeps its heading.
    pub fn step(&mut self, action: impl Into<Action>) -> Status {
        let heading = self.snake.direction();
        let direction = match action.into() {
            Action::Move(requested) if !heading.is_opposite(requested) => requested,
            _ => heading,
        };

        let head = self
            .snake
            .head()
            .moved_in_direction(direction)
            .wrapped(self.board.width(), self.board.height());

        self.snake.advance(head, direction);
        self.steps += 1;

        if head == self.food.position {
            self.snake.set_growth(self.food.value);
            self.foods_eaten += 1;
            self.place_food();
            tracing::debug!(?head, food = ?self.food.position, score = self.foods_eaten, "ate");
            return Status::Ate;
        }

        if self.board.is_wall(head) {
            tracing::debug!(?head, steps = self.steps, "hit wall");
            return Status::Lost;
        }

        if self.snake.is_self_collided() {
            tracing::debug!(?head, steps = self.steps, "hit self");
            return Status::Lost;
        }

        if self.snake.len() == self.board.area() {
            tracing::debug!(steps = self.steps, "board filled");
            return Status::Won;
        }

        Status::Playing
    }

    /// Move the food to a fresh cell that is neither wall nor snake.
    /// With no such cell left the food stays where it is, which on a new
    /// game is the snake's head.
    fn place_food(&mut self) {
        match self.free_cell() {
            Some(position) => self.food = Food::new(position, self.food_value),
            None => tracing::warn!("no free cell left for food"),
        }
    }

    fn free_cell(&mut self) -> Option<Position> {
        let (width, height) = (self.board.width(), self.board.height());

        for _ in 0..width * height * FOOD_SAMPLES_PER_CELL {
            let pos = Position::new(
                self.rng.gen_range(0..width) as i32,
                self.rng.gen_range(0..height) as i32,
            );
            if self.is_free(pos) {
                return Some(pos);
            }
        }

        tracing::debug!("food sampling exhausted, scanning board");
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
            .find(|&pos| self.is_free(pos))
    }

    fn is_free(&self, pos: Position) -> bool {
        !self.board.is_wall(pos) && !self.snake.occupies(pos)
    }
}

impl<R> Game<R> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Steps taken since the game started
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Food items eaten so far
    pub fn score(&self) -> u32 {
        self.foods_eaten
    }

    /// Character grid: walls, then food, then snake on top
    pub fn rows(&self) -> Vec<String> {
        let mut grid: Vec<Vec<char>> = (0..self.board.height())
            .map(|y| self.board.row_chars(y).collect())
            .collect();

        let mut mark = |pos: Position, c: char| {
            if self.board.contains(pos) {
                grid[pos.y as usize][pos.x as usize] = c;
            }
        };
        mark(self.food.position, FOOD_CHAR);
        for &segment in self.snake.segments() {
            mark(segment, SNAKE_CHAR);
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

impl<R> fmt::Display for Game<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            write!(f, "{row}\r\n")?;
        }
        Ok(())
    }
}

/// Lay out the starting snake heading left, somewhere in the middle three
/// fifths of the board. Segments extend rightward from the head and bend
/// downward when the next cell would be wall.
fn spawn_snake<R: Rng>(board: &Board, length: usize, rng: &mut R) -> Snake {
    let start = Position::new(
        start_coordinate(board.width(), rng),
        start_coordinate(board.height(), rng),
    );

    let mut segments = Vec::with_capacity(length);
    let (mut dx, mut dy) = (1, 0);
    let mut pos = start;
    for _ in 0..length {
        segments.push(pos);

        let mut next = pos.moved_by(dx, dy);
        if board.is_wall(next) {
            (dx, dy) = (0, 1);
            next = pos.moved_by(dx, dy);
        }
        pos = next;
    }

    Snake::from_segments(segments, Direction::Left)
}

fn start_coordinate<R: Rng>(dimension: usize, rng: &mut R) -> i32 {
    rng.gen_range(start_range(dimension)) as i32
}

/// Candidate head coordinates along one axis: `gap..4*gap` with `gap = dimension / 5`
fn start_range(dimension: usize) -> Range<usize> {
    let gap = dimension / 5;
    // An empty range would panic on boards narrower than 5 cells
    gap..gap + (gap * 3).max(1)
}

/// Longest starting snake that stays inside the border from every possible
/// start: rightward to the last open column, then down to the last open row.
pub fn max_initial_length(width: usize, height: usize) -> usize {
    let x_max = start_range(width).end - 1;
    let y_max = start_range(height).end - 1;
    width.saturating_sub(1).saturating_sub(x_max)
        + height.saturating_sub(2).saturating_sub(y_max)
}
