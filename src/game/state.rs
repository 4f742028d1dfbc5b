use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Re-enter from the opposite edge when one step past either side of the grid.
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        let (w, h) = (width as i32, height as i32);
        let x = if self.x < 0 {
            w - 1
        } else if self.x >= w {
            0
        } else {
            self.x
        };
        let y = if self.y < 0 {
            h - 1
        } else if self.y >= h {
            0
        } else {
            self.y
        };
        Self { x, y }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Current heading
    direction: Direction,
    /// Number of upcoming moves that keep the tail
    growth: usize,
}

impl Snake {
    /// Create a snake from head-first segments
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Self {
        Self {
            body: segments.into_iter().collect(),
            direction,
            growth: 0,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn growth(&self) -> usize {
        self.growth
    }

    pub(crate) fn set_growth(&mut self, growth: usize) {
        self.growth = growth;
    }

    /// Body segments head-first
    pub fn segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Check if any segment, head included, is at `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True when the head shares its cell with another segment
    pub fn is_self_collided(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    /// Push a new head and drop the tail unless growth is pending
    pub fn advance(&mut self, new_head: Position, direction: Direction) {
        self.body.push_front(new_head);

        if self.growth == 0 {
            self.body.pop_back();
        } else {
            self.growth -= 1;
        }

        self.direction = direction;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// The single active food item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    /// Growth granted when eaten
    pub value: usize,
}

impl Food {
    pub fn new(position: Position, value: usize) -> Self {
        Self { position, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_snake() -> Snake {
        Snake::from_segments(
            [Position::new(5, 5), Position::new(6, 5), Position::new(7, 5)],
            Direction::Left,
        )
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_position_wrapping() {
        assert_eq!(Position::new(-1, 3).wrapped(10, 6), Position::new(9, 3));
        assert_eq!(Position::new(10, 3).wrapped(10, 6), Position::new(0, 3));
        assert_eq!(Position::new(4, -1).wrapped(10, 6), Position::new(4, 5));
        assert_eq!(Position::new(4, 6).wrapped(10, 6), Position::new(4, 0));
        assert_eq!(Position::new(4, 3).wrapped(10, 6), Position::new(4, 3));
    }

    #[test]
    fn test_snake_creation() {
        let snake = straight_snake();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.direction(), Direction::Left);
        assert_eq!(snake.growth(), 0);
    }

    #[test]
    fn test_snake_advance_without_growth() {
        let mut snake = straight_snake();
        snake.advance(Position::new(4, 5), Direction::Left);

        let body: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![Position::new(4, 5), Position::new(5, 5), Position::new(6, 5)]
        );
    }

    #[test]
    fn test_snake_advance_with_growth() {
        let mut snake = straight_snake();
        snake.set_growth(2);

        snake.advance(Position::new(4, 5), Direction::Left);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.growth(), 1);

        snake.advance(Position::new(4, 4), Direction::Up);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.growth(), 0);
        assert_eq!(snake.direction(), Direction::Up);

        snake.advance(Position::new(4, 3), Direction::Up);
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_self_collision_detection() {
        let snake = straight_snake();
        assert!(!snake.is_self_collided());
        assert!(snake.occupies(Position::new(7, 5)));
        assert!(!snake.occupies(Position::new(8, 5)));

        let looped = Snake::from_segments(
            [
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
                Position::new(5, 5),
            ],
            Direction::Up,
        );
        assert!(looped.is_self_collided());
    }
}
