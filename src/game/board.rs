use super::state::Position;

pub const WALL_CHAR: char = '#';
pub const OPEN_CHAR: char = ' ';

/// Fixed-size grid with a one-cell wall around its border
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major wall mask
    walls: Vec<bool>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        let mut walls = vec![false; width * height];
        for y in 0..height {
            for x in 0..width {
                walls[y * width + x] = y == 0 || x == 0 || y == height - 1 || x == width - 1;
            }
        }

        Self {
            width,
            height,
            walls,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells, walls included
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    /// Whether `pos` is a wall cell. Anything off the grid counts as wall.
    pub fn is_wall(&self, pos: Position) -> bool {
        if !self.contains(pos) {
            return true;
        }
        self.walls[pos.y as usize * self.width + pos.x as usize]
    }

    /// Wall/open characters of a single row
    pub fn row_chars(&self, y: usize) -> impl Iterator<Item = char> + '_ {
        self.walls[y * self.width..(y + 1) * self.width]
            .iter()
            .map(|&wall| if wall { WALL_CHAR } else { OPEN_CHAR })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_is_wall() {
        let board = Board::new(10, 6);

        for x in 0..10 {
            assert!(board.is_wall(Position::new(x, 0)));
            assert!(board.is_wall(Position::new(x, 5)));
        }
        for y in 0..6 {
            assert!(board.is_wall(Position::new(0, y)));
            assert!(board.is_wall(Position::new(9, y)));
        }
    }

    #[test]
    fn test_interior_is_open() {
        let board = Board::new(10, 6);

        for y in 1..5 {
            for x in 1..9 {
                assert!(!board.is_wall(Position::new(x, y)), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_off_grid_is_wall() {
        let board = Board::new(10, 6);
        assert!(board.is_wall(Position::new(-1, 3)));
        assert!(board.is_wall(Position::new(10, 3)));
        assert!(board.is_wall(Position::new(3, 6)));
        assert!(!board.contains(Position::new(3, -1)));
        assert_eq!(board.area(), 60);
    }

    #[test]
    fn test_row_chars() {
        let board = Board::new(5, 3);
        assert_eq!(board.row_chars(0).collect::<String>(), "#####");
        assert_eq!(board.row_chars(1).collect::<String>(), "#   #");
    }
}
