use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step towards `direction`
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Fixed-size rectangular playing field
///
/// The board never changes after construction. Snake and food only ever ask it
/// whether a cell is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True iff the point lies within `[0, width) x [0, height)`
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    /// Spawn cell for a new snake
    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_step() {
        let p = Point::new(5, 5);
        assert_eq!(p.step(Direction::Up), Point::new(5, 4));
        assert_eq!(p.step(Direction::Down), Point::new(5, 6));
        assert_eq!(p.step(Direction::Left), Point::new(4, 5));
        assert_eq!(p.step(Direction::Right), Point::new(6, 5));
    }

    #[test]
    fn test_board_contains() {
        let board = Board::new(20, 10);

        assert!(board.contains(Point::new(0, 0)));
        assert!(board.contains(Point::new(19, 9)));
        assert!(!board.contains(Point::new(-1, 0)));
        assert!(!board.contains(Point::new(0, -1)));
        assert!(!board.contains(Point::new(20, 0)));
        assert!(!board.contains(Point::new(0, 10)));
    }

    #[test]
    fn test_board_center() {
        assert_eq!(Board::new(20, 20).center(), Point::new(10, 10));
        assert_eq!(Board::new(3, 5).center(), Point::new(1, 2));
    }
}
