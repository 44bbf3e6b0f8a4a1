use std::fmt;

use Direction::*;

/// A cell on the board grid. `(0, 0)` is the top-left wall corner and `y`
/// grows downwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The neighbouring cell one step away in `direction`.
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// Ordered body cells, head first.
///
/// There is no way to build an empty body, so `head()` always has a cell to
/// return.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeBody {
    segments: Vec<Position>,
}

impl SnakeBody {
    pub fn new(head: Position) -> Self {
        SnakeBody { segments: vec![head] }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Moves every segment into the cell of the one ahead of it and puts the
    /// head on `new_head`. Returns the cell the tail left behind.
    pub fn shift_to(&mut self, new_head: Position) -> Position {
        let old_tail = self.segments[self.segments.len() - 1];
        self.segments.rotate_right(1);
        self.segments[0] = new_head;
        old_tail
    }

    /// Appends a segment at the tail end without dropping any other.
    pub fn grow(&mut self, segment: Position) {
        self.segments.push(segment);
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(cells: &[(i32, i32)]) -> SnakeBody {
        let mut snake = SnakeBody::new(Position::new(cells[0].0, cells[0].1));
        for &(x, y) in &cells[1..] {
            snake.grow(Position::new(x, y));
        }
        snake
    }

    #[test]
    fn step_follows_screen_axes() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.step(Up), Position::new(5, 4));
        assert_eq!(pos.step(Down), Position::new(5, 6));
        assert_eq!(pos.step(Left), Position::new(4, 5));
        assert_eq!(pos.step(Right), Position::new(6, 5));
    }

    #[test]
    fn new_snake_is_a_single_segment() {
        let snake = SnakeBody::new(Position::new(3, 4));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(3, 4));
    }

    #[test]
    fn shift_moves_each_segment_into_the_one_ahead() {
        let mut snake = body(&[(5, 5), (4, 5), (3, 5)]);

        let vacated = snake.shift_to(Position::new(5, 4));

        assert_eq!(vacated, Position::new(3, 5));
        assert_eq!(
            snake.segments(),
            &[Position::new(5, 4), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn shift_single_segment() {
        let mut snake = SnakeBody::new(Position::new(2, 2));
        assert_eq!(snake.shift_to(Position::new(3, 2)), Position::new(2, 2));
        assert_eq!(snake.segments(), &[Position::new(3, 2)]);
    }

    #[test]
    fn grow_appends_at_the_tail() {
        let mut snake = body(&[(5, 5), (4, 5)]);
        snake.grow(Position::new(3, 5));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.segments()[2], Position::new(3, 5));
    }

    #[test]
    fn occupies_checks_every_segment() {
        let snake = body(&[(5, 5), (4, 5), (3, 5)]);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(6, 5)));
    }
}
