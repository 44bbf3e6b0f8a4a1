use log::{info, trace};

use crate::error::BoardError;
use crate::food::FoodSpawner;
use crate::snake::{Direction, Position, SnakeBody};

/// Smallest width or height that leaves one interior cell inside the walls.
pub const MIN_SIDE: i32 = 3;

/// Largest width or height a board accepts.
pub const MAX_SIDE: i32 = 10_000;

/// Where the extra segment goes when the snake eats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Growth {
    /// Into the cell the tail just left.
    Tail,
    /// One row above the eaten food, whatever the snake's shape. Kept for
    /// compatibility with the classic rules; the new segment can land on a
    /// wall or right in front of a snake heading up.
    AboveFood,
}

impl Default for Growth {
    fn default() -> Self {
        Growth::Tail
    }
}

/// Why a tick ended the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    /// The head would leave the grid or enter a wall cell.
    BoundaryViolation(Position),
    /// The head would enter a cell the body already holds.
    SelfCollision(Position),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickResult {
    Continues { score: u32, ate_food: bool },
    /// `cause` is `None` when the session was ended on request.
    GameOver { score: u32, cause: Option<Collision> },
}

impl TickResult {
    pub fn continues(&self) -> bool {
        matches!(self, TickResult::Continues { .. })
    }

    pub fn score(&self) -> u32 {
        match *self {
            TickResult::Continues { score, .. } | TickResult::GameOver { score, .. } => score,
        }
    }
}

/// The walled arena and everything in it. Only the board mutates the snake,
/// the walls and the food; renderers get read-only accessors.
pub struct GameBoard {
    width: i32,
    height: i32,
    walls: Vec<Position>,
    snake: SnakeBody,
    food: Vec<Position>,
    score: u32,
    available: bool,
    direction: Option<Direction>,
    crash: Option<Collision>,
    growth: Growth,
    spawner: FoodSpawner,
}

impl GameBoard {
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        Self::with_spawner(width, height, FoodSpawner::new())
    }

    pub fn with_spawner(width: i32, height: i32, mut spawner: FoodSpawner) -> Result<Self, BoardError> {
        let sides = MIN_SIDE..=MAX_SIDE;
        if !sides.contains(&width) || !sides.contains(&height) {
            return Err(BoardError::InvalidConstruction { width, height });
        }

        let snake = SnakeBody::new(Position::new(width / 2, height / 2));
        let food = vec![spawner.spawn(width, height, &snake)];
        let walls = build_walls(width, height);

        info!("new {}x{} board, snake at {}", width, height, snake.head());

        Ok(GameBoard {
            width,
            height,
            walls,
            snake,
            food,
            score: 0,
            available: true,
            direction: None,
            crash: None,
            growth: Growth::default(),
            spawner,
        })
    }

    pub fn with_growth(mut self, growth: Growth) -> Self {
        self.growth = growth;
        self
    }

    /// Takes effect on the next tick. The last call before a tick wins.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.available {
            self.direction = Some(direction);
        }
    }

    /// Advances the snake one cell.
    ///
    /// The move is validated against the walls and the whole current body
    /// before anything changes, so a fatal tick leaves the snake, food and
    /// score exactly as they were.
    pub fn tick(&mut self) -> TickResult {
        if !self.available {
            return self.game_over();
        }

        let direction = match self.direction {
            Some(dir) => dir,
            None => return TickResult::Continues { score: self.score, ate_food: false },
        };

        let candidate = self.snake.head().step(direction);

        if let Some(collision) = self.check_collision(candidate) {
            info!("game over: {:?}, final score {}", collision, self.score);
            self.available = false;
            self.crash = Some(collision);
            return self.game_over();
        }

        let old_tail = self.snake.shift_to(candidate);
        trace!("head moved to {}", candidate);

        let ate_food = self.eat(candidate, old_tail);

        if self.food.is_empty() {
            let food = self.spawner.spawn(self.width, self.height, &self.snake);
            self.food.push(food);
        }

        TickResult::Continues { score: self.score, ate_food }
    }

    /// Ends the session without a collision.
    pub fn end(&mut self) {
        if self.available {
            info!("session ended, final score {}", self.score);
            self.available = false;
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn walls(&self) -> &[Position] {
        &self.walls
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn food(&self) -> &[Position] {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn crash(&self) -> Option<Collision> {
        self.crash
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&self) -> TickResult {
        TickResult::GameOver { score: self.score, cause: self.crash }
    }

    fn check_collision(&self, pos: Position) -> Option<Collision> {
        // The outer edge counts as inside here, the wall ring catches it
        if pos.x < 0 || pos.x > self.width || pos.y < 0 || pos.y > self.height
            || self.walls.contains(&pos)
        {
            return Some(Collision::BoundaryViolation(pos));
        }

        if self.snake.occupies(pos) {
            return Some(Collision::SelfCollision(pos));
        }

        None
    }

    fn eat(&mut self, head: Position, old_tail: Position) -> bool {
        let idx = match self.food.iter().position(|food| *food == head) {
            Some(idx) => idx,
            None => return false,
        };

        let eaten = self.food.remove(idx);
        self.score += 1;

        let segment = match self.growth {
            Growth::Tail => old_tail,
            Growth::AboveFood => Position::new(eaten.x, eaten.y - 1),
        };
        self.snake.grow(segment);

        true
    }
}

fn build_walls(width: i32, height: i32) -> Vec<Position> {
    let mut walls = Vec::with_capacity(2 * (width as usize + height as usize));

    for x in 0..width {
        walls.push(Position::new(x, 0));
        walls.push(Position::new(x, height - 1));
    }

    for y in 1..height - 1 {
        walls.push(Position::new(0, y));
        walls.push(Position::new(width - 1, y));
    }

    walls
}
