use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::snake::{Position, SnakeBody};

/// Random picks tried before falling back to listing the free cells.
const RANDOM_ATTEMPTS: usize = 64;

/// Picks cells for new food inside the wall border.
pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    pub fn new() -> Self {
        FoodSpawner { rng: StdRng::from_entropy() }
    }

    /// Same board, same moves, same food.
    pub fn seeded(seed: u64) -> Self {
        FoodSpawner { rng: StdRng::seed_from_u64(seed) }
    }

    /// Chooses uniformly among the interior cells the snake does not cover.
    /// When the snake fills the whole interior any interior cell is returned,
    /// so the board is never left without food.
    pub fn spawn(&mut self, width: i32, height: i32, snake: &SnakeBody) -> Position {
        let area = (width as i64 - 2) * (height as i64 - 2);

        // Mostly empty board: retry random cells until one is free
        if (snake.len() as i64) * 2 < area {
            for _ in 0..RANDOM_ATTEMPTS {
                let pos = self.any_interior(width, height);
                if !snake.occupies(pos) {
                    debug!("spawned food at {}", pos);
                    return pos;
                }
            }
        }

        let choices: Vec<Position> = interior(width, height)
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        let food = match choices.choose(&mut self.rng) {
            Some(pos) => *pos,
            None => self.any_interior(width, height),
        };

        debug!("spawned food at {} ({} free cells)", food, choices.len());
        food
    }

    fn any_interior(&mut self, width: i32, height: i32) -> Position {
        Position::new(
            self.rng.gen_range(1..=width - 2),
            self.rng.gen_range(1..=height - 2),
        )
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new()
    }
}

fn interior(width: i32, height: i32) -> impl Iterator<Item = Position> {
    (1..height - 1).flat_map(move |y| (1..width - 1).map(move |x| Position::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_interior(pos: Position, width: i32, height: i32) -> bool {
        pos.x >= 1 && pos.x <= width - 2 && pos.y >= 1 && pos.y <= height - 2
    }

    #[test]
    fn interior_excludes_the_border() {
        let cells: Vec<Position> = interior(4, 3).collect();
        assert_eq!(cells, vec![Position::new(1, 1), Position::new(2, 1)]);
    }

    #[test]
    fn spawns_inside_the_walls() {
        let mut spawner = FoodSpawner::seeded(42);
        let snake = SnakeBody::new(Position::new(5, 5));

        for _ in 0..200 {
            let food = spawner.spawn(10, 8, &snake);
            assert!(is_interior(food, 10, 8), "{} on the border", food);
        }
    }

    #[test]
    fn never_lands_on_the_snake() {
        let mut spawner = FoodSpawner::seeded(7);
        let mut snake = SnakeBody::new(Position::new(1, 1));
        snake.grow(Position::new(2, 1));
        snake.grow(Position::new(3, 1));

        // 3x2 interior, half of it covered
        for _ in 0..100 {
            let food = spawner.spawn(5, 4, &snake);
            assert!(!snake.occupies(food));
            assert_eq!(food.y, 2);
        }
    }

    #[test]
    fn full_board_still_gets_food() {
        let mut spawner = FoodSpawner::seeded(1);
        let snake = SnakeBody::new(Position::new(1, 1));

        assert_eq!(spawner.spawn(3, 3, &snake), Position::new(1, 1));
    }

    #[test]
    fn huge_board_spawns_without_listing_cells() {
        let mut spawner = FoodSpawner::seeded(4);
        let snake = SnakeBody::new(Position::new(50_000, 50_000));

        for _ in 0..1000 {
            let food = spawner.spawn(100_000, 100_000, &snake);
            assert!(is_interior(food, 100_000, 100_000));
            assert_ne!(food, snake.head());
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let snake = SnakeBody::new(Position::new(10, 5));
        let mut a = FoodSpawner::seeded(99);
        let mut b = FoodSpawner::seeded(99);

        for _ in 0..20 {
            assert_eq!(a.spawn(30, 12, &snake), b.spawn(30, 12, &snake));
        }
    }
}
