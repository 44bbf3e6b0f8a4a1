use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::board::{GameBoard, Growth, MAX_SIDE};
use crate::error::BoardError;
use crate::food::FoodSpawner;

/// Milliseconds between ticks for speed levels 1 through 5.
const TICK_INTERVALS_MS: [u64; 5] = [120, 100, 80, 60, 40];

#[derive(Parser, Debug, Clone)]
#[command(name = "snake-arena", version, about = "Snake in a walled terminal arena")]
pub struct Args {
    /// Arena width in cells, walls included
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(i32).range(3..=MAX_SIDE as i64))]
    pub width: i32,

    /// Arena height in cells, walls included
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(3..=MAX_SIDE as i64))]
    pub height: i32,

    /// Speed level, 1 (slowest) to 5 (fastest)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub speed: u8,

    /// Where the snake grows after eating
    #[arg(long, value_enum, default_value_t = GrowthMode::Tail)]
    pub growth: GrowthMode,

    /// Seed for food placement, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GrowthMode {
    /// Extend from the tail
    Tail,
    /// Classic rule: new segment one row above the eaten food
    AboveFood,
}

impl From<GrowthMode> for Growth {
    fn from(mode: GrowthMode) -> Self {
        match mode {
            GrowthMode::Tail => Growth::Tail,
            GrowthMode::AboveFood => Growth::AboveFood,
        }
    }
}

impl Args {
    pub fn tick_interval(&self) -> Duration {
        let level = self.speed.clamp(1, 5) as usize;
        Duration::from_millis(TICK_INTERVALS_MS[level - 1])
    }

    /// A fresh board for one session.
    pub fn board(&self) -> Result<GameBoard, BoardError> {
        let spawner = match self.seed {
            Some(seed) => FoodSpawner::seeded(seed),
            None => FoodSpawner::new(),
        };

        GameBoard::with_spawner(self.width, self.height, spawner)
            .map(|board| board.with_growth(self.growth.into()))
    }
}
