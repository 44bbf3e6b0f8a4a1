//! Snake in a walled arena.
//!
//! The simulation lives here with no terminal dependencies; the binary reads
//! a [`board::GameBoard`] to draw it and feeds it directions and ticks.

pub mod board;
pub mod config;
pub mod error;
pub mod food;
pub mod snake;
