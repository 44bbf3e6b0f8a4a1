use std::{error, fmt};

use crate::board::{MAX_SIDE, MIN_SIDE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The arena cannot hold the wall ring and a centered snake, or is larger
    /// than `MAX_SIDE` on a side.
    InvalidConstruction { width: i32, height: i32 },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::InvalidConstruction { width, height } => write!(
                f,
                "board of {}x{} is out of range, both sides must be between {} and {}",
                width, height, MIN_SIDE, MAX_SIDE
            ),
        }
    }
}

impl error::Error for BoardError {}
