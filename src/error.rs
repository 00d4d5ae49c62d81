/// Error taxonomy for the game.
///
/// Setup errors (`InvalidDimensions`, `InvalidLevel`) abort round construction.
/// `OutOfBounds` means a motion rule let an entity escape the interior.
/// Input and display failures end the whole session, not just the round.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("grid must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid level: {0}")]
    InvalidLevel(String),

    #[error("reading input failed: {0}")]
    Input(#[source] io::Error),

    #[error("input source closed")]
    InputClosed,

    #[error("terminal output failed: {0}")]
    Display(#[source] io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
