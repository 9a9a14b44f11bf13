use crate::types::Position;

/// Errors raised by session moves and by decoding boards from the front-end.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("row/col out of range: ({row}, {col})")]
    OutOfBounds { row: i32, col: i32 },

    #[error("cell ({}, {}) is already occupied", .0.row(), .0.col())]
    Occupied(Position),

    #[error("illegal move at ({}, {})", .0.row(), .0.col())]
    IllegalMove(Position),

    #[error("game is already over")]
    GameOver,

    #[error("invalid cell code: {0}")]
    InvalidCell(u8),

    #[error("invalid player code: {0}")]
    InvalidPlayer(u8),

    #[error("board must have 64 cells, got {0}")]
    InvalidBoardLength(usize),

    #[error("invalid board text: {0}")]
    InvalidBoardText(String),
}
