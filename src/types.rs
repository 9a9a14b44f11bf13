use std::ops::Not;

use serde::Serialize;

use crate::board::BOARD_SIZE;
use crate::error::GameError;

/// Wire code for an empty cell.
pub const CELL_EMPTY: u8 = 0;
/// Wire code for Black, both as a cell and as a player.
pub const PLAYER_BLACK: u8 = 1;
/// Wire code for White, both as a cell and as a player.
pub const PLAYER_WHITE: u8 = 2;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn code(self) -> u8 {
        match self {
            Self::Black => PLAYER_BLACK,
            Self::White => PLAYER_WHITE,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, GameError> {
        match code {
            PLAYER_BLACK => Ok(Self::Black),
            PLAYER_WHITE => Ok(Self::White),
            other => Err(GameError::InvalidPlayer(other)),
        }
    }
}

impl Default for Player {
    /// Black always opens.
    fn default() -> Self {
        Self::Black
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

/// Content of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => CELL_EMPTY,
            Self::Black => PLAYER_BLACK,
            Self::White => PLAYER_WHITE,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, GameError> {
        match code {
            CELL_EMPTY => Ok(Self::Empty),
            PLAYER_BLACK => Ok(Self::Black),
            PLAYER_WHITE => Ok(Self::White),
            other => Err(GameError::InvalidCell(other)),
        }
    }

    /// Returns the owner of the piece on this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Black => Some(Player::Black),
            Self::White => Some(Player::White),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Self::Black,
            Player::White => Self::White,
        }
    }
}

/// A board coordinate.
///
/// Contract: `row < 8` and `col < 8`. The only public constructors check
/// this, so a `Position` can always be indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub(crate) row: u8,
    pub(crate) col: u8,
}

impl Position {
    /// Returns `None` when either coordinate falls outside the board.
    pub fn new(row: i32, col: i32) -> Option<Self> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Builds a position from a row-major index in `0..64`.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Self {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major index in `0..64`.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }
}

/// Piece counts per side. Always derived from a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

impl Score {
    /// Number of squares holding no piece.
    pub fn empty(self) -> u8 {
        (BOARD_SIZE * BOARD_SIZE) as u8 - self.black - self.white
    }

    /// Side with strictly more pieces, `None` on a tie.
    pub fn leader(self) -> Option<Player> {
        if self.black > self.white {
            Some(Player::Black)
        } else if self.white > self.black {
            Some(Player::White)
        } else {
            None
        }
    }
}

/// Presentation state handed to the front-end after every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub current_player: Player,
    pub score: Score,
    pub game_over: bool,
    /// Contract:
    /// - `None` while the game is running.
    /// - `None` after game over means a draw.
    pub winner: Option<Player>,
    /// Positions flipped by the last accepted move, empty on a fresh game.
    pub flipped: Vec<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_rejects_out_of_range_coordinates() {
        assert!(Position::new(-1, 0).is_none());
        assert!(Position::new(0, 8).is_none());
        assert!(Position::new(8, 8).is_none());
        assert_eq!(Position::new(7, 7).map(Position::index), Some(63));
        assert!(Position::from_index(64).is_none());
    }

    #[test]
    fn codes_round_trip_and_reject_unknown_values() {
        for cell in [Cell::Empty, Cell::Black, Cell::White] {
            assert_eq!(Cell::from_code(cell.code()), Ok(cell));
        }
        assert_eq!(Cell::from_code(3), Err(GameError::InvalidCell(3)));
        assert_eq!(Player::from_code(0), Err(GameError::InvalidPlayer(0)));
        assert_eq!(Player::from_code(PLAYER_WHITE), Ok(Player::White));
    }

    #[test]
    fn leader_requires_strict_majority() {
        assert_eq!(Score { black: 33, white: 31 }.leader(), Some(Player::Black));
        assert_eq!(Score { black: 1, white: 9 }.leader(), Some(Player::White));
        assert_eq!(Score { black: 32, white: 32 }.leader(), None);
        assert_eq!(Score { black: 2, white: 2 }.empty(), 60);
    }

    #[test]
    fn opponent_is_involutive() {
        assert_eq!(!Player::Black, Player::White);
        assert_eq!(!!Player::White, Player::White);
    }
}
