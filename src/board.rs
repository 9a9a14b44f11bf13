use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::rules;
use crate::types::{Cell, Player, Position, Score};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Othello board state represented by two bitboards.
///
/// Bit `row * 8 + col` is set in `black` or `white` when that side owns the
/// square. The two masks never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the opening position:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Creates a board with no pieces at all.
    pub fn empty() -> Self {
        Self { black: 0, white: 0 }
    }

    /// Decodes 64 row-major cell codes (0=empty, 1=black, 2=white).
    pub fn from_cells(cells: &[u8]) -> Result<Self, GameError> {
        if cells.len() != NUM_SQUARES {
            return Err(GameError::InvalidBoardLength(cells.len()));
        }

        let mut board = Self::empty();
        for (idx, &code) in cells.iter().enumerate() {
            match Cell::from_code(code)? {
                Cell::Black => board.black |= bit(idx),
                Cell::White => board.white |= bit(idx),
                Cell::Empty => {}
            }
        }
        Ok(board)
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            *cell = self.cell_at(idx).code();
        }
        board
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.cell_at(pos.index())
    }

    /// Overwrites one square. Setting a color clears the other color.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let square = bit(pos.index());
        self.black &= !square;
        self.white &= !square;
        match cell {
            Cell::Black => self.black |= square,
            Cell::White => self.white |= square,
            Cell::Empty => {}
        }
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        ((self.black | self.white) & bit(pos.index())) == 0
    }

    /// True when no empty square remains.
    pub fn is_full(&self) -> bool {
        (self.black | self.white) == u64::MAX
    }

    /// Returns `(black, white)` piece counts.
    pub fn count(&self) -> Score {
        Score {
            black: self.black.count_ones() as u8,
            white: self.white.count_ones() as u8,
        }
    }

    /// Places one stone and flips captured stones.
    /// Returns the flipped positions in row-major order.
    /// Returns an empty list and leaves the board untouched when the move is illegal.
    pub fn place(&mut self, pos: Position, player: Player) -> Vec<Position> {
        if !self.is_empty(pos) {
            return Vec::new();
        }

        let flips = rules::flip_mask(self, pos, player);
        if flips == 0 {
            return Vec::new();
        }

        let (me, opp) = self.sides(player);
        let next_me = me | bit(pos.index()) | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        mask_to_positions(flips)
    }

    /// Returns `(own, opponent)` masks from `player`'s point of view.
    pub(crate) fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    fn cell_at(&self, idx: usize) -> Cell {
        let square = bit(idx);
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses eight rows of `B`, `W` or `.`; blank lines and spaces are skipped.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE {
            return Err(GameError::InvalidBoardText(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(GameError::InvalidBoardText(format!(
                    "row {row_idx} has {} cells",
                    row.len()
                )));
            }
            for (col_idx, &ch) in row.iter().enumerate() {
                let square = bit(row_idx * BOARD_SIZE + col_idx);
                match ch {
                    'B' => board.black |= square,
                    'W' => board.white |= square,
                    '.' => {}
                    other => {
                        return Err(GameError::InvalidBoardText(format!(
                            "unexpected character {other:?} at ({row_idx}, {col_idx})"
                        )));
                    }
                }
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let ch = match self.cell_at(row * BOARD_SIZE + col) {
                    Cell::Black => 'B',
                    Cell::White => 'W',
                    Cell::Empty => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub(crate) fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

pub(crate) fn mask_to_positions(mask: u64) -> Vec<Position> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(bits.count_ones() as usize);

    while bits != 0 {
        if let Some(pos) = Position::from_index(bits.trailing_zeros() as usize) {
            out.push(pos);
        }
        bits &= bits - 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn new_board_has_standard_opening() {
        let board = Board::new();

        assert_eq!(board.cell(pos(3, 3)), Cell::White);
        assert_eq!(board.cell(pos(4, 4)), Cell::White);
        assert_eq!(board.cell(pos(3, 4)), Cell::Black);
        assert_eq!(board.cell(pos(4, 3)), Cell::Black);
        assert_eq!(board.count(), Score { black: 2, white: 2 });
    }

    #[test]
    fn place_flips_opponent_stones_and_updates_counts() {
        let mut board = Board::new();

        let flips = board.place(pos(2, 3), Player::Black);

        assert_eq!(flips, vec![pos(3, 3)]);
        assert_eq!(board.count(), Score { black: 4, white: 1 });
        assert_eq!(board.count().empty(), 59);

        let cells = board.to_array();
        assert_eq!(cells[pos(2, 3).index()], 1);
        assert_eq!(cells[pos(3, 3).index()], 1);
        assert_eq!(cells[pos(3, 4).index()], 1);
        assert_eq!(cells[pos(4, 3).index()], 1);
        assert_eq!(cells[pos(4, 4).index()], 2);
    }

    #[test]
    fn illegal_place_returns_nothing_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        assert!(board.place(pos(0, 0), Player::Black).is_empty());
        assert!(board.place(pos(3, 3), Player::Black).is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn set_replaces_previous_owner() {
        let mut board = Board::empty();
        board.set(pos(0, 0), Cell::Black);
        board.set(pos(0, 0), Cell::White);

        assert_eq!(board.cell(pos(0, 0)), Cell::White);
        assert_eq!(board.count(), Score { black: 0, white: 1 });

        board.set(pos(0, 0), Cell::Empty);
        assert!(board.is_empty(pos(0, 0)));
    }

    #[test]
    fn from_cells_rejects_bad_input() {
        assert_eq!(
            Board::from_cells(&[0; 63]),
            Err(GameError::InvalidBoardLength(63))
        );

        let mut cells = [0u8; NUM_SQUARES];
        cells[10] = 7;
        assert_eq!(Board::from_cells(&cells), Err(GameError::InvalidCell(7)));
    }

    #[test]
    fn cells_and_text_forms_agree() {
        let board = Board::new();

        assert_eq!(Board::from_cells(&board.to_array()), Ok(board));
        assert_eq!(board.to_string().parse::<Board>(), Ok(board));
        assert_eq!(
            board.to_string().lines().nth(3),
            Some("...WB...")
        );
    }

    #[test]
    fn text_form_rejects_wrong_shape() {
        assert!(matches!(
            "BW".parse::<Board>(),
            Err(GameError::InvalidBoardText(_))
        ));
        for bad in ["X", "b", "w", "_"] {
            let text = format!("{bad}.......\n{}", "........\n".repeat(7));
            assert!(
                matches!(text.parse::<Board>(), Err(GameError::InvalidBoardText(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn full_board_is_detected() {
        let full = "BBBBBBBB\n".repeat(8).parse::<Board>().unwrap();
        assert!(full.is_full());
        assert!(!Board::new().is_full());
    }
}
