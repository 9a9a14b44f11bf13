//! Pure Othello rules over a [`Board`] value.
//!
//! Nothing here mutates its input or keeps state between calls; the session
//! layer in [`crate::game`] owns the board and decides what to do with the
//! results.

use serde::Serialize;

use crate::board::{BOARD_SIZE, Board, NUM_SQUARES, bit, mask_to_positions};
use crate::types::{Player, Position, Score};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// What happens after a move has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "player", rename_all = "camelCase")]
pub enum TurnOutcome {
    /// The opponent of the mover plays next.
    Advance(Player),
    /// The opponent has no legal move, so the mover plays again.
    Forfeit(Player),
    /// Neither side can move. Carries the winner, `None` for a draw.
    GameOver(Option<Player>),
}

/// Returns the opening position.
pub fn initialize_board() -> Board {
    Board::new()
}

/// Counts pieces per side. Empty squares are not counted.
pub fn calculate_score(board: &Board) -> Score {
    board.count()
}

/// Returns every opponent piece captured if `player` placed at `pos`, in
/// row-major order.
///
/// Does not check that `pos` itself is empty; use [`is_valid_move`] for that.
pub fn flippable_positions(pos: Position, player: Player, board: &Board) -> Vec<Position> {
    mask_to_positions(flip_mask(board, pos, player))
}

/// A move is legal when the square is empty and at least one piece flips.
pub fn is_valid_move(pos: Position, player: Player, board: &Board) -> bool {
    board.is_empty(pos) && flip_mask(board, pos, player) != 0
}

/// Same as [`is_valid_move`] for raw coordinates; out-of-range is simply illegal.
pub fn is_valid_move_at(row: i32, col: i32, player: Player, board: &Board) -> bool {
    Position::new(row, col).is_some_and(|pos| is_valid_move(pos, player, board))
}

/// Row-major scan, stopping at the first legal square.
pub fn player_has_any_valid_move(player: Player, board: &Board) -> bool {
    (0..NUM_SQUARES)
        .filter_map(Position::from_index)
        .any(|pos| is_valid_move(pos, player, board))
}

/// Every legal square for `player`, row-major.
pub fn legal_moves(player: Player, board: &Board) -> Vec<Position> {
    (0..NUM_SQUARES)
        .filter_map(Position::from_index)
        .filter(|&pos| is_valid_move(pos, player, board))
        .collect()
}

/// Decides who moves after `mover` has just played on `board`.
///
/// Contract:
/// - opponent can move: [`TurnOutcome::Advance`].
/// - only the mover can move: [`TurnOutcome::Forfeit`].
/// - nobody can move: [`TurnOutcome::GameOver`] with the strict-majority winner.
pub fn resolve_turn(mover: Player, board: &Board) -> TurnOutcome {
    let opponent = !mover;
    if player_has_any_valid_move(opponent, board) {
        TurnOutcome::Advance(opponent)
    } else if player_has_any_valid_move(mover, board) {
        TurnOutcome::Forfeit(mover)
    } else {
        TurnOutcome::GameOver(calculate_score(board).leader())
    }
}

/// Walks the eight directions from `pos` and returns the captured squares as
/// a bit mask. A direction only counts when a run of opponent pieces is
/// closed by one of `player`'s own pieces.
pub(crate) fn flip_mask(board: &Board, pos: Position, player: Player) -> u64 {
    let (me, opp) = board.sides(player);
    let row = pos.row() as i32;
    let col = pos.col() as i32;
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let square = bit((r as usize) * BOARD_SIZE + c as usize);
            if (opp & square) != 0 {
                line |= square;
            } else if (me & square) != 0 {
                flips |= line;
                break;
            } else {
                break;
            }

            r += dr;
            c += dc;
        }
    }

    flips
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
