use serde::Serialize;
use tracing::{debug, info};

use crate::board::Board;
use crate::error::GameError;
use crate::rules::{self, TurnOutcome};
use crate::types::{GameStatus, Player, Position, Score};

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// Captured positions, row-major.
    pub flipped: Vec<Position>,
    pub turn: TurnOutcome,
}

/// Caller-side state for one local two-player game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    is_game_over: bool,
    winner: Option<Player>,
    flipped: Vec<Position>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            board: rules::initialize_board(),
            current_player: Player::default(),
            is_game_over: false,
            winner: None,
            flipped: Vec::new(),
        }
    }

    /// Loads an arbitrary position with `current_player` to move.
    ///
    /// The position is settled right away: a full or dead board ends the
    /// game, and a player with no move hands the turn to the opponent.
    pub fn from_position(board: Board, current_player: Player) -> Self {
        let mut session = Self {
            board,
            current_player,
            is_game_over: false,
            winner: None,
            flipped: Vec::new(),
        };
        session.settle();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// `None` while running, and `None` after a draw.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn score(&self) -> Score {
        rules::calculate_score(&self.board)
    }

    pub fn flipped(&self) -> &[Position] {
        &self.flipped
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_game_over {
            return Vec::new();
        }
        rules::legal_moves(self.current_player, &self.board)
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            current_player: self.current_player,
            score: self.score(),
            game_over: self.is_game_over,
            winner: self.winner,
            flipped: self.flipped.clone(),
        }
    }

    /// Plays `current_player` at raw coordinates.
    pub fn place_at(&mut self, row: i32, col: i32) -> Result<MoveOutcome, GameError> {
        let pos = Position::new(row, col).ok_or(GameError::OutOfBounds { row, col })?;
        self.place(pos)
    }

    /// Plays `current_player` at `pos`, flips the captured pieces and hands
    /// the turn over. The session is left untouched on error.
    pub fn place(&mut self, pos: Position) -> Result<MoveOutcome, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }

        let mover = self.current_player;
        if !self.board.is_empty(pos) {
            debug!(row = pos.row(), col = pos.col(), ?mover, "rejected move on occupied cell");
            return Err(GameError::Occupied(pos));
        }

        let flipped = self.board.place(pos, mover);
        if flipped.is_empty() {
            debug!(row = pos.row(), col = pos.col(), ?mover, "rejected move without captures");
            return Err(GameError::IllegalMove(pos));
        }

        debug!(
            row = pos.row(),
            col = pos.col(),
            ?mover,
            flipped = flipped.len(),
            "move applied"
        );
        self.flipped = flipped.clone();

        let turn = rules::resolve_turn(mover, &self.board);
        match turn {
            TurnOutcome::Advance(next) => self.current_player = next,
            TurnOutcome::Forfeit(again) => {
                let skipped = !again;
                info!(?skipped, player = ?again, "player has no valid moves, plays again");
                self.current_player = again;
            }
            TurnOutcome::GameOver(winner) => self.end_game(winner, self.board.is_full()),
        }

        if !self.is_game_over && self.board.is_full() {
            self.end_game(self.score().leader(), true);
        }

        Ok(MoveOutcome { flipped, turn })
    }

    /// Resets to the opening position with Black to move.
    pub fn new_game(&mut self) {
        debug!("new game");
        *self = Self::new();
    }

    fn settle(&mut self) {
        if self.board.is_full() {
            self.end_game(self.score().leader(), true);
            return;
        }

        if rules::player_has_any_valid_move(self.current_player, &self.board) {
            return;
        }

        let opponent = !self.current_player;
        if rules::player_has_any_valid_move(opponent, &self.board) {
            let skipped = self.current_player;
            info!(?skipped, player = ?opponent, "player has no valid moves, turn passes");
            self.current_player = opponent;
        } else {
            self.end_game(self.score().leader(), false);
        }
    }

    fn end_game(&mut self, winner: Option<Player>, board_full: bool) {
        let score = self.score();
        info!(
            black = score.black,
            white = score.white,
            ?winner,
            board_full,
            "game over"
        );
        self.is_game_over = true;
        self.winner = winner;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
