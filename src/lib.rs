use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod game;
pub mod rules;
pub mod types;

pub use board::{BOARD_SIZE, Board, NUM_SQUARES};
pub use error::GameError;
pub use game::{GameSession, MoveOutcome};
pub use rules::{
    TurnOutcome, calculate_score, flippable_positions, initialize_board, is_valid_move,
    is_valid_move_at, legal_moves, player_has_any_valid_move, resolve_turn,
};
pub use types::{
    CELL_EMPTY, Cell, GameStatus, PLAYER_BLACK, PLAYER_WHITE, Player, Position, Score,
};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Opening position as 64 row-major cell codes.
#[wasm_bindgen(js_name = initializeBoard)]
pub fn initialize_board_js() -> Vec<u8> {
    initialize_board().to_array().to_vec()
}

/// Returns `{ black, white }`.
#[wasm_bindgen(js_name = calculateScore)]
pub fn calculate_score_js(board: &[u8]) -> Result<JsValue, JsValue> {
    let board = Board::from_cells(board).map_err(to_js_error)?;
    to_js(&calculate_score(&board))
}

/// Returns `[{ row, col }]`; empty for out-of-range coordinates.
#[wasm_bindgen(js_name = getFlippablePositions)]
pub fn flippable_positions_js(
    row: i32,
    col: i32,
    player: u8,
    board: &[u8],
) -> Result<JsValue, JsValue> {
    let player = Player::from_code(player).map_err(to_js_error)?;
    let board = Board::from_cells(board).map_err(to_js_error)?;
    let flips = match Position::new(row, col) {
        Some(pos) => flippable_positions(pos, player, &board),
        None => Vec::new(),
    };
    to_js(&flips)
}

#[wasm_bindgen(js_name = isValidMove)]
pub fn is_valid_move_js(row: i32, col: i32, player: u8, board: &[u8]) -> Result<bool, JsValue> {
    let player = Player::from_code(player).map_err(to_js_error)?;
    let board = Board::from_cells(board).map_err(to_js_error)?;
    Ok(is_valid_move_at(row, col, player, &board))
}

#[wasm_bindgen(js_name = playerHasAnyValidMove)]
pub fn player_has_any_valid_move_js(player: u8, board: &[u8]) -> Result<bool, JsValue> {
    let player = Player::from_code(player).map_err(to_js_error)?;
    let board = Board::from_cells(board).map_err(to_js_error)?;
    Ok(player_has_any_valid_move(player, &board))
}

/// One local game, owned by the front-end between clicks.
#[wasm_bindgen]
pub struct OthelloGame {
    session: GameSession,
}

#[wasm_bindgen]
impl OthelloGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: GameSession::new(),
        }
    }

    /// Returns `{ flipped, turn }` or throws when the move is rejected.
    pub fn place(&mut self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        let outcome = self.session.place_at(row, col).map_err(to_js_error)?;
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.session.new_game();
    }

    pub fn status(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.status())
    }

    pub fn board(&self) -> Vec<u8> {
        self.session.board().to_array().to_vec()
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.legal_moves())
    }
}

impl Default for OthelloGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: GameError) -> JsValue {
    JsError::new(&err.to_string()).into()
}
