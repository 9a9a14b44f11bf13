#![cfg(target_arch = "wasm32")]

use othello::{
    OthelloGame, PLAYER_BLACK, calculate_score_js, flippable_positions_js, initialize_board_js,
    is_valid_move_js, player_has_any_valid_move_js,
};
use serde::Deserialize;
use wasm_bindgen_test::*;

#[derive(Debug, PartialEq, Deserialize)]
struct Square {
    row: u8,
    col: u8,
}

#[derive(Debug, PartialEq, Deserialize)]
struct Score {
    black: u8,
    white: u8,
}

#[wasm_bindgen_test]
fn initial_board_crosses_the_boundary_as_cell_codes() {
    let board = initialize_board_js();

    assert_eq!(board.len(), 64);
    assert_eq!(board[27], 2);
    assert_eq!(board[28], 1);
    assert_eq!(board[35], 1);
    assert_eq!(board[36], 2);
}

#[wasm_bindgen_test]
fn validity_and_flips_on_fresh_board() {
    let board = initialize_board_js();

    assert_eq!(is_valid_move_js(2, 3, PLAYER_BLACK, &board), Ok(true));
    assert_eq!(is_valid_move_js(0, 0, PLAYER_BLACK, &board), Ok(false));
    assert_eq!(is_valid_move_js(-1, 9, PLAYER_BLACK, &board), Ok(false));
    assert_eq!(player_has_any_valid_move_js(PLAYER_BLACK, &board), Ok(true));

    let flips: Vec<Square> =
        serde_wasm_bindgen::from_value(flippable_positions_js(2, 3, PLAYER_BLACK, &board).unwrap())
            .unwrap();
    assert_eq!(flips, vec![Square { row: 3, col: 3 }]);

    let score: Score = serde_wasm_bindgen::from_value(calculate_score_js(&board).unwrap()).unwrap();
    assert_eq!(score, Score { black: 2, white: 2 });
}

#[wasm_bindgen_test]
fn malformed_input_is_rejected() {
    let board = initialize_board_js();

    assert!(is_valid_move_js(2, 3, 9, &board).is_err());
    assert!(calculate_score_js(&board[..10]).is_err());
}

#[wasm_bindgen_test]
fn game_object_tracks_turns() {
    let mut game = OthelloGame::new();

    assert!(game.place(2, 3).is_ok());
    assert!(game.place(2, 3).is_err());
    assert!(game.status().is_ok());
    assert_eq!(game.board().iter().filter(|&&c| c != 0).count(), 5);

    game.new_game();
    assert_eq!(game.board(), initialize_board_js());
}
