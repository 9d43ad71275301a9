//! Board engine tests, both direct and through the router

use plugin_tetris::bus::{BoardModule, Command, CommandRouter};
use plugin_tetris::core::Board;
use plugin_tetris::types::{Position, Rgb, Shape, BOARD_MODULE};
use serde_json::{json, Value};

const CYAN: Rgb = Rgb::new(0, 255, 255);

fn i_piece() -> Shape {
    Shape::from_rows(vec![vec![true; 4]]).unwrap()
}

fn router(width: usize, height: usize) -> CommandRouter {
    let mut router = CommandRouter::new();
    router.register(BOARD_MODULE, BoardModule::new(width, height));
    router
}

#[test]
fn test_i_piece_completes_bottom_row() {
    let mut board = Board::new(10, 20);
    for x in [0, 1, 2, 7, 8, 9] {
        assert!(board.set(x, 19, Some(Rgb::new(128, 128, 128))));
    }

    assert!(!board.is_collision(&i_piece(), Position::new(3, 19)));
    assert!(board.place_piece(&i_piece(), Position::new(3, 19), CYAN));
    assert!(board.is_row_full(19));

    assert_eq!(board.clear_lines(), 1);
    assert_eq!(board.state().occupied_count(), 0);
}

#[test]
fn test_collision_rules() {
    let mut board = Board::new(10, 20);
    let i = i_piece();

    assert!(board.is_collision(&i, Position::new(-1, 0)));
    assert!(board.is_collision(&i, Position::new(7, 0)));
    assert!(board.is_collision(&i, Position::new(0, 20)));
    assert!(!board.is_collision(&i, Position::new(6, 19)));
    // Cells above the grid are free.
    assert!(!board.is_collision(&i, Position::new(0, -3)));

    board.set(4, 10, Some(CYAN));
    assert!(board.is_collision(&i, Position::new(2, 10)));
    assert!(!board.is_collision(&i, Position::new(5, 10)));
}

#[test]
fn test_clear_keeps_surviving_rows_in_order() {
    let red = Rgb::new(255, 0, 0);
    let blue = Rgb::new(0, 0, 255);
    let mut board = Board::from_rows(vec![
        vec![None, None, None],
        vec![Some(red), None, None],
        vec![Some(CYAN); 3],
        vec![None, Some(blue), None],
        vec![Some(CYAN); 3],
    ])
    .unwrap();

    assert_eq!(board.clear_lines(), 2);
    let state = board.state();
    assert_eq!(state.grid[0], vec![None; 3]);
    assert_eq!(state.grid[1], vec![None; 3]);
    assert_eq!(state.grid[2], vec![None; 3]);
    assert_eq!(state.grid[3], vec![Some(red), None, None]);
    assert_eq!(state.grid[4], vec![None, Some(blue), None]);
}

#[test]
fn test_board_commands_over_the_router() {
    let mut router = router(4, 3);
    let piece = json!({ "shape": [[1, 1, 1, 1]], "position": [0, 2], "color": "#00FFFF" });

    let reply = router
        .dispatch(&Command::new(BOARD_MODULE, "is_collision", piece.clone()))
        .unwrap();
    assert_eq!(reply, json!({ "collision": false }));

    let reply = router
        .dispatch(&Command::new(BOARD_MODULE, "place_piece", piece.clone()))
        .unwrap();
    assert_eq!(reply, json!({ "placed": true }));

    let board = router
        .dispatch(&Command::new(BOARD_MODULE, "get_board", Value::Null))
        .unwrap();
    assert_eq!(board["grid"][2][0], "#00FFFF");
    assert_eq!(board["grid"][1][0], Value::Null);

    let reply = router
        .dispatch(&Command::new(BOARD_MODULE, "clear_lines", Value::Null))
        .unwrap();
    assert_eq!(reply, json!({ "cleared": 1 }));
}

#[test]
fn test_place_without_color_uses_default() {
    let mut router = router(4, 3);
    router
        .dispatch(&Command::new(
            BOARD_MODULE,
            "place_piece",
            json!({ "shape": [[1]], "position": [1, 1] }),
        ))
        .unwrap();
    let board = router
        .dispatch(&Command::new(BOARD_MODULE, "get_board", Value::Null))
        .unwrap();
    assert_eq!(board["grid"][1][1], "#FF00FF");
}

#[test]
fn test_bad_parameters_are_reported() {
    let mut router = router(4, 3);
    let err = router
        .dispatch(&Command::new(BOARD_MODULE, "place_piece", json!({ "shape": [] })))
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_parameters");

    let err = router
        .dispatch(&Command::new(BOARD_MODULE, "spin", Value::Null))
        .unwrap_err();
    assert_eq!(err.kind(), "unknown_command");
    assert_eq!(err.received(), "spin");
}
