//! Module adapters - expose the core engines through [`ModuleHandler`]
//!
//! Each adapter owns its engine exclusively; other components reach it only by
//! dispatching commands. Parameters are decoded once into typed requests and
//! replies are typed structs serialized into the response payload, so callers
//! can decode them back with the same types.
//!
//! | module | commands |
//! |--------|----------|
//! | [`BoardModule`] | `is_collision`, `place_piece`, `erase_piece`, `clear_lines`, `get_board`, `reset_board` |
//! | [`ScoringModule`] | `update_score`, `reset_score`, `get_score` |
//! | [`MovementModule`] | `move_left`, `move_right`, `move_down`, `rotate`, `drop`, `apply_movement` |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::{movement, Board, Scoring};
use crate::error::CommandError;
use crate::router::{ModuleHandler, Response};
use crate::types::{Direction, Position, Rgb, Shape, DEFAULT_PIECE_COLOR, MOVE_MODULE};

/// Decode command parameters into `T`, mapping failures to `invalid_parameters`.
pub fn decode<T: DeserializeOwned>(command: &str, parameters: &Value) -> Result<T, CommandError> {
    T::deserialize(parameters).map_err(|e| CommandError::invalid(command, e.to_string()))
}

/// Serialize a reply, mapping failures to `handler_failure`.
pub fn reply<T: Serialize>(command: &str, value: &T) -> Response {
    serde_json::to_value(value).map_err(|e| CommandError::failure(command, e.to_string()))
}

/// `{shape, position, color?}` for board piece commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceRequest {
    pub shape: Shape,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionReply {
    pub collision: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedReply {
    pub placed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearedReply {
    pub cleared: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinesRequest {
    #[serde(default)]
    pub lines: u32,
}

/// Board engine behind the router.
#[derive(Debug, Clone)]
pub struct BoardModule {
    board: Board,
}

impl BoardModule {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board: Board::new(width, height),
        }
    }

    pub fn with_board(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl ModuleHandler for BoardModule {
    fn handle(&mut self, command: &str, parameters: &Value) -> Response {
        match command {
            "is_collision" => {
                let req: PieceRequest = decode(command, parameters)?;
                let collision = self.board.is_collision(&req.shape, req.position);
                reply(command, &CollisionReply { collision })
            }
            "place_piece" => {
                let req: PieceRequest = decode(command, parameters)?;
                let color = req.color.unwrap_or(DEFAULT_PIECE_COLOR);
                let placed = self.board.place_piece(&req.shape, req.position, color);
                reply(command, &PlacedReply { placed })
            }
            "erase_piece" => {
                let req: PieceRequest = decode(command, parameters)?;
                self.board.erase_piece(&req.shape, req.position);
                Ok(json!({ "erased": true }))
            }
            "clear_lines" => {
                let cleared = self.board.clear_lines() as u32;
                reply(command, &ClearedReply { cleared })
            }
            "get_board" => reply(command, &self.board.state()),
            "reset_board" => {
                self.board.reset();
                Ok(json!({ "status": "reset" }))
            }
            _ => Err(CommandError::unknown("board", command)),
        }
    }
}

/// Scoring engine behind the router.
#[derive(Debug, Clone, Default)]
pub struct ScoringModule {
    scoring: Scoring,
}

impl ScoringModule {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModuleHandler for ScoringModule {
    fn handle(&mut self, command: &str, parameters: &Value) -> Response {
        match command {
            "update_score" => {
                let req: LinesRequest = decode(command, parameters)?;
                reply(command, &self.scoring.update_score(req.lines))
            }
            "reset_score" => reply(command, &self.scoring.reset_score()),
            "get_score" => reply(command, &self.scoring.score()),
            _ => Err(CommandError::unknown("scoring", command)),
        }
    }
}

/// `move_action` record returned by the movement module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAction {
    pub event: String,
    pub source: String,
    #[serde(rename = "move")]
    pub direction: Direction,
    pub previous: Position,
    pub new_position: Position,
    pub offset: (i32, i32),
    pub rotate: bool,
    pub drop: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct PositionRequest {
    #[serde(default)]
    position: Position,
}

#[derive(Debug, Clone, Deserialize)]
struct ApplyMovementRequest {
    #[serde(default)]
    position: Position,
    #[serde(default = "default_move_type")]
    move_type: Direction,
}

fn default_move_type() -> Direction {
    Direction::Down
}

/// Stateless move resolver behind the router.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementModule;

impl MovementModule {
    fn direction_for(command: &str) -> Option<Direction> {
        match command.strip_prefix("move_") {
            Some(rest) => Direction::from_str(rest),
            None if command == "rotate" || command == "drop" => Direction::from_str(command),
            None => None,
        }
    }
}

impl ModuleHandler for MovementModule {
    fn handle(&mut self, command: &str, parameters: &Value) -> Response {
        if command == "apply_movement" {
            let req: ApplyMovementRequest = decode(command, parameters)?;
            let new_position = movement::resolve(req.move_type, req.position);
            return Ok(json!({ "new_position": new_position }));
        }

        let Some(direction) = Self::direction_for(command) else {
            return Err(CommandError::unknown("move", command));
        };
        let req: PositionRequest = decode(command, parameters)?;
        reply(
            command,
            &MoveAction {
                event: "move_action".to_string(),
                source: MOVE_MODULE.to_string(),
                direction,
                previous: req.position,
                new_position: movement::resolve(direction, req.position),
                offset: movement::step(direction),
                rotate: direction == Direction::Rotate,
                drop: direction == Direction::Drop,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoardState, ScoreState};

    #[test]
    fn test_board_place_and_query() {
        let mut board = BoardModule::new(4, 4);
        let placed = board
            .handle(
                "place_piece",
                &json!({ "shape": [[1, 1]], "position": [1, 3], "color": "#00FF00" }),
            )
            .unwrap();
        assert_eq!(placed, json!({ "placed": true }));

        let state: BoardState = serde_json::from_value(board.handle("get_board", &Value::Null).unwrap()).unwrap();
        assert_eq!(state.cell(1, 3), Some(Rgb::new(0, 255, 0)));
        assert_eq!(state.occupied_count(), 2);
    }

    #[test]
    fn test_board_default_color() {
        let mut board = BoardModule::new(2, 2);
        board
            .handle("place_piece", &json!({ "shape": [[1]], "position": [0, 0] }))
            .unwrap();
        assert_eq!(board.board().get(0, 0), Some(Some(DEFAULT_PIECE_COLOR)));
    }

    #[test]
    fn test_board_invalid_parameters() {
        let mut board = BoardModule::new(4, 4);
        let err = board.handle("is_collision", &json!({ "position": [0, 0] })).unwrap_err();
        assert_eq!(err.kind(), "invalid_parameters");
        let err = board.handle("place_piece", &Value::Null).unwrap_err();
        assert_eq!(err.kind(), "invalid_parameters");
    }

    #[test]
    fn test_board_unknown_command() {
        let err = BoardModule::new(1, 1).handle("explode", &Value::Null).unwrap_err();
        assert_eq!(err, CommandError::unknown("board", "explode"));
    }

    #[test]
    fn test_scoring_commands() {
        let mut scoring = ScoringModule::new();
        let s: ScoreState =
            serde_json::from_value(scoring.handle("update_score", &json!({ "lines": 2 })).unwrap()).unwrap();
        assert_eq!(s.total_score, 300);
        let reset = scoring.handle("reset_score", &Value::Null).unwrap();
        assert_eq!(reset, json!({ "lines_cleared": 0, "total_score": 0, "level": 1 }));
        assert_eq!(scoring.handle("get_score", &Value::Null).unwrap(), reset);
    }

    #[test]
    fn test_movement_commands() {
        let mut moves = MovementModule;
        let action: MoveAction =
            serde_json::from_value(moves.handle("move_left", &json!({ "position": [4, 0] })).unwrap()).unwrap();
        assert_eq!(action.new_position, Position::new(3, 0));
        assert_eq!(action.offset, (-1, 0));
        assert!(!action.rotate);

        let rotate = moves.handle("rotate", &json!({ "position": [4, 0] })).unwrap();
        assert_eq!(rotate["move"], "rotate");
        assert_eq!(rotate["new_position"], json!([4, 0]));
        assert_eq!(rotate["rotate"], true);

        let applied = moves
            .handle("apply_movement", &json!({ "position": [2, 2], "move_type": "right" }))
            .unwrap();
        assert_eq!(applied, json!({ "new_position": [3, 2] }));

        assert_eq!(moves.handle("move_up", &Value::Null).unwrap_err().kind(), "unknown_command");
        assert_eq!(moves.handle("teleport", &Value::Null).unwrap_err().kind(), "unknown_command");
    }
}
