//! Game-state controller - phase machine and active-piece owner
//!
//! The active piece lives on the grid while it falls. Every move follows the
//! same cycle: erase the piece, test the candidate against the board, then
//! place it at the candidate (legal) or back where it was (illegal). The board
//! and scoring engines are reached only through the command router; the move
//! resolver is a pure function and is called directly.
//!
//! Phases: `uninitialized -> running <-> paused`, `running -> game_over`.
//! Ticks, moves and rotations are ignored outside `running`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use plugin_tetris_bus::modules::{ClearedReply, CollisionReply, PlacedReply};
use plugin_tetris_bus::{Command, CommandRouter, EventBus, Response};
use plugin_tetris_core::{movement, BlockSet, PieceBag};
use plugin_tetris_types::{
    BlockDefinition, BoardState, Direction, GamePhase, Position, ScoreState, Shape, BOARD_MODULE,
    DEFAULT_SPAWN_ROW, EVENT_PIECE_LOCKED, EVENT_SCORE_UPDATE, EVENT_STATE_CHANGE, SCORING_MODULE,
    STATE_SOURCE,
};

use crate::error::GameError;

/// The falling piece: which definition, which rotation state, where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActivePiece {
    pub block: usize,
    pub rotation: usize,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Row the anchor spawns on; may be negative.
    pub spawn_row: i32,
    /// Fixed spawn column; `None` centres each shape.
    pub spawn_column: Option<i32>,
    pub seed: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            spawn_row: DEFAULT_SPAWN_ROW,
            spawn_column: None,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartOptions {
    /// Start on the current grid instead of clearing it.
    pub keep_board: bool,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened.
    Skipped,
    /// The piece moved down one row.
    Moved,
    /// The piece locked and a new one spawned.
    Locked { cleared: u32 },
    /// The piece locked and the next spawn was blocked.
    GameOver,
}

#[derive(Debug)]
pub struct GameController {
    router: CommandRouter,
    bus: EventBus,
    blocks: BlockSet,
    bag: PieceBag,
    options: ControllerOptions,
    phase: GamePhase,
    active: Option<ActivePiece>,
    board_width: usize,
    board_height: usize,
}

impl GameController {
    /// `router` must carry the board and scoring modules under their standard
    /// names; missing modules surface as errors from the first operation.
    pub fn new(router: CommandRouter, bus: EventBus, blocks: BlockSet, options: ControllerOptions) -> Self {
        let bag = PieceBag::new(blocks.len(), options.seed);
        Self {
            router,
            bus,
            blocks,
            bag,
            options,
            phase: GamePhase::Uninitialized,
            active: None,
            board_width: 0,
            board_height: 0,
        }
    }

    /// Start (or restart) on a cleared board.
    pub fn start(&mut self) -> Result<GamePhase, GameError> {
        self.start_with(StartOptions::default())
    }

    /// Start (or restart): reset the score and spawn the first piece.
    ///
    /// Ends in `running`, or straight in `game_over` when the first spawn
    /// collides.
    pub fn start_with(&mut self, options: StartOptions) -> Result<GamePhase, GameError> {
        if self.blocks.is_empty() {
            return Err(GameError::EmptyBlockSet);
        }

        if let Some(piece) = self.active.take() {
            self.erase(&piece)?;
        }
        if !options.keep_board {
            self.call::<Value>(BOARD_MODULE, "reset_board", Value::Null)?;
        }
        let board: BoardState = self.call(BOARD_MODULE, "get_board", Value::Null)?;
        self.board_width = board.width;
        self.board_height = board.height;
        self.call::<ScoreState>(SCORING_MODULE, "reset_score", Value::Null)?;

        if self.spawn()? {
            self.set_phase(GamePhase::Running, json!({ "reason": "start" }));
        } else {
            self.game_over("spawn_blocked")?;
        }
        Ok(self.phase)
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.set_phase(GamePhase::Paused, json!({ "reason": "pause" }));
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.set_phase(GamePhase::Running, json!({ "reason": "resume" }));
        true
    }

    /// `running <-> paused`; no-op in any other phase.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Advance gravity by one row, locking the piece when it cannot fall.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.phase != GamePhase::Running {
            return Ok(TickOutcome::Skipped);
        }
        let piece = self.active.ok_or(GameError::NoActivePiece)?;
        let below = ActivePiece {
            position: movement::resolve(Direction::Down, piece.position),
            ..piece
        };
        if self.shift(piece, below)? {
            return Ok(TickOutcome::Moved);
        }
        self.lock(piece)
    }

    /// Apply a player move. Returns whether the piece changed.
    pub fn move_piece(&mut self, direction: Direction) -> Result<bool, GameError> {
        match direction {
            Direction::Rotate => self.rotate(),
            Direction::Drop => self.drop_piece().map(|rows| rows > 0),
            Direction::Left | Direction::Right | Direction::Down => {
                let Some(piece) = self.movable() else {
                    return Ok(false);
                };
                let candidate = ActivePiece {
                    position: movement::resolve(direction, piece.position),
                    ..piece
                };
                self.shift(piece, candidate)
            }
        }
    }

    /// Advance to the next rotation state in place (no wall kicks).
    pub fn rotate(&mut self) -> Result<bool, GameError> {
        let Some(piece) = self.movable() else {
            return Ok(false);
        };
        let states = self.definition(piece.block)?.rotations.len();
        let candidate = ActivePiece {
            rotation: (piece.rotation + 1) % states,
            ..piece
        };
        if candidate.rotation == piece.rotation {
            return Ok(false);
        }
        self.shift(piece, candidate)
    }

    /// Move the piece straight down to its landing row. Returns the rows
    /// travelled; the piece locks on the next tick.
    pub fn drop_piece(&mut self) -> Result<u32, GameError> {
        let Some(piece) = self.movable() else {
            return Ok(0);
        };
        self.erase(&piece)?;

        // No landing row can lie further down than this.
        let shape_height = self.definition(piece.block)?.rotation(piece.rotation).height();
        let limit = (self.board_height + shape_height) as u32;
        let mut landing = piece;
        let mut rows = 0;
        while rows < limit {
            let next = ActivePiece {
                position: movement::resolve(Direction::Drop, landing.position),
                ..landing
            };
            if self.collides(&next)? {
                break;
            }
            landing = next;
            rows += 1;
        }

        self.place(&landing)?;
        self.active = Some(landing);
        Ok(rows)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Shape of the active piece in its current rotation.
    pub fn active_shape(&self) -> Option<&Shape> {
        let piece = self.active?;
        self.blocks
            .get(piece.block)
            .map(|def| def.rotation(piece.rotation))
    }

    /// Definition the next spawn will use.
    pub fn next_block(&self) -> Option<&BlockDefinition> {
        if self.blocks.is_empty() {
            return None;
        }
        self.blocks.get(self.bag.peek())
    }

    pub fn blocks(&self) -> &BlockSet {
        &self.blocks
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn board_state(&mut self) -> Result<BoardState, GameError> {
        self.call(BOARD_MODULE, "get_board", Value::Null)
    }

    pub fn score_state(&mut self) -> Result<ScoreState, GameError> {
        self.call(SCORING_MODULE, "get_score", Value::Null)
    }

    /// Route an arbitrary command through the controller's router.
    pub fn dispatch(&mut self, command: &Command) -> Response {
        self.router.dispatch(command)
    }

    fn movable(&self) -> Option<ActivePiece> {
        match self.phase {
            GamePhase::Running => self.active,
            _ => None,
        }
    }

    fn definition(&self, block: usize) -> Result<&BlockDefinition, GameError> {
        self.blocks.get(block).ok_or(GameError::EmptyBlockSet)
    }

    fn spawn(&mut self) -> Result<bool, GameError> {
        let block = self.bag.draw();
        let shape_width = self.definition(block)?.rotation(0).width() as i32;
        let column = self
            .options
            .spawn_column
            .unwrap_or_else(|| ((self.board_width as i32 - shape_width) / 2).max(0));
        let piece = ActivePiece {
            block,
            rotation: 0,
            position: Position::new(column, self.options.spawn_row),
        };

        if self.collides(&piece)? {
            log::info!("spawn blocked at ({}, {})", column, self.options.spawn_row);
            return Ok(false);
        }
        self.place(&piece)?;
        self.active = Some(piece);
        Ok(true)
    }

    /// Erase `from`, then place `to` if it fits or `from` again if not.
    fn shift(&mut self, from: ActivePiece, to: ActivePiece) -> Result<bool, GameError> {
        self.erase(&from)?;
        if self.collides(&to)? {
            self.place(&from)?;
            return Ok(false);
        }
        self.place(&to)?;
        self.active = Some(to);
        Ok(true)
    }

    /// The piece is already on the grid; locking stops tracking it. Cells
    /// still above row 0 cannot be kept, so such a lock ends the game.
    fn lock(&mut self, piece: ActivePiece) -> Result<TickOutcome, GameError> {
        self.active = None;
        let ClearedReply { cleared } = self.call(BOARD_MODULE, "clear_lines", Value::Null)?;
        if cleared > 0 {
            let score: ScoreState = self.call(SCORING_MODULE, "update_score", json!({ "lines": cleared }))?;
            self.bus.publish(EVENT_SCORE_UPDATE, STATE_SOURCE, json!(score));
        }

        let name = self.definition(piece.block)?.name.clone();
        log::debug!("{name} locked at ({}, {}), {cleared} lines", piece.position.x, piece.position.y);
        self.bus.publish(
            EVENT_PIECE_LOCKED,
            STATE_SOURCE,
            json!({
                "block": name,
                "position": piece.position,
                "rotation": piece.rotation,
                "lines_cleared": cleared,
            }),
        );

        let above_grid = self
            .definition(piece.block)?
            .rotation(piece.rotation)
            .cells()
            .any(|(_, dy)| piece.position.y + dy < 0);
        if above_grid {
            self.game_over("lock_out")?;
            return Ok(TickOutcome::GameOver);
        }

        if self.spawn()? {
            Ok(TickOutcome::Locked { cleared })
        } else {
            self.game_over("spawn_blocked")?;
            Ok(TickOutcome::GameOver)
        }
    }

    fn game_over(&mut self, reason: &str) -> Result<(), GameError> {
        self.active = None;
        let score: ScoreState = self.call(SCORING_MODULE, "get_score", Value::Null)?;
        self.set_phase(
            GamePhase::GameOver,
            json!({
                "reason": reason,
                "final_score": score.total_score,
                "level_reached": score.level,
            }),
        );
        Ok(())
    }

    fn set_phase(&mut self, phase: GamePhase, details: Value) {
        log::info!("phase {} -> {}", self.phase.as_str(), phase.as_str());
        self.phase = phase;
        self.bus.publish(
            EVENT_STATE_CHANGE,
            STATE_SOURCE,
            json!({ "state": phase, "details": details }),
        );
    }

    fn piece_params(&self, piece: &ActivePiece) -> Result<Value, GameError> {
        let def = self.definition(piece.block)?;
        Ok(json!({
            "shape": def.rotation(piece.rotation),
            "position": piece.position,
            "color": def.color,
        }))
    }

    fn collides(&mut self, piece: &ActivePiece) -> Result<bool, GameError> {
        let params = self.piece_params(piece)?;
        let reply: CollisionReply = self.call(BOARD_MODULE, "is_collision", params)?;
        Ok(reply.collision)
    }

    fn place(&mut self, piece: &ActivePiece) -> Result<bool, GameError> {
        let params = self.piece_params(piece)?;
        let reply: PlacedReply = self.call(BOARD_MODULE, "place_piece", params)?;
        Ok(reply.placed)
    }

    fn erase(&mut self, piece: &ActivePiece) -> Result<(), GameError> {
        let params = self.piece_params(piece)?;
        self.call::<Value>(BOARD_MODULE, "erase_piece", params)?;
        Ok(())
    }

    /// Dispatch and decode the reply, checking for an error payload first.
    fn call<T: DeserializeOwned>(&mut self, module: &str, command: &str, parameters: Value) -> Result<T, GameError> {
        let reply = self.router.dispatch(&Command::new(module, command, parameters))?;
        serde_json::from_value(reply).map_err(|e| GameError::MalformedResponse {
            module: module.to_string(),
            command: command.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugin_tetris_bus::{BoardModule, CommandError, Event, ScoringModule};
    use std::sync::{Arc, Mutex};

    const O_BLOCK: &str = r##"[{"name":"O","color":"#FFFF00","rotations":[[[1,1],[1,1]]]}]"##;
    const I_BLOCK: &str =
        r##"[{"name":"I","color":"#00FFFF","rotations":[[[1,1,1,1]],[[1],[1],[1],[1]]]}]"##;

    type Recorded = Arc<Mutex<Vec<Event>>>;

    fn controller_with(width: usize, height: usize, blocks: &str, options: ControllerOptions) -> (GameController, Recorded) {
        let mut router = CommandRouter::new();
        router.register(BOARD_MODULE, BoardModule::new(width, height));
        router.register(SCORING_MODULE, ScoringModule::new());

        let bus = EventBus::new();
        let events: Recorded = Arc::new(Mutex::new(Vec::new()));
        for kind in [EVENT_STATE_CHANGE, EVENT_SCORE_UPDATE, EVENT_PIECE_LOCKED] {
            let sink = Arc::clone(&events);
            bus.subscribe(kind, move |event: &Event| {
                sink.lock().unwrap().push(event.clone());
                Ok(())
            });
        }

        let blocks = BlockSet::from_json_str(blocks).unwrap();
        (GameController::new(router, bus, blocks, options), events)
    }

    fn controller(width: usize, height: usize, blocks: &str) -> (GameController, Recorded) {
        controller_with(width, height, blocks, ControllerOptions::default())
    }

    fn states(events: &Recorded) -> Vec<String> {
        events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event == EVENT_STATE_CHANGE)
            .map(|e| e.payload["state"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_start_spawns_centred_piece() {
        let (mut game, events) = controller(4, 4, O_BLOCK);
        assert_eq!(game.phase(), GamePhase::Uninitialized);
        assert_eq!(game.start().unwrap(), GamePhase::Running);

        let piece = game.active().unwrap();
        assert_eq!(piece.position, Position::new(1, 0));
        assert_eq!(piece.rotation, 0);
        assert_eq!(game.board_state().unwrap().occupied_count(), 4);
        assert_eq!(states(&events), vec!["running"]);
    }

    #[test]
    fn test_full_rows_clear_and_score() {
        let (mut game, events) = controller(2, 4, O_BLOCK);
        game.start().unwrap();

        assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
        assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
        assert_eq!(game.tick().unwrap(), TickOutcome::Locked { cleared: 2 });

        let score = game.score_state().unwrap();
        assert_eq!((score.lines_cleared, score.total_score, score.level), (2, 300, 1));
        // Only the fresh piece remains on the grid.
        assert_eq!(game.board_state().unwrap().occupied_count(), 4);
        assert_eq!(game.active().unwrap().position, Position::new(0, 0));

        let events = events.lock().unwrap();
        let update = events.iter().find(|e| e.event == EVENT_SCORE_UPDATE).unwrap();
        assert_eq!(update.payload["total_score"], 300);
        let locked = events.iter().find(|e| e.event == EVENT_PIECE_LOCKED).unwrap();
        assert_eq!(locked.payload["block"], "O");
        assert_eq!(locked.payload["position"], json!([0, 2]));
        assert_eq!(locked.payload["lines_cleared"], 2);
    }

    #[test]
    fn test_stack_to_top_ends_game() {
        let (mut game, events) = controller(4, 4, O_BLOCK);
        game.start().unwrap();

        assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
        assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
        assert_eq!(game.tick().unwrap(), TickOutcome::Locked { cleared: 0 });
        assert_eq!(game.tick().unwrap(), TickOutcome::GameOver);

        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.active().is_none());
        assert_eq!(game.tick().unwrap(), TickOutcome::Skipped);
        assert!(!game.move_piece(Direction::Left).unwrap());

        let events = events.lock().unwrap();
        let over = events.iter().rev().find(|e| e.event == EVENT_STATE_CHANGE).unwrap();
        assert_eq!(over.payload["state"], "game_over");
        assert_eq!(
            over.payload["details"],
            json!({ "reason": "spawn_blocked", "final_score": 0, "level_reached": 1 })
        );
        assert_eq!(events.iter().filter(|e| e.event == EVENT_PIECE_LOCKED).count(), 2);
    }

    #[test]
    fn test_prefilled_board_goes_straight_to_game_over() {
        let (mut game, events) = controller(4, 4, O_BLOCK);
        game.dispatch(&Command::new(
            BOARD_MODULE,
            "place_piece",
            json!({ "shape": [[1, 1, 1, 1]], "position": [0, 0] }),
        ))
        .unwrap();

        let phase = game.start_with(StartOptions { keep_board: true }).unwrap();
        assert_eq!(phase, GamePhase::GameOver);
        assert_eq!(states(&events), vec!["game_over"]);

        // A normal start clears the board again.
        assert_eq!(game.start().unwrap(), GamePhase::Running);
    }

    #[test]
    fn test_pause_toggles_and_blocks_input() {
        let (mut game, events) = controller(4, 6, O_BLOCK);
        assert!(!game.pause());
        game.start().unwrap();

        assert!(game.toggle_pause());
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.tick().unwrap(), TickOutcome::Skipped);
        assert!(!game.move_piece(Direction::Left).unwrap());
        assert_eq!(game.drop_piece().unwrap(), 0);
        assert!(!game.pause());

        assert!(game.toggle_pause());
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(states(&events), vec!["running", "paused", "running"]);
    }

    #[test]
    fn test_blocked_move_leaves_grid_intact() {
        let (mut game, _) = controller(4, 4, O_BLOCK);
        game.start().unwrap();
        let before = game.board_state().unwrap();

        assert!(game.move_piece(Direction::Left).unwrap());
        assert!(!game.move_piece(Direction::Left).unwrap());
        assert_eq!(game.active().unwrap().position, Position::new(0, 0));
        assert_eq!(game.board_state().unwrap().occupied_count(), before.occupied_count());

        // A single rotation state never rotates.
        assert!(!game.rotate().unwrap());
    }

    #[test]
    fn test_rotate_cycles_states() {
        let (mut game, _) = controller(4, 6, I_BLOCK);
        game.start().unwrap();
        assert_eq!(game.active().unwrap().position, Position::new(0, 0));

        assert!(game.rotate().unwrap());
        assert_eq!(game.active().unwrap().rotation, 1);
        let board = game.board_state().unwrap();
        assert!(board.cell(0, 3).is_some());
        assert!(board.cell(1, 0).is_none());
        assert_eq!(board.occupied_count(), 4);

        assert!(game.move_piece(Direction::Rotate).unwrap());
        assert_eq!(game.active().unwrap().rotation, 0);
        assert_eq!(game.active_shape().unwrap().width(), 4);
    }

    #[test]
    fn test_drop_lands_then_locks_on_tick() {
        let (mut game, _) = controller(4, 6, O_BLOCK);
        game.start().unwrap();

        assert_eq!(game.drop_piece().unwrap(), 4);
        assert_eq!(game.active().unwrap().position, Position::new(1, 4));
        assert_eq!(game.tick().unwrap(), TickOutcome::Locked { cleared: 0 });
        assert_eq!(game.board_state().unwrap().occupied_count(), 8);
    }

    #[test]
    fn test_spawn_above_grid_is_passable() {
        let options = ControllerOptions {
            spawn_row: -1,
            ..ControllerOptions::default()
        };
        let (mut game, _) = controller_with(2, 2, O_BLOCK, options);
        game.start().unwrap();
        assert_eq!(game.board_state().unwrap().occupied_count(), 2);

        assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
        assert_eq!(game.board_state().unwrap().occupied_count(), 4);
    }

    #[test]
    fn test_lock_above_grid_ends_game() {
        let options = ControllerOptions {
            spawn_row: -1,
            ..ControllerOptions::default()
        };
        let (mut game, events) = controller_with(2, 1, O_BLOCK, options);
        game.start().unwrap();

        assert_eq!(game.tick().unwrap(), TickOutcome::GameOver);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.active().is_none());

        let events = events.lock().unwrap();
        let over = events.iter().rev().find(|e| e.event == EVENT_STATE_CHANGE).unwrap();
        assert_eq!(over.payload["details"]["reason"], "lock_out");
        // The visible row still counted as a clear.
        assert_eq!(over.payload["details"]["final_score"], 100);
    }

    #[test]
    fn test_drop_is_bounded_by_board_height() {
        // A board that never reports a collision.
        let mut router = CommandRouter::new();
        router.register(BOARD_MODULE, |command: &str, _: &Value| -> Response {
            match command {
                "is_collision" => Ok(json!({ "collision": false })),
                "place_piece" => Ok(json!({ "placed": true })),
                "erase_piece" => Ok(json!({ "erased": true })),
                "reset_board" => Ok(json!({ "status": "reset" })),
                "get_board" => Ok(json!(BoardState {
                    width: 4,
                    height: 3,
                    grid: vec![vec![None; 4]; 3],
                })),
                _ => Err(CommandError::unknown("board", command)),
            }
        });
        router.register(SCORING_MODULE, ScoringModule::new());
        let blocks = BlockSet::from_json_str(O_BLOCK).unwrap();
        let mut game = GameController::new(router, EventBus::new(), blocks, ControllerOptions::default());
        game.start().unwrap();

        assert_eq!(game.drop_piece().unwrap(), 5);
        assert_eq!(game.active().unwrap().position, Position::new(1, 5));
    }

    #[test]
    fn test_start_rejects_empty_block_set() {
        let mut router = CommandRouter::new();
        router.register(BOARD_MODULE, BoardModule::new(4, 4));
        let mut game = GameController::new(router, EventBus::new(), BlockSet::default(), ControllerOptions::default());

        assert_eq!(game.start(), Err(GameError::EmptyBlockSet));
        assert_eq!(game.phase(), GamePhase::Uninitialized);
        assert!(game.next_block().is_none());
    }

    #[test]
    fn test_missing_board_module_is_reported() {
        let blocks = BlockSet::from_json_str(O_BLOCK).unwrap();
        let mut game = GameController::new(CommandRouter::new(), EventBus::new(), blocks, ControllerOptions::default());

        let err = game.start().unwrap_err();
        assert_eq!(
            err,
            GameError::Command(CommandError::ModuleNotFound {
                module: BOARD_MODULE.to_string()
            })
        );
    }

    #[test]
    fn test_fixed_spawn_column() {
        let options = ControllerOptions {
            spawn_column: Some(0),
            ..ControllerOptions::default()
        };
        let (mut game, _) = controller_with(6, 6, O_BLOCK, options);
        game.start().unwrap();
        assert_eq!(game.active().unwrap().position, Position::new(0, 0));
        assert_eq!(game.next_block().unwrap().name, "O");
    }
}
