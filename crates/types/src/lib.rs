//! Core types module - shared data structures and constants
//!
//! Plain data shared by every plugin module: grid cells and colors, piece
//! shapes and block definitions, positions and directions, score and board
//! snapshots, and the game phase. Nothing here knows about routing, events or
//! rendering.
//!
//! # Coordinates
//!
//! `(x, y)` where `x` is the column (left to right) and `y` the row, with row 0
//! at the top of the play-field. Rows with `y < 0` are above the visible grid;
//! spawning pieces may have cells there.
//!
//! # Wire forms
//!
//! | Type | JSON |
//! |------|------|
//! | [`Rgb`] | `"#RRGGBB"` |
//! | [`Cell`] | `null` (empty) or `"#RRGGBB"` |
//! | [`Position`] | `[x, y]` |
//! | [`Shape`] | `[[0, 1, 0], [1, 1, 1]]` |
//! | [`Direction`] | `"left"`, `"right"`, `"down"`, `"rotate"`, `"drop"` |
//!
//! # Examples
//!
//! ```
//! use plugin_tetris_types::{Direction, Rgb, Shape};
//!
//! let cyan = Rgb::from_hex("#00FFFF").unwrap();
//! assert_eq!(cyan, Rgb::new(0, 255, 255));
//! assert_eq!(cyan.to_hex(), "#00FFFF");
//!
//! let i_piece = Shape::from_rows(vec![vec![true, true, true, true]]).unwrap();
//! assert_eq!(i_piece.cells().count(), 4);
//!
//! assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Default interval between gravity ticks in milliseconds
pub const DEFAULT_TICK_MS: u64 = 500;

/// Default spawn row for new pieces
pub const DEFAULT_SPAWN_ROW: i32 = 0;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points per lines cleared in a single lock (index = lines), multiplied by level
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Color written by `place_piece` when the caller gives none (magenta)
pub const DEFAULT_PIECE_COLOR: Rgb = Rgb::new(255, 0, 255);

/// Registered module names.
pub const BOARD_MODULE: &str = "tetris-board-engine";
pub const SCORING_MODULE: &str = "tetris-scoring-rules";
pub const MOVE_MODULE: &str = "tetris-move-controller";
pub const LOOP_MODULE: &str = "tetris-play-loop";

/// Event sources that are not routed modules.
pub const STATE_SOURCE: &str = "tetris-game-state";
pub const UI_SOURCE: &str = "tetris-ui";

/// Event types published on the bus.
pub const EVENT_STATE_CHANGE: &str = "state_change";
pub const EVENT_SCORE_UPDATE: &str = "score_update";
pub const EVENT_PIECE_LOCKED: &str = "piece_locked";
pub const EVENT_GAME_TICK: &str = "game_tick";
pub const EVENT_BUTTON_PRESS: &str = "button_press";

/// 24-bit RGB color, carried on the wire as `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (case-insensitive). Returns `None` for anything else.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}, expected #RRGGBB"))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// A grid cell: `None` is empty, `Some(color)` is occupied.
pub type Cell = Option<Rgb>;

/// Anchor position of a shape on the grid (top-left of its matrix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i32, i32) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

/// Requested piece movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Down,
    Rotate,
    Drop,
}

impl Direction {
    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "down" => Some(Direction::Down),
            "rotate" => Some(Direction::Rotate),
            "drop" => Some(Direction::Drop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Rotate => "rotate",
            Direction::Drop => "drop",
        }
    }
}

/// Immutable occupancy matrix of one rotation state.
///
/// Always non-empty and rectangular.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Build a shape, rejecting empty or ragged matrices.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, String> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err("shape must have at least one row and one column".to_string());
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err("shape rows must all have the same length".to_string());
        }
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Local `(dx, dy)` offsets of every occupied cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, occupied)| **occupied)
                .map(move |(dx, _)| (dx as i32, dy as i32))
        })
    }

    /// The shape turned 90 degrees clockwise.
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let rows = (0..w)
            .map(|x| (0..h).rev().map(|y| self.rows[y][x]).collect())
            .collect();
        Self { rows }
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = String;

    fn try_from(value: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Shape::from_rows(
            value
                .into_iter()
                .map(|row| row.into_iter().map(|c| c != 0).collect())
                .collect(),
        )
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(u8::from).collect())
            .collect()
    }
}

/// A named piece type: ordered rotation states plus one display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub name: String,
    pub color: Rgb,
    pub rotations: Vec<Shape>,
}

impl BlockDefinition {
    /// Rotation state for `index`, wrapping modulo the rotation count.
    pub fn rotation(&self, index: usize) -> &Shape {
        &self.rotations[index % self.rotations.len()]
    }
}

/// Score snapshot owned by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub lines_cleared: u32,
    pub total_score: u32,
    pub level: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            lines_cleared: 0,
            total_score: 0,
            level: 1,
        }
    }
}

/// Read-only board snapshot, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardState {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<Cell>>,
}

impl BoardState {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.grid.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    pub fn occupied_count(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.is_some()).count()
    }
}

/// Lifecycle of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Uninitialized,
    Running,
    Paused,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Uninitialized => "uninitialized",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// On-screen buttons the UI reports through `button_press` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonId {
    Start,
    Pause,
    Quit,
}

impl ButtonId {
    pub fn label(&self) -> &'static str {
        match self {
            ButtonId::Start => "Start",
            ButtonId::Pause => "Pause",
            ButtonId::Quit => "Quit",
        }
    }
}
