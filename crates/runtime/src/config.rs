//! Game configuration
//!
//! Defaults, then an optional JSON file, then environment overrides:
//!
//! | variable | field |
//! |----------|-------|
//! | `TETRIS_CONFIG` | path of a JSON config file |
//! | `TETRIS_BOARD_WIDTH` | `board_width` |
//! | `TETRIS_BOARD_HEIGHT` | `board_height` |
//! | `TETRIS_TICK_MS` | `tick_interval_ms` |
//! | `TETRIS_BLOCKS_PATH` | `blocks_path` |
//! | `TETRIS_TICK_LIMIT` | `tick_limit` |
//! | `TETRIS_SEED` | `seed` |

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use plugin_tetris_core::BlockSet;
use plugin_tetris_engine::ControllerOptions;
use plugin_tetris_types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_SPAWN_ROW, DEFAULT_TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: usize,
    pub board_height: usize,
    pub tick_interval_ms: u64,
    /// May be negative. A piece that locks with cells still above row 0
    /// ends the game (`lock_out`).
    pub spawn_row: i32,
    /// `None` centres each shape on the board.
    pub spawn_column: Option<i32>,
    /// JSON array of block definitions; the standard tetrominoes when unset.
    pub blocks_path: Option<PathBuf>,
    /// Stop the ticker after this many ticks.
    pub tick_limit: Option<u64>,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_MS,
            spawn_row: DEFAULT_SPAWN_ROW,
            spawn_column: None,
            blocks_path: None,
            tick_limit: None,
            seed: 1,
        }
    }
}

impl GameConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match non_empty(lookup("TETRIS_CONFIG")) {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(width) = parse_var(&lookup, "TETRIS_BOARD_WIDTH")? {
            config.board_width = width;
        }
        if let Some(height) = parse_var(&lookup, "TETRIS_BOARD_HEIGHT")? {
            config.board_height = height;
        }
        if let Some(ms) = parse_var(&lookup, "TETRIS_TICK_MS")? {
            config.tick_interval_ms = ms;
        }
        if let Some(path) = non_empty(lookup("TETRIS_BLOCKS_PATH")) {
            config.blocks_path = Some(PathBuf::from(path));
        }
        if let Some(limit) = parse_var(&lookup, "TETRIS_TICK_LIMIT")? {
            config.tick_limit = Some(limit);
        }
        if let Some(seed) = parse_var(&lookup, "TETRIS_SEED")? {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.board_width > 0 && self.board_height > 0,
            "board must be at least 1x1, got {}x{}",
            self.board_width,
            self.board_height
        );
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        Ok(())
    }

    /// Block definitions from `blocks_path`, or the seven standard tetrominoes.
    pub fn load_blocks(&self) -> Result<BlockSet> {
        let Some(path) = &self.blocks_path else {
            return Ok(BlockSet::standard());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read block definitions {}", path.display()))?;
        let blocks = BlockSet::from_json_str(&raw)
            .with_context(|| format!("invalid block definitions {}", path.display()))?;
        ensure!(!blocks.is_empty(), "{} defines no blocks", path.display());
        Ok(blocks)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            spawn_row: self.spawn_row,
            spawn_column: self.spawn_column,
            seed: self.seed,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup(name)) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .with_context(|| format!("{name}={raw:?} is not a valid value")),
        None => Ok(None),
    }
}
