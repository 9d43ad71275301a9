//! Core game logic module - pure, deterministic, and testable
//!
//! The three leaf engines of the game plus the read-only block data they act on.
//! Nothing here routes commands, publishes events or touches I/O:
//!
//! - [`board`]: the board engine, owner of the grid (collision, placement, line clears)
//! - [`movement`]: the move resolver, a pure direction → candidate position mapping
//! - [`scoring`]: the scoring engine, owner of lines/score/level
//! - [`blocks`]: block definitions (JSON or the built-in tetrominoes)
//! - [`rng`]: seeded bag randomizer over block definitions
//!
//! # Example
//!
//! ```
//! use plugin_tetris_core::{Board, Scoring};
//! use plugin_tetris_core::types::{Position, Rgb, Shape};
//!
//! let mut board = Board::new(10, 20);
//! let i_piece = Shape::from_rows(vec![vec![true; 4]]).unwrap();
//! assert!(board.place_piece(&i_piece, Position::new(3, 19), Rgb::new(0, 255, 255)));
//!
//! let mut scoring = Scoring::new();
//! scoring.update_score(board.clear_lines() as u32);
//! assert_eq!(scoring.score().lines_cleared, 0); // 4 of 10 cells is not a full row
//! ```

pub mod blocks;
pub mod board;
pub mod movement;
pub mod rng;
pub mod scoring;

pub use plugin_tetris_types as types;

// Re-export commonly used types for convenience
pub use blocks::{BlockSet, BlockSetError};
pub use board::Board;
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, Scoring};
