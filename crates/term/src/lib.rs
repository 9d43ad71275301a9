//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a
//! framebuffer which is flushed to the terminal as diffs. No widgets, no
//! layout engine.
//!
//! - [`fb`]: framebuffer and styles
//! - [`renderer`]: crossterm flushing (full and diff)
//! - [`game_view`]: board, side panel and clickable buttons
//! - [`ui`]: the `GameUi` collaborator with terminal and headless backends

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod ui;

pub use plugin_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph};
pub use game_view::{hit_test, Button, GameView, Scene, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use ui::{GameUi, HeadlessUi, TerminalUi};
