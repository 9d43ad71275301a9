//! Terminal input module.
//!
//! Maps `crossterm` key and mouse events into [`InputAction`]s. Independent of
//! the session: the binary turns actions into work items.

pub mod map;

pub use plugin_tetris_types as types;

pub use map::{handle_key_event, left_click, should_quit, InputAction};
