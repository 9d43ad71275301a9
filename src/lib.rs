//! Plugin Tetris (workspace facade crate).
//!
//! Re-exports the member crates under short names:
//! `plugin_tetris::{types, core, bus, engine, runtime, input, term}`.

pub use plugin_tetris_bus as bus;
pub use plugin_tetris_core as core;
pub use plugin_tetris_engine as engine;
pub use plugin_tetris_input as input;
pub use plugin_tetris_runtime as runtime;
pub use plugin_tetris_term as term;
pub use plugin_tetris_types as types;
