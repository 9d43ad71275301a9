//! Game-state engine - the controller that orchestrates the plugin modules
//!
//! The controller owns the active piece and the game phase. Everything else it
//! touches (grid, score) lives in modules reached through the command router,
//! and every transition is announced on the event bus.

pub mod controller;
pub mod error;

pub use controller::{ActivePiece, ControllerOptions, GameController, StartOptions, TickOutcome};
pub use error::GameError;
