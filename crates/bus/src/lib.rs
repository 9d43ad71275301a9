//! Plugin plumbing - command routing and event fan-out
//!
//! The two communication channels between game modules:
//!
//! - [`router`]: synchronous request/response by module name
//! - [`event_bus`]: publish/subscribe notifications by event type
//! - [`modules`]: the board, scoring and movement engines exposed as routable modules
//! - [`error`]: the structured command error carried in every failed response
//!
//! No module holds a reference to another; they reach each other only through
//! these two channels.

pub mod clock;
pub mod error;
pub mod event_bus;
pub mod modules;
pub mod router;

pub use plugin_tetris_core as core;
pub use plugin_tetris_types as types;

pub use error::CommandError;
pub use event_bus::{Event, EventBus, Subscriber};
pub use modules::{BoardModule, MovementModule, ScoringModule};
pub use router::{Command, CommandRouter, ModuleHandler, Response};
