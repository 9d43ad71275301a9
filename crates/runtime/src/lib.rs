//! Runtime - configuration, the tick driver and the serialized game session
//!
//! - [`config`]: `GameConfig` from JSON files and environment variables
//! - [`ticker`]: the play-loop module and the periodic tick task
//! - [`session`]: the actor that owns the controller, and its sync bridge
//! - [`host`]: module registration and UI button wiring

pub mod config;
pub mod host;
pub mod session;
pub mod ticker;

pub use config::GameConfig;
pub use host::{build_controller, build_router, connect_buttons, launch};
pub use session::{run_actor, Frame, GameSession, SessionHandle, Work};
pub use ticker::{run_ticker, PlayLoop, TickRecord};
