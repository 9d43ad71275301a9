use plugin_tetris_bus::CommandError;
use thiserror::Error;

/// Failures surfaced by controller operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A routed command came back as an error payload.
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("no block definitions loaded")]
    EmptyBlockSet,

    /// The module answered, but not with the shape the controller expects.
    #[error("malformed {command} response from {module}: {reason}")]
    MalformedResponse {
        module: String,
        command: String,
        reason: String,
    },

    #[error("no active piece while running")]
    NoActivePiece,
}
