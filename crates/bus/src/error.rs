//! Error taxonomy for routed commands.
//!
//! Errors are data: the router returns them as values and callers render them
//! into `{error, kind, received}` payloads. Nothing here crosses the router as a
//! panic.

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Command routed to a module name nobody registered.
    #[error("Module not found: {module}")]
    ModuleNotFound { module: String },

    /// The handler failed (or panicked) while executing.
    #[error("{message}")]
    HandlerFailure { command: String, message: String },

    /// The module exists but does not know this command.
    #[error("Unknown {module} command")]
    UnknownCommand { module: String, command: String },

    /// Missing or malformed fields.
    #[error("Invalid parameters for {command}: {reason}")]
    InvalidParameters { command: String, reason: String },
}

impl CommandError {
    pub fn unknown(module: &str, command: &str) -> Self {
        Self::UnknownCommand {
            module: module.to_string(),
            command: command.to_string(),
        }
    }

    pub fn invalid(command: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    pub fn failure(command: &str, message: impl Into<String>) -> Self {
        Self::HandlerFailure {
            command: command.to_string(),
            message: message.into(),
        }
    }

    /// Stable machine-readable tag.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::ModuleNotFound { .. } => "module_not_found",
            CommandError::HandlerFailure { .. } => "handler_failure",
            CommandError::UnknownCommand { .. } => "unknown_command",
            CommandError::InvalidParameters { .. } => "invalid_parameters",
        }
    }

    /// What the router was asked for: the module name when it was missing,
    /// otherwise the command name.
    pub fn received(&self) -> &str {
        match self {
            CommandError::ModuleNotFound { module } => module,
            CommandError::HandlerFailure { command, .. }
            | CommandError::UnknownCommand { command, .. }
            | CommandError::InvalidParameters { command, .. } => command,
        }
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "received": self.received(),
        })
    }
}
