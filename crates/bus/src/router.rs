//! Command router - synchronous request/response between modules
//!
//! A registry from module name to [`ModuleHandler`]. Every [`CommandRouter::dispatch`]
//! runs exactly one handler to completion and always yields exactly one response.
//! Misrouted commands, handler errors and handler panics all come back as
//! [`CommandError`] values; the router itself never fails its caller.
//!
//! # Example
//!
//! ```
//! use plugin_tetris_bus::{Command, CommandError, CommandRouter};
//! use serde_json::{json, Value};
//!
//! let mut router = CommandRouter::new();
//! router.register("echo", |command: &str, params: &Value| -> Result<Value, CommandError> {
//!     Ok(json!({ "command": command, "params": params }))
//! });
//!
//! let reply = router.dispatch(&Command::new("echo", "ping", json!({ "n": 1 }))).unwrap();
//! assert_eq!(reply["params"]["n"], 1);
//!
//! let missing = router.dispatch(&Command::new("nobody", "ping", Value::Null));
//! assert_eq!(missing.unwrap_err().to_string(), "Module not found: nobody");
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CommandError;

/// Outcome of a dispatch: the handler's success payload or a structured error.
pub type Response = Result<Value, CommandError>;

/// A module that accepts `(command, parameters)` and answers synchronously.
pub trait ModuleHandler: Send {
    fn handle(&mut self, command: &str, parameters: &Value) -> Response;
}

impl<F> ModuleHandler for F
where
    F: FnMut(&str, &Value) -> Response + Send,
{
    fn handle(&mut self, command: &str, parameters: &Value) -> Response {
        self(command, parameters)
    }
}

/// Command envelope: `{command, target_module, parameters}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub command: String,
    pub target_module: String,
    #[serde(default)]
    pub parameters: Value,
}

impl Command {
    pub fn new(target_module: &str, command: &str, parameters: Value) -> Self {
        Self {
            command: command.to_string(),
            target_module: target_module.to_string(),
            parameters,
        }
    }

    /// Parse a raw JSON envelope, validating it once at the boundary.
    pub fn from_json(raw: &str) -> Result<Self, CommandError> {
        serde_json::from_str(raw).map_err(|e| CommandError::invalid(raw.trim(), e.to_string()))
    }
}

/// Registry of module handlers, in registration order.
#[derive(Default)]
pub struct CommandRouter {
    modules: IndexMap<String, Box<dyn ModuleHandler>>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`. Last write wins; a replaced module keeps
    /// its original registration slot. Returns the previous handler, if any.
    pub fn register<H>(&mut self, name: &str, handler: H) -> Option<Box<dyn ModuleHandler>>
    where
        H: ModuleHandler + 'static,
    {
        let previous = self.modules.insert(name.to_string(), Box::new(handler));
        if previous.is_some() {
            log::info!("module {name} re-registered, previous handler replaced");
        } else {
            log::debug!("module {name} registered");
        }
        previous
    }

    /// Route `command` to its target module and return that module's response.
    pub fn dispatch(&mut self, command: &Command) -> Response {
        let Some(handler) = self.modules.get_mut(&command.target_module) else {
            log::warn!(
                "command {} routed to unregistered module {}",
                command.command,
                command.target_module
            );
            return Err(CommandError::ModuleNotFound {
                module: command.target_module.clone(),
            });
        };

        log::debug!("dispatch {} -> {}", command.command, command.target_module);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            handler.handle(&command.command, &command.parameters)
        }));

        match outcome {
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(err)) => {
                log::warn!(
                    "{} rejected {}: {} ({})",
                    command.target_module,
                    command.command,
                    err,
                    err.kind()
                );
                Err(err)
            }
            Err(cause) => {
                let message = panic_message(&*cause);
                log::error!(
                    "{} panicked handling {}: {}",
                    command.target_module,
                    command.command,
                    message
                );
                Err(CommandError::failure(&command.command, message))
            }
        }
    }

    /// Dispatch a raw JSON envelope, rendering errors as payloads.
    pub fn dispatch_json(&mut self, raw: &str) -> Value {
        let result = Command::from_json(raw).and_then(|command| self.dispatch(&command));
        result.unwrap_or_else(|err| err.to_payload())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Registered module names in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl std::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRouter")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
