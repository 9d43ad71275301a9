//! Play loop - tick numbering and the periodic tick driver
//!
//! [`PlayLoop`] is a routable module that numbers ticks and stamps them;
//! [`run_ticker`] is the timer task that feeds `Work::Tick` into the session
//! actor. Stopping the ticker is the only way to end the loop, and since it
//! only ever submits whole work items it can be stopped between any two ticks.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{self, MissedTickBehavior};

use plugin_tetris_bus::clock::now_iso8601;
use plugin_tetris_bus::modules::reply;
use plugin_tetris_bus::{CommandError, ModuleHandler, Response};
use plugin_tetris_types::{EVENT_GAME_TICK, LOOP_MODULE};

use crate::session::Work;

/// Payload of a `game_tick` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    pub event: String,
    pub source: String,
    pub tick_number: u64,
    pub timestamp: String,
}

/// Tick counter behind the router.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayLoop {
    tick_number: u64,
}

impl PlayLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_tick(&mut self) -> TickRecord {
        self.tick_number += 1;
        TickRecord {
            event: EVENT_GAME_TICK.to_string(),
            source: LOOP_MODULE.to_string(),
            tick_number: self.tick_number,
            timestamp: now_iso8601(),
        }
    }
}

impl ModuleHandler for PlayLoop {
    fn handle(&mut self, command: &str, _parameters: &Value) -> Response {
        match command {
            "create_tick" => reply(command, &self.create_tick()),
            "reset_ticks" => {
                self.tick_number = 0;
                Ok(json!({ "tick_number": 0 }))
            }
            "get_ticks" => Ok(json!({ "tick_number": self.tick_number })),
            _ => Err(CommandError::unknown("play-loop", command)),
        }
    }
}

/// Submit `Work::Tick` every `period` until `limit` ticks were sent or the
/// actor's inbox closes. Returns the number of ticks sent.
pub async fn run_ticker(period: Duration, limit: Option<u64>, sender: UnboundedSender<Work>) -> u64 {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; gravity starts one period in.
    interval.tick().await;

    let mut sent = 0;
    while limit.map_or(true, |limit| sent < limit) {
        interval.tick().await;
        if sender.send(Work::Tick).is_err() {
            log::debug!("ticker stopping: session inbox closed");
            break;
        }
        sent += 1;
    }
    log::info!("ticker finished after {sent} ticks");
    sent
}
