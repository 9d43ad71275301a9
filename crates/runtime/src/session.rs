//! Game session - one actor task owns all game state
//!
//! The ticker and the input loop never touch the controller. They submit
//! [`Work`] items to an unbounded channel drained by [`run_actor`], which
//! applies them one at a time. After every item the actor publishes a
//! [`Frame`] on a watch channel, so renderers only ever see the grid between
//! work items, never half way through an erase-then-replace cycle.
//!
//! [`GameSession`] bridges this to a synchronous UI loop: it owns a tokio
//! runtime with the actor and the ticker spawned on it.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use plugin_tetris_bus::{Command, EventBus, Response};
use plugin_tetris_engine::{GameController, GameError};
use plugin_tetris_types::{BoardState, Direction, GamePhase, ScoreState, EVENT_GAME_TICK, LOOP_MODULE};

use crate::config::GameConfig;
use crate::ticker::{run_ticker, TickRecord};

/// One unit of serialized work for the actor.
#[derive(Debug)]
pub enum Work {
    Tick,
    Start,
    TogglePause,
    Move(Direction),
    Rotate,
    /// Route a command through the controller's router and send back the reply.
    Dispatch(Command, oneshot::Sender<Response>),
    Shutdown,
}

/// Consistent view of the game taken between work items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub board: BoardState,
    pub score: ScoreState,
    pub tick_number: u64,
    /// Name of the block the next spawn will use.
    pub next: Option<String>,
}

/// Drain `inbox` until `Work::Shutdown` or until every sender is gone.
/// Returns the controller so callers can inspect the final state.
pub async fn run_actor(
    mut controller: GameController,
    mut inbox: mpsc::UnboundedReceiver<Work>,
    frames: watch::Sender<Frame>,
) -> GameController {
    let mut tick_number = 0;
    publish_frame(&mut controller, &frames, tick_number);

    while let Some(work) = inbox.recv().await {
        if matches!(work, Work::Shutdown) {
            break;
        }
        if let Err(err) = apply(&mut controller, work, &mut tick_number) {
            log::error!("work item failed: {err}");
        }
        publish_frame(&mut controller, &frames, tick_number);
    }

    log::info!("session actor stopped in phase {}", controller.phase().as_str());
    controller
}

fn apply(controller: &mut GameController, work: Work, tick_number: &mut u64) -> Result<(), GameError> {
    match work {
        Work::Tick => {
            match controller.dispatch(&Command::new(LOOP_MODULE, "create_tick", Value::Null)) {
                Ok(payload) => {
                    if let Ok(record) = serde_json::from_value::<TickRecord>(payload.clone()) {
                        *tick_number = record.tick_number;
                    }
                    controller.bus().publish(EVENT_GAME_TICK, LOOP_MODULE, payload);
                }
                Err(err) => log::warn!("tick not numbered: {err}"),
            }
            controller.tick()?;
        }
        Work::Start => {
            if controller
                .dispatch(&Command::new(LOOP_MODULE, "reset_ticks", Value::Null))
                .is_ok()
            {
                *tick_number = 0;
            }
            controller.start()?;
        }
        Work::TogglePause => {
            controller.toggle_pause();
        }
        Work::Move(direction) => {
            controller.move_piece(direction)?;
        }
        Work::Rotate => {
            controller.rotate()?;
        }
        Work::Dispatch(command, reply) => {
            // The requester may have given up waiting; nothing to do then.
            let _ = reply.send(controller.dispatch(&command));
        }
        Work::Shutdown => {}
    }
    Ok(())
}

fn publish_frame(controller: &mut GameController, frames: &watch::Sender<Frame>, tick_number: u64) {
    let board = controller.board_state();
    let score = controller.score_state();
    match (board, score) {
        (Ok(board), Ok(score)) => {
            frames.send_replace(Frame {
                phase: controller.phase(),
                board,
                score,
                tick_number,
                next: controller.next_block().map(|def| def.name.clone()),
            });
        }
        (Err(err), _) | (_, Err(err)) => log::warn!("frame skipped: {err}"),
    }
}

/// Cloneable submitter into a running actor.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    inbox: mpsc::UnboundedSender<Work>,
}

impl SessionHandle {
    pub fn new(inbox: mpsc::UnboundedSender<Work>) -> Self {
        Self { inbox }
    }

    /// Queue `work`. Returns false once the actor has stopped.
    pub fn submit(&self, work: Work) -> bool {
        self.inbox.send(work).is_ok()
    }

    /// Route `command` through the actor; `None` if it stopped first.
    pub async fn dispatch(&self, command: Command) -> Option<Response> {
        let (tx, rx) = oneshot::channel();
        if !self.submit(Work::Dispatch(command, tx)) {
            return None;
        }
        rx.await.ok()
    }

    pub fn is_closed(&self) -> bool {
        self.inbox.is_closed()
    }
}

/// Actor and ticker running on a private runtime, driven from sync code.
///
/// Must not be created, used for `dispatch`, or dropped from inside another
/// tokio runtime.
pub struct GameSession {
    runtime: Runtime,
    handle: SessionHandle,
    bus: EventBus,
    frames: watch::Receiver<Frame>,
    actor: Option<JoinHandle<GameController>>,
    ticker: Option<JoinHandle<u64>>,
}

impl GameSession {
    pub fn spawn(controller: GameController, config: &GameConfig) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("tetris-session")
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?;

        let bus = controller.bus().clone();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (frame_tx, frame_rx) = watch::channel(Frame::default());

        let actor = runtime.spawn(run_actor(controller, inbox_rx, frame_tx));
        let ticker = runtime.spawn(run_ticker(
            config.tick_interval(),
            config.tick_limit,
            inbox_tx.clone(),
        ));
        log::info!(
            "session started: tick {}ms, limit {:?}",
            config.tick_interval_ms,
            config.tick_limit
        );

        Ok(Self {
            runtime,
            handle: SessionHandle::new(inbox_tx),
            bus,
            frames: frame_rx,
            actor: Some(actor),
            ticker: Some(ticker),
        })
    }

    pub fn submit(&self, work: Work) -> bool {
        self.handle.submit(work)
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Latest published frame.
    pub fn frame(&self) -> Frame {
        self.frames.borrow().clone()
    }

    pub fn frames(&self) -> watch::Receiver<Frame> {
        self.frames.clone()
    }

    /// Whether the actor has published a frame the caller has not seen.
    pub fn frame_changed(&self) -> bool {
        self.frames.has_changed().unwrap_or(false)
    }

    /// Latest frame, marking it seen.
    pub fn take_frame(&mut self) -> Frame {
        self.frames.borrow_and_update().clone()
    }

    /// Blocking round trip through the actor.
    pub fn dispatch(&self, command: Command) -> Result<Response> {
        self.runtime
            .block_on(self.handle.dispatch(command))
            .context("session actor stopped")
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_closed() && self.actor.as_ref().is_some_and(|actor| !actor.is_finished())
    }

    /// Stop submitting ticks. Work already queued is still applied.
    pub fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            log::info!("ticker stopped");
        }
    }

    /// Stop the ticker and the actor, returning the final controller.
    pub fn shutdown(mut self) -> Result<GameController> {
        self.stop_ticker();
        self.handle.submit(Work::Shutdown);
        let actor = self.actor.take().context("session already shut down")?;
        self.runtime
            .block_on(actor)
            .context("session actor panicked")
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("bus", &self.bus)
            .field("ticking", &self.ticker.is_some())
            .finish()
    }
}
