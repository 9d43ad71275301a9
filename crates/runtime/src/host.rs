//! Wiring - register the modules and connect UI buttons to the session

use anyhow::Result;

use plugin_tetris_bus::{BoardModule, CommandRouter, Event, EventBus, MovementModule, ScoringModule};
use plugin_tetris_engine::GameController;
use plugin_tetris_types::{
    ButtonId, BOARD_MODULE, EVENT_BUTTON_PRESS, LOOP_MODULE, MOVE_MODULE, SCORING_MODULE,
};

use crate::config::GameConfig;
use crate::session::{GameSession, SessionHandle, Work};
use crate::ticker::PlayLoop;

/// Router with the board, scoring, movement and play-loop modules registered.
pub fn build_router(config: &GameConfig) -> CommandRouter {
    let mut router = CommandRouter::new();
    router.register(BOARD_MODULE, BoardModule::new(config.board_width, config.board_height));
    router.register(SCORING_MODULE, ScoringModule::new());
    router.register(MOVE_MODULE, MovementModule);
    router.register(LOOP_MODULE, PlayLoop::new());
    router
}

pub fn build_controller(config: &GameConfig, bus: EventBus) -> Result<GameController> {
    config.validate()?;
    let blocks = config.load_blocks()?;
    log::info!(
        "{} block definitions, board {}x{}",
        blocks.len(),
        config.board_width,
        config.board_height
    );
    Ok(GameController::new(
        build_router(config),
        bus,
        blocks,
        config.controller_options(),
    ))
}

/// Work item a button stands for.
pub fn button_work(button: ButtonId) -> Work {
    match button {
        ButtonId::Start => Work::Start,
        ButtonId::Pause => Work::TogglePause,
        ButtonId::Quit => Work::Shutdown,
    }
}

/// Forward `button_press` events from the UI into the session.
pub fn connect_buttons(bus: &EventBus, handle: SessionHandle) {
    bus.subscribe(EVENT_BUTTON_PRESS, move |event: &Event| {
        let button: ButtonId = serde_json::from_value(event.payload["button_id"].clone())?;
        anyhow::ensure!(handle.submit(button_work(button)), "session stopped");
        Ok(())
    });
}

/// Build, spawn and wire a complete session.
pub fn launch(config: &GameConfig) -> Result<GameSession> {
    let bus = EventBus::new();
    let controller = build_controller(config, bus.clone())?;
    let session = GameSession::spawn(controller, config)?;
    connect_buttons(&bus, session.handle());
    Ok(session)
}
