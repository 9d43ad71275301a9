//! Terminal Tetris runner (default binary).
//!
//! The game itself runs in the session actor; this loop only renders frames,
//! forwards key presses as work items and turns mouse clicks into
//! `button_press` events.

use std::env;
use std::fs::File;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::terminal;
use env_logger::{Builder, Env, Target};

use plugin_tetris::input::{handle_key_event, left_click, InputAction};
use plugin_tetris::runtime::{launch, GameConfig, GameSession, Work};
use plugin_tetris::term::{GameUi, TerminalUi, Viewport};
use plugin_tetris::types::Direction;

const INPUT_POLL: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    init_logging()?;
    let config = GameConfig::from_env().context("invalid configuration")?;
    let mut session = launch(&config)?;
    session.submit(Work::Start);

    let (w, h) = terminal::size().unwrap_or((80, 24));
    let mut ui = TerminalUi::new(Viewport::new(w, h));
    ui.enter()?;

    let result = run(&mut ui, &mut session);

    // Always try to restore terminal state.
    let _ = ui.exit();
    let controller = session.shutdown()?;
    log::info!("exited in phase {}", controller.phase().as_str());
    result
}

/// The terminal is in raw mode, so logs only go to `TETRIS_LOG_PATH`.
fn init_logging() -> Result<()> {
    let mut builder = match env::var_os("TETRIS_LOG_PATH") {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to open log file {}", path.to_string_lossy()))?;
            let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
            builder.target(Target::Pipe(Box::new(file)));
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("error")),
    };
    builder.try_init().context("logger already initialised")
}

fn run(ui: &mut TerminalUi, session: &mut GameSession) -> Result<()> {
    let mut dirty = true;
    let mut frame = session.take_frame();

    loop {
        if session.frame_changed() {
            frame = session.take_frame();
            dirty = true;
        }
        if dirty {
            ui.set_next(frame.next.clone());
            ui.render_board(&frame.board, &frame.score, frame.phase)?;
            dirty = false;
        }
        // The quit button shuts the actor down from the bus side.
        if !session.is_running() {
            return Ok(());
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match handle_key_event(key) {
                Some(InputAction::Quit) => return Ok(()),
                Some(action) => {
                    session.submit(work_for(action));
                }
                None => {}
            },
            Event::Mouse(mouse) => {
                if let Some((column, row)) = left_click(mouse) {
                    ui.click(session.bus(), column, row);
                }
            }
            Event::Resize(w, h) => {
                ui.resize(Viewport::new(w, h));
                dirty = true;
            }
            _ => {}
        }
    }
}

fn work_for(action: InputAction) -> Work {
    match action {
        InputAction::Move(Direction::Rotate) => Work::Rotate,
        InputAction::Move(direction) => Work::Move(direction),
        InputAction::Start => Work::Start,
        InputAction::TogglePause => Work::TogglePause,
        InputAction::Quit => Work::Shutdown,
    }
}
