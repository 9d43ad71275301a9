//! UI collaborators - what the game loop renders into and reads clicks from
//!
//! A UI draws board/score snapshots and maps clicks to buttons. Clicks reach
//! the game only as `button_press` events on the bus.

use anyhow::Result;
use serde_json::json;

use plugin_tetris_bus::EventBus;

use crate::fb::FrameBuffer;
use crate::game_view::{hit_test, Button, GameView, Scene, Viewport};
use crate::renderer::TerminalRenderer;
use crate::types::{BoardState, ButtonId, GamePhase, ScoreState, EVENT_BUTTON_PRESS, UI_SOURCE};

pub trait GameUi {
    fn render_board(&mut self, board: &BoardState, score: &ScoreState, phase: GamePhase) -> Result<()>;

    /// Button at terminal cell `(column, row)` in the last rendered layout.
    fn handle_click(&self, column: u16, row: u16) -> Option<ButtonId>;

    /// Hit-test a click and publish `button_press {button_id}` when it lands
    /// on a button.
    fn click(&self, bus: &EventBus, column: u16, row: u16) -> Option<ButtonId> {
        let button = self.handle_click(column, row)?;
        log::debug!("button {} clicked", button.label());
        bus.publish(EVENT_BUTTON_PRESS, UI_SOURCE, json!({ "button_id": button }));
        Some(button)
    }
}

/// Crossterm-backed UI drawing into the real terminal.
pub struct TerminalUi {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    viewport: Viewport,
    buttons: Vec<Button>,
    next: Option<String>,
}

impl TerminalUi {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            buttons: Vec::new(),
            next: None,
        }
    }

    /// Take over the terminal (raw mode, alternate screen, mouse).
    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.renderer.invalidate();
    }

    /// Name of the upcoming block shown in the side panel.
    pub fn set_next(&mut self, next: Option<String>) {
        self.next = next;
    }
}

impl GameUi for TerminalUi {
    fn render_board(&mut self, board: &BoardState, score: &ScoreState, phase: GamePhase) -> Result<()> {
        let scene = Scene {
            board,
            score,
            phase,
            next: self.next.as_deref(),
        };
        self.buttons = self.view.render_into(&scene, self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }

    fn handle_click(&self, column: u16, row: u16) -> Option<ButtonId> {
        hit_test(&self.buttons, column, row)
    }
}

/// UI without a terminal: renders into memory and keeps the last frame.
#[derive(Debug)]
pub struct HeadlessUi {
    view: GameView,
    viewport: Viewport,
    last: Option<FrameBuffer>,
    buttons: Vec<Button>,
    renders: usize,
}

impl HeadlessUi {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            view: GameView::default(),
            viewport,
            last: None,
            buttons: Vec::new(),
            renders: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&FrameBuffer> {
        self.last.as_ref()
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Whole last frame as text, one line per row.
    pub fn text(&self) -> String {
        let Some(fb) = &self.last else {
            return String::new();
        };
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl GameUi for HeadlessUi {
    fn render_board(&mut self, board: &BoardState, score: &ScoreState, phase: GamePhase) -> Result<()> {
        let scene = Scene {
            board,
            score,
            phase,
            next: None,
        };
        let (fb, buttons) = self.view.render(&scene, self.viewport);
        self.last = Some(fb);
        self.buttons = buttons;
        self.renders += 1;
        Ok(())
    }

    fn handle_click(&self, column: u16, row: u16) -> Option<ButtonId> {
        hit_test(&self.buttons, column, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugin_tetris_bus::Event;
    use std::sync::{Arc, Mutex};

    fn board() -> BoardState {
        BoardState {
            width: 4,
            height: 4,
            grid: vec![vec![None; 4]; 4],
        }
    }

    #[test]
    fn test_headless_keeps_last_frame() {
        let mut ui = HeadlessUi::new(Viewport::new(40, 30));
        assert!(ui.text().is_empty());
        ui.render_board(&board(), &ScoreState::default(), GamePhase::GameOver).unwrap();
        ui.render_board(&board(), &ScoreState::default(), GamePhase::Running).unwrap();

        assert_eq!(ui.render_count(), 2);
        assert!(ui.last_frame().is_some());
        assert!(ui.text().contains("SCORE"));
        assert!(!ui.text().contains("GAME OVER"));
    }

    #[test]
    fn test_click_publishes_button_press() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(EVENT_BUTTON_PRESS, move |event: &Event| {
            sink.lock().unwrap().push(event.clone());
            Ok(())
        });

        let mut ui = HeadlessUi::new(Viewport::new(40, 30));
        ui.render_board(&board(), &ScoreState::default(), GamePhase::Running).unwrap();
        let pause = ui.buttons()[1];

        assert_eq!(ui.click(&bus, pause.x + 1, pause.y), Some(ButtonId::Pause));
        assert_eq!(ui.click(&bus, 0, 0), None);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].source, UI_SOURCE);
        assert_eq!(seen[0].payload, json!({ "button_id": "pause" }));
    }
}
