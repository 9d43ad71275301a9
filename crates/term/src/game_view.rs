//! GameView: maps a board/score snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). Besides drawing, it reports where it put the
//! on-screen buttons so clicks can be hit-tested against the same layout.

use crate::fb::{CellStyle, FrameBuffer, Glyph};
use crate::types::{BoardState, ButtonId, GamePhase, Rgb, ScoreState};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub board: &'a BoardState,
    pub score: &'a ScoreState,
    pub phase: GamePhase,
    pub next: Option<&'a str>,
}

/// A clickable label drawn on one terminal row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub id: ButtonId,
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

impl Button {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.y && column >= self.x && column < self.x.saturating_add(self.width)
    }
}

/// Button under `(column, row)`, if any.
pub fn hit_test(buttons: &[Button], column: u16, row: u16) -> Option<ButtonId> {
    buttons
        .iter()
        .find(|b| b.contains(column, row))
        .map(|b| b.id)
}

/// A lightweight terminal renderer for the board.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render `scene` into a reused framebuffer; returns the button layout.
    pub fn render_into(&self, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) -> Vec<Button> {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board_px_w = (scene.board.width as u16).saturating_mul(self.cell_w);
        let board_px_h = (scene.board.height as u16).saturating_mul(self.cell_h);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', CellStyle::new(PLAY_BG, PLAY_BG));
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (y, row) in scene.board.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(color) => ('█', CellStyle::new(*color, PLAY_BG).bold()),
                    None => ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim()),
                };
                let px = (start_x + 1).saturating_add((x as u16).saturating_mul(self.cell_w));
                let py = (start_y + 1).saturating_add((y as u16).saturating_mul(self.cell_h));
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        let buttons = self.draw_side_panel(fb, scene, viewport, start_x.saturating_add(frame_w).saturating_add(2), start_y);

        let overlay = match scene.phase {
            GamePhase::Uninitialized => Some("PRESS ENTER"),
            GamePhase::Paused => Some("PAUSED"),
            GamePhase::GameOver => Some("GAME OVER"),
            GamePhase::Running => None,
        };
        if let Some(text) = overlay {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str(x, start_y.saturating_add(frame_h / 2), text, style);
        }

        buttons
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> (FrameBuffer, Vec<Button>) {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let buttons = self.render_into(scene, viewport, &mut fb);
        (fb, buttons)
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        scene: &Scene<'_>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) -> Vec<Button> {
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return Vec::new();
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let stats = [
            ("SCORE", scene.score.total_score.to_string()),
            ("LEVEL", scene.score.level.to_string()),
            ("LINES", scene.score.lines_cleared.to_string()),
            ("NEXT", scene.next.unwrap_or("-").to_string()),
        ];
        let mut y = start_y;
        for (name, text) in &stats {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y.saturating_add(1), text, value);
            y = y.saturating_add(3);
        }

        let mut buttons = Vec::new();
        for id in [ButtonId::Start, ButtonId::Pause, ButtonId::Quit] {
            if y >= viewport.height {
                break;
            }
            let text = format!("[ {} ]", id.label());
            let highlighted = matches!(
                (id, scene.phase),
                (ButtonId::Start, GamePhase::Uninitialized | GamePhase::GameOver)
                    | (ButtonId::Pause, GamePhase::Paused)
            );
            let style = if highlighted { value.bold() } else { value };
            fb.put_str(panel_x, y, &text, style);
            buttons.push(Button {
                id,
                x: panel_x,
                y,
                width: text.chars().count() as u16,
            });
            y = y.saturating_add(1);
        }
        buttons
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.set(x, y, style.glyph('┌'));
    fb.set(x + w - 1, y, style.glyph('┐'));
    fb.set(x, y + h - 1, style.glyph('└'));
    fb.set(x + w - 1, y + h - 1, style.glyph('┘'));

    for dx in 1..w - 1 {
        fb.set(x + dx, y, style.glyph('─'));
        fb.set(x + dx, y + h - 1, style.glyph('─'));
    }
    for dy in 1..h - 1 {
        fb.set(x, y + dy, style.glyph('│'));
        fb.set(x + w - 1, y + dy, style.glyph('│'));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: usize, height: usize) -> BoardState {
        BoardState {
            width,
            height,
            grid: vec![vec![None; width]; height],
        }
    }

    #[test]
    fn test_cells_and_buttons_are_laid_out() {
        let mut state = board(10, 20);
        state.grid[19][0] = Some(Rgb::new(0, 255, 255));
        let score = ScoreState::default();
        let scene = Scene {
            board: &state,
            score: &score,
            phase: GamePhase::Running,
            next: Some("T"),
        };

        let (fb, buttons) = GameView::default().render(&scene, Viewport::new(60, 30));
        // Frame is 22 wide, centred: left border at x = 19, top at y = 4.
        assert_eq!(fb.get(19, 4).unwrap().ch, '┌');
        let filled = fb.get(20, 4 + 20).unwrap();
        assert_eq!(filled.ch, '█');
        assert_eq!(filled.style.fg, Rgb::new(0, 255, 255));
        assert_eq!(fb.get(22, 4 + 20).unwrap().ch, '·');

        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0].x, 43);
        assert!(fb.row_text(buttons[0].y).contains("[ Start ]"));
        assert!(fb.row_text(4 + 10).contains('T'));
    }

    #[test]
    fn test_hit_test() {
        let state = board(4, 4);
        let score = ScoreState::default();
        let scene = Scene {
            board: &state,
            score: &score,
            phase: GamePhase::Paused,
            next: None,
        };
        let (fb, buttons) = GameView::default().render(&scene, Viewport::new(40, 30));

        let quit = buttons.iter().find(|b| b.id == ButtonId::Quit).unwrap();
        assert_eq!(hit_test(&buttons, quit.x, quit.y), Some(ButtonId::Quit));
        assert_eq!(hit_test(&buttons, quit.x + quit.width - 1, quit.y), Some(ButtonId::Quit));
        assert_eq!(hit_test(&buttons, quit.x + quit.width, quit.y), None);
        assert_eq!(hit_test(&buttons, 0, 0), None);

        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn test_oversized_board_is_clipped() {
        let mut state = board(40_000, 2);
        state.grid[1][39_999] = Some(Rgb::new(255, 0, 0));
        let score = ScoreState::default();
        let scene = Scene {
            board: &state,
            score: &score,
            phase: GamePhase::Running,
            next: None,
        };
        let (fb, buttons) = GameView::default().render(&scene, Viewport::new(20, 10));
        assert_eq!(fb.width(), 20);
        assert_eq!(fb.get(1, 4).unwrap().ch, '·');
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_narrow_viewport_has_no_buttons() {
        let state = board(10, 20);
        let score = ScoreState::default();
        let scene = Scene {
            board: &state,
            score: &score,
            phase: GamePhase::GameOver,
            next: None,
        };
        let (_, buttons) = GameView::default().render(&scene, Viewport::new(24, 22));
        assert!(buttons.is_empty());
    }
}
