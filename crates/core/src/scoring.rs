//! Scoring module - line-clear scoring and level progression
//!
//! Single-tier table: 1 → 100, 2 → 300, 3 → 500, 4 → 800, multiplied by the
//! current level. Level starts at 1 and rises every ten lines.

use crate::types::{ScoreState, LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score
/// lines: number of lines cleared in one lock
/// level: current level (1-based)
///
/// Clears of more than four lines (possible with custom blocks) score as four.
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base_score = LINE_SCORES[(lines as usize).min(LINE_SCORES.len() - 1)];
    base_score.saturating_mul(level)
}

/// Level management
/// Level increases every 10 lines cleared, starting from 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// The scoring engine, sole owner of the score state.
#[derive(Debug, Clone, Default)]
pub struct Scoring {
    state: ScoreState,
}

impl Scoring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one lock's worth of cleared lines.
    ///
    /// Points use the level in effect before the clear; the level is
    /// recomputed afterwards from the cumulative line count.
    pub fn update_score(&mut self, lines_cleared: u32) -> ScoreState {
        let gain = calculate_line_score(lines_cleared, self.state.level);
        self.state.total_score = self.state.total_score.saturating_add(gain);
        self.state.lines_cleared = self.state.lines_cleared.saturating_add(lines_cleared);
        self.state.level = calculate_level(self.state.lines_cleared);
        self.state
    }

    pub fn reset_score(&mut self) -> ScoreState {
        self.state = ScoreState::default();
        self.state
    }

    pub fn score(&self) -> ScoreState {
        self.state
    }
}
