//! Move resolver - pure mapping from a direction to a candidate position
//!
//! No collision knowledge: callers validate candidates against the board before
//! committing them.

use crate::types::{Direction, Position};

/// Fixed `(dx, dy)` offset for one step in `direction`.
///
/// `Rotate` does not translate. `Drop` is one row per step; the caller repeats
/// it until the board reports a collision (see [`is_repeating`]).
pub fn step(direction: Direction) -> (i32, i32) {
    match direction {
        Direction::Left => (-1, 0),
        Direction::Right => (1, 0),
        Direction::Down | Direction::Drop => (0, 1),
        Direction::Rotate => (0, 0),
    }
}

/// Whether the caller must apply `step` repeatedly to find the final position.
pub fn is_repeating(direction: Direction) -> bool {
    matches!(direction, Direction::Drop)
}

/// Candidate position after one step.
pub fn resolve(direction: Direction, position: Position) -> Position {
    let (dx, dy) = step(direction);
    position.offset(dx, dy)
}
