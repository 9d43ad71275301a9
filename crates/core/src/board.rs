//! Board module - the board engine, sole owner of the grid
//!
//! The board is a `width x height` grid where each cell is empty or holds a color.
//! Uses a flat array for better cache locality.
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges 0..height
//! (top to bottom). Rows above the grid (y < 0) are always passable so a piece can
//! spawn partly above the visible play-field.

use crate::types::{BoardState, Cell, Position, Rgb, Shape};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board. Dimensions never change afterwards.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// True if any occupied cell of `shape` at `position` leaves the grid
    /// horizontally, reaches below the floor, or overlaps an occupied cell.
    /// Cells above the grid never collide.
    pub fn is_collision(&self, shape: &Shape, position: Position) -> bool {
        shape.cells().any(|(dx, dy)| {
            let x = position.x + dx;
            let y = position.y + dy;
            if x < 0 || x as usize >= self.width || (y >= 0 && y as usize >= self.height) {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Write `color` into every in-grid cell of `shape` at `position`.
    /// Returns false, leaving the grid untouched, if the placement collides.
    pub fn place_piece(&mut self, shape: &Shape, position: Position, color: Rgb) -> bool {
        if self.is_collision(shape, position) {
            return false;
        }
        for (dx, dy) in shape.cells() {
            // Cells above the grid are dropped silently.
            self.set(position.x + dx, position.y + dy, Some(color));
        }
        true
    }

    /// Empty every in-grid cell covered by `shape` at `position`.
    pub fn erase_piece(&mut self, shape: &Shape, position: Position) {
        for (dx, dy) in shape.cells() {
            self.set(position.x + dx, position.y + dy, None);
        }
    }

    /// Remove all full rows, shift the rest down and pad empty rows on top.
    /// Returns the number of rows removed.
    /// Uses a two-pointer pass, preserving the order of the surviving rows.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        let mut write_y = self.height;

        // Scan from bottom to top
        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major 2D snapshot.
    pub fn state(&self) -> BoardState {
        BoardState {
            width: self.width,
            height: self.height,
            grid: self.cells.chunks(self.width.max(1)).map(<[Cell]>::to_vec).collect(),
        }
    }

    /// Build a board from explicit rows (all rows must share one length).
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn shape(rows: &[&[u8]]) -> Shape {
        Shape::try_from(rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_collision_bounds() {
        let board = Board::new(10, 20);
        let o = shape(&[&[1, 1], &[1, 1]]);
        assert!(!board.is_collision(&o, Position::new(0, 0)));
        assert!(!board.is_collision(&o, Position::new(8, 18)));
        assert!(board.is_collision(&o, Position::new(-1, 0)));
        assert!(board.is_collision(&o, Position::new(9, 0)));
        assert!(board.is_collision(&o, Position::new(0, 19)));
        // Above the grid is passable.
        assert!(!board.is_collision(&o, Position::new(4, -2)));
        assert!(!board.is_collision(&o, Position::new(4, -5)));
    }

    #[test]
    fn test_empty_shape_cells_do_not_collide() {
        let mut board = Board::new(4, 4);
        board.set(0, 0, Some(RED));
        // Only the right column is occupied; the left column sits over the filled cell.
        let bar = shape(&[&[0, 1], &[0, 1]]);
        assert!(!board.is_collision(&bar, Position::new(0, 0)));
        // Right column may hang off the left edge only if it is empty.
        let left_empty = shape(&[&[0, 1]]);
        assert!(!board.is_collision(&left_empty, Position::new(-1, 3)));
    }

    #[test]
    fn test_place_above_grid_writes_visible_cells_only() {
        let mut board = Board::new(4, 4);
        let vertical = shape(&[&[1], &[1], &[1]]);
        assert!(board.place_piece(&vertical, Position::new(2, -2), RED));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
        assert_eq!(board.get(2, 0), Some(Some(RED)));
    }

    #[test]
    fn test_erase_restores_empty_cells() {
        let mut board = Board::new(4, 4);
        let o = shape(&[&[1, 1], &[1, 1]]);
        assert!(board.place_piece(&o, Position::new(1, 1), RED));
        board.erase_piece(&o, Position::new(1, 1));
        assert_eq!(board, Board::new(4, 4));
    }

    #[test]
    fn test_clear_lines_two_pointer() {
        let g = Some(RED);
        let mut board = Board::from_rows(vec![
            vec![None, g, None],
            vec![g, g, g],
            vec![g, None, None],
            vec![g, g, g],
        ])
        .unwrap();
        assert_eq!(board.clear_lines(), 2);
        assert_eq!(
            board.state().grid,
            vec![
                vec![None, None, None],
                vec![None, None, None],
                vec![None, g, None],
                vec![g, None, None],
            ]
        );
    }

    #[test]
    fn test_colliding_place_leaves_board_untouched() {
        let mut board = Board::new(4, 4);
        let o = shape(&[&[1, 1], &[1, 1]]);
        board.set(2, 3, Some(RED));
        let before = board.clone();

        // Overlap, wall, floor.
        for position in [Position::new(1, 2), Position::new(3, 0), Position::new(0, 3)] {
            assert!(board.is_collision(&o, position));
            assert!(!board.place_piece(&o, position, Rgb::new(0, 0, 255)));
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_clear_without_full_rows_is_a_no_op() {
        let g = Some(RED);
        let mut board = Board::from_rows(vec![
            vec![None, g, None],
            vec![g, None, g],
            vec![g, g, None],
        ])
        .unwrap();
        let before = board.clone();

        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Board::from_rows(vec![vec![None, None], vec![None]]).is_none());
    }
}
