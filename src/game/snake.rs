use super::direction::Direction;
use super::grid::Bounds;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake's body on the grid.
///
/// All positions are relative to the top-left cell of the grid.  The cells
/// are distinct, and there is always at least one of them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first and tail last
    pub(super) cells: VecDeque<Position>,
}

impl Snake {
    /// Create a snake of `len` cells with its head at `head` and its body
    /// trailing behind it, opposite to `direction`
    pub(super) fn new(head: Position, direction: Direction, len: usize, bounds: Bounds) -> Snake {
        let backwards = direction.reverse();
        let cells = std::iter::successors(Some(head), |&p| Some(backwards.advance(p, bounds)))
            .take(len.max(1))
            .collect();
        Snake { cells }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.cells
            .front()
            .copied()
            .unwrap_or(Position::ORIGIN)
    }

    /// Return the number of cells the snake occupies
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Iterate over the snake's cells, head first
    pub(crate) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    /// Prepend a new head cell
    pub(super) fn push_head(&mut self, pos: Position) {
        self.cells.push_front(pos);
    }

    /// Drop the last cell, never shrinking the snake below one cell
    pub(super) fn pop_tail(&mut self) {
        if self.cells.len() > 1 {
            let _ = self.cells.pop_back();
        }
    }
}
