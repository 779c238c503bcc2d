//! Snake body: movement, growth and self-collision.

use super::grid::Grid;
use super::types::{Cell, Direction};
use std::collections::VecDeque;

/// Result of one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub head: Cell,
    pub self_collision: bool,
}

/// Snake body segments. Tail is at the front, head at the back.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    target_len: usize,
    /// Last direction actually applied to movement.
    direction: Direction,
}

impl Snake {
    /// A snake of `length` segments stacked on `start`, not yet moving.
    pub fn new(start: Cell, length: usize) -> Self {
        let length = length.max(1);
        let mut body = VecDeque::with_capacity(length);
        body.push_back(start);
        Self {
            body,
            target_len: length,
            direction: Direction::None,
        }
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: `new` seeds one segment and `trim` only
        // trims down to `target_len >= 1`.
        self.body.back().copied().unwrap_or(Cell::new(0, 0))
    }

    /// Segments from tail to head.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    // Never zero, see `head`
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Cells currently covered by the body, tail first.
    pub fn cells(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    /// Request a new heading. Rejected when it is the exact opposite of the
    /// last applied direction, which would drive the head into the neck.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == Direction::None || direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Raise the target length. The tail stops trimming until the body catches up.
    pub fn grow(&mut self, amount: usize) {
        self.target_len += amount;
    }

    /// Move one cell in the current direction, wrapping at the field edges,
    /// and trim the tail back to the target length.
    pub fn advance(&mut self, grid: &Grid) -> Advance {
        let step = self.step_head(grid);
        self.trim();
        step
    }

    /// Append the next head without trimming.
    ///
    /// Until [`Snake::trim`] runs the body holds one extra segment. The
    /// collision test runs against the untrimmed body, so a head landing on the
    /// cell the tail is about to vacate still counts.
    pub fn step_head(&mut self, grid: &Grid) -> Advance {
        if self.direction == Direction::None {
            return Advance {
                head: self.head(),
                self_collision: false,
            };
        }

        let head = grid.wrap(self.head(), self.direction);
        let self_collision = self.body.contains(&head);
        self.body.push_back(head);

        Advance {
            head,
            self_collision,
        }
    }

    /// Drop tail segments beyond the target length.
    pub fn trim(&mut self) {
        while self.body.len() > self.target_len {
            self.body.pop_front();
        }
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[Cell], direction: Direction) -> Self {
        Self {
            body: cells.iter().copied().collect(),
            target_len: cells.len(),
            direction,
        }
    }
}
