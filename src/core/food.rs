//! Food placement and the timed special-food lifecycle.

use super::constants::{
    MAX_FOOD_PLACEMENT_ATTEMPTS, SPECIAL_FOOD_LIFETIME_TICKS, SPECIAL_FOOD_ROLL_SIDES,
};
use super::grid::Grid;
use super::types::Cell;
use crate::error::{GameError, Result};
use rand::seq::IteratorRandom;
use rand::Rng;

/// Find a random playable cell not in `occupied`.
///
/// Samples uniformly up to [`MAX_FOOD_PLACEMENT_ATTEMPTS`] times, then picks
/// uniformly among the remaining free cells. Returns [`GameError::GridFull`]
/// only when every playable cell is occupied.
pub fn spawn_regular<R: Rng>(grid: &Grid, occupied: &[Cell], rng: &mut R) -> Result<Cell> {
    for _ in 0..MAX_FOOD_PLACEMENT_ATTEMPTS {
        let cell = grid.random_cell(rng);
        if !occupied.contains(&cell) {
            return Ok(cell);
        }
    }

    tracing::debug!(
        occupied = occupied.len(),
        "food sampling exhausted, scanning free cells"
    );
    grid.cells()
        .filter(|cell| !occupied.contains(cell))
        .choose(rng)
        .ok_or(GameError::GridFull)
}

/// What happened to the special food during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialFoodEvent {
    Spawned(Cell),
    Expired(Cell),
}

/// Optional bonus food with a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecialFood {
    active: Option<(Cell, u32)>,
}

impl SpecialFood {
    pub fn cell(&self) -> Option<Cell> {
        self.active.map(|(cell, _)| cell)
    }

    /// Ticks left before the active special food expires, 0 when absent.
    pub fn ticks_left(&self) -> u32 {
        self.active.map(|(_, left)| left).unwrap_or(0)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Consume the special food if it sits on `cell`.
    pub fn take_if_at(&mut self, cell: Cell) -> bool {
        if self.cell() == Some(cell) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Advance the lifecycle by one tick.
    ///
    /// While absent, one roll in `[1, SPECIAL_FOOD_ROLL_SIDES]` spawns a new
    /// special food on a 1. The spawn cell is not checked against the snake or
    /// the regular food. While present, the countdown drops by one and the food
    /// expires when it reaches zero.
    pub fn tick<R: Rng>(&mut self, grid: &Grid, rng: &mut R) -> Option<SpecialFoodEvent> {
        match self.active {
            Some((cell, left)) => {
                let left = left.saturating_sub(1);
                if left == 0 {
                    self.active = None;
                    Some(SpecialFoodEvent::Expired(cell))
                } else {
                    self.active = Some((cell, left));
                    None
                }
            }
            None => {
                if rng.gen_range(1..=SPECIAL_FOOD_ROLL_SIDES) == 1 {
                    let cell = grid.random_cell(rng);
                    self.active = Some((cell, SPECIAL_FOOD_LIFETIME_TICKS));
                    Some(SpecialFoodEvent::Spawned(cell))
                } else {
                    None
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn place(cell: Cell, ticks_left: u32) -> Self {
        Self {
            active: Some((cell, ticks_left)),
        }
    }
}
