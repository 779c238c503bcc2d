//! Play field geometry: playable cells, wraparound and pixel mapping.
//!
//! The field is `columns x rows` cells of `block_size` pixels. The top
//! `band_rows` rows sit under the scoreboard and are never playable. A band
//! height that is not a multiple of the block size still reserves the whole
//! partially covered row.

use super::types::{Cell, Direction};
use crate::error::{GameError, Result};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    block_size: u32,
    columns: i16,
    rows: i16,
    band_rows: i16,
}

impl Grid {
    /// Build a grid from pixel dimensions.
    ///
    /// Fails with [`GameError::Config`] when the block size is zero or the
    /// band leaves no playable row.
    pub fn new(width_px: u32, height_px: u32, block_size: u32, band_px: u32) -> Result<Self> {
        if block_size == 0 {
            return Err(GameError::Config("block size must be positive".into()));
        }

        let columns = width_px / block_size;
        let rows = height_px / block_size;
        let band_rows = band_px.div_ceil(block_size);

        if columns == 0 {
            return Err(GameError::Config(format!(
                "field width {width_px}px holds no {block_size}px column"
            )));
        }
        if band_rows >= rows {
            return Err(GameError::Config(format!(
                "scoreboard band of {band_px}px leaves no playable row in {height_px}px"
            )));
        }
        if columns > i16::MAX as u32 || rows > i16::MAX as u32 {
            return Err(GameError::Config("field is too large".into()));
        }

        Ok(Self {
            block_size,
            columns: columns as i16,
            rows: rows as i16,
            band_rows: band_rows as i16,
        })
    }

    pub fn columns(&self) -> i16 {
        self.columns
    }

    /// Total rows including the scoreboard band.
    pub fn rows(&self) -> i16 {
        self.rows
    }

    pub fn band_rows(&self) -> i16 {
        self.band_rows
    }

    pub fn playable_rows(&self) -> i16 {
        self.rows - self.band_rows
    }

    pub fn width_px(&self) -> u32 {
        self.columns as u32 * self.block_size
    }

    pub fn height_px(&self) -> u32 {
        self.rows as u32 * self.block_size
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.columns).contains(&cell.x) && (self.band_rows..self.rows).contains(&cell.y)
    }

    /// Step one cell in `direction`, wrapping around the field edges.
    ///
    /// Horizontal movement wraps across the full width. Vertical movement wraps
    /// within the playable rows only, so the head never enters the band.
    pub fn wrap(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        let playable = self.playable_rows();
        let x = (cell.x + dx).rem_euclid(self.columns);
        let y = self.band_rows + (cell.y - self.band_rows + dy).rem_euclid(playable);
        Cell { x, y }
    }

    /// Round pixel coordinates down to the cell that contains them.
    /// Coordinates outside the playable area are clamped onto its edge.
    pub fn snap(&self, px: i64, py: i64) -> Cell {
        let block = self.block_size as i64;
        let x = px.div_euclid(block).clamp(0, self.columns as i64 - 1);
        let y = py
            .div_euclid(block)
            .clamp(self.band_rows as i64, self.rows as i64 - 1);
        Cell {
            x: x as i16,
            y: y as i16,
        }
    }

    /// Starting cell for a fresh snake: the cell under the field's pixel center.
    pub fn center(&self) -> Cell {
        self.snap(
            (self.width_px() / 2) as i64,
            (self.height_px() / 2) as i64,
        )
    }

    /// All playable cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.band_rows..self.rows)
            .flat_map(move |y| (0..self.columns).map(move |x| Cell { x, y }))
    }

    /// A uniformly random playable cell.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        Cell {
            x: rng.gen_range(0..self.columns),
            y: rng.gen_range(self.band_rows..self.rows),
        }
    }
}
