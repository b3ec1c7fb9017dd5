//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A cell on the build grid. Column/row index, not pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl GridCell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The cell containing a world-space point.
    pub fn from_world(point: DVec2, tile_size: f64) -> Self {
        Self {
            col: (point.x / tile_size).floor() as i32,
            row: (point.y / tile_size).floor() as i32,
        }
    }

    /// Top-left corner of the cell in world space.
    pub fn origin(&self, tile_size: f64) -> DVec2 {
        DVec2::new(self.col as f64 * tile_size, self.row as f64 * tile_size)
    }

    /// Centre of the cell in world space.
    pub fn center(&self, tile_size: f64) -> DVec2 {
        self.origin(tile_size) + DVec2::splat(tile_size / 2.0)
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
