use std::collections::HashSet;

use anyhow::{bail, Result};
use rand::Rng;

use super::grid::{Cell, Grid};

/// What happens when the snake's head lands on an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Grows the snake by one segment, then respawns elsewhere
    Food,
    /// Resets the snake, then respawns elsewhere
    Obstacle,
}

/// A single-cell item placed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub cell: Cell,
}

impl Item {
    /// Place a new item of `kind` on a random free cell
    pub fn spawn(
        kind: ItemKind,
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        Ok(Self {
            kind,
            cell: random_free_cell(grid, occupied, rng)?,
        })
    }

    /// Move this item to a random free cell
    pub fn relocate(
        &mut self,
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut impl Rng,
    ) -> Result<()> {
        self.cell = random_free_cell(grid, occupied, rng)?;
        Ok(())
    }
}

/// Rejection-sample a cell outside `occupied`.
///
/// The loop is bounded: a board with no free cell left fails with a
/// diagnosable error instead of spinning.
pub fn random_free_cell(
    grid: &Grid,
    occupied: &HashSet<Cell>,
    rng: &mut impl Rng,
) -> Result<Cell> {
    let max_attempts = grid.cell_count().saturating_mul(16).max(64);

    for _ in 0..max_attempts {
        let cell = grid.random_cell(rng);
        if !occupied.contains(&cell) {
            return Ok(cell);
        }
    }

    bail!(
        "no free cell found after {} attempts ({} of {} cells occupied)",
        max_attempts,
        occupied.len(),
        grid.cell_count()
    )
}
