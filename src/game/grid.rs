use rand::Rng;

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Board dimensions and wraparound arithmetic.
///
/// The board is a torus: stepping past any edge reappears on the opposite
/// edge, with true modular wraparound on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// The cell where the snake spawns
    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// The neighboring cell one step in `direction`, wrapping at the edges.
    ///
    /// `rem_euclid` keeps negative coordinates on the board, so stepping left
    /// from x = 0 lands on the rightmost column rather than at -1.
    pub fn step(&self, from: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(
            (from.x + dx).rem_euclid(self.width),
            (from.y + dy).rem_euclid(self.height),
        )
    }

    /// A cell drawn uniformly at random, each axis independent
    pub fn random_cell(&self, rng: &mut impl Rng) -> Cell {
        Cell::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }
}
