use rand::seq::SliceRandom;
use rand::Rng;

use super::direction::Direction;
use super::grid::{Cell, Grid};

/// Leading body entries skipped by the self-collision check: the head itself
/// and the two segments behind it, which a legal turn can never reach.
pub const SELF_COLLISION_LOOKBACK: usize = 3;

/// The snake in the game.
///
/// `positions` holds the occupied cells, head at index 0. `length` is the
/// target body size; `advance` trims the tail until the body matches it, so
/// growth queued by `grow` becomes visible one tick later.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    positions: Vec<Cell>,
    length: usize,
    direction: Direction,
    pending: Option<Direction>,
    last: Option<Cell>,
}

impl Snake {
    /// Create a new snake of length 1 at `center`, heading right
    pub fn new(center: Cell) -> Self {
        Self {
            positions: vec![center],
            length: 1,
            direction: Direction::Right,
            pending: None,
            last: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.positions[0]
    }

    /// Cells currently occupied by the body, head first
    pub fn cells(&self) -> &[Cell] {
        &self.positions
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Target body size, including growth not yet visible
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the snake has no body (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The cell vacated by the tail on the last advance, None when the snake
    /// grew instead. The render adapter erases this cell.
    pub fn last_vacated(&self) -> Option<Cell> {
        self.last
    }

    /// Queue a new heading, applied at the next advance.
    ///
    /// A request for the exact opposite of the current heading is ignored;
    /// this is the sole guard against instant reversal into the own neck.
    pub fn queue_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.pending = Some(direction);
        }
    }

    /// Grow by one segment, taking effect on the next advance
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Move one cell: apply the queued heading, prepend the wrapped new head,
    /// and trim the tail unless the snake is still growing into `length`.
    pub fn advance(&mut self, grid: &Grid) {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }

        let new_head = grid.step(self.head(), self.direction);
        self.positions.insert(0, new_head);

        self.last = if self.positions.len() > self.length {
            self.positions.pop()
        } else {
            None
        };
    }

    /// Check if the head landed on the body beyond the lookback exclusion
    pub fn hit_self(&self) -> bool {
        let head = self.head();
        self.positions
            .iter()
            .skip(SELF_COLLISION_LOOKBACK)
            .any(|&cell| cell == head)
    }

    /// Reinitialize in place: length 1 at `center` with a random heading,
    /// queued heading and vacated cell cleared
    pub fn reset(&mut self, center: Cell, rng: &mut impl Rng) {
        self.positions.clear();
        self.positions.push(center);
        self.length = 1;
        // ALL is non-empty, choose cannot fail
        self.direction = *Direction::ALL.choose(rng).unwrap();
        self.pending = None;
        self.last = None;
    }
}
