//! A single cell and its state transition

use super::rules::GameOfLifeRules;

/// The Moore neighborhood of a cell, always resolved for all eight offsets
pub type Neighbors = [Cell; 8];

/// A cell is either alive or dead. Transitions never mutate a cell, they
/// produce a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    pub const fn new(alive: bool) -> Self {
        Self { alive }
    }

    pub const fn alive() -> Self {
        Self::new(true)
    }

    pub const fn dead() -> Self {
        Self::new(false)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Apply the Game of Life rules given the cells surrounding this one.
    ///
    /// Accepts any number of neighbors; only the alive count matters.
    pub fn interact(&self, neighbors: &[Cell]) -> Cell {
        let live_neighbors = count_alive(neighbors);
        Cell::new(GameOfLifeRules::should_be_alive(self.alive, live_neighbors))
    }
}

/// Count the alive cells in a collection
pub fn count_alive(cells: &[Cell]) -> usize {
    cells.iter().filter(|cell| cell.is_alive()).count()
}
