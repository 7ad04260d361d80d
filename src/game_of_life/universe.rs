//! The bounded grid of cells and its evolution

use super::cell::{Cell, Neighbors};
use super::error::UniverseError;
use itertools::iproduct;
use rand::Rng;
use rayon::prelude::*;
use std::fmt;

/// Side length of the grid produced by [`Universe::new_glider`]
pub const GLIDER_UNIVERSE_SIZE: usize = 25;

/// Moore neighborhood offsets as `(dx, dy)`, in row-major order
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A fixed-size snapshot of the Game of Life.
///
/// Although the universe is conceptually infinite, only a `width x height`
/// window is tracked; everything outside it is considered dead. Each value
/// owns its storage, so evolving never touches the previous generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Universe {
    /// Create a universe where every cell is dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::dead(); width * height],
        }
    }

    /// Create a universe where every cell is an independent coin flip drawn from `rng`
    pub fn new_random<R: Rng>(width: usize, height: usize, rng: &mut R) -> Self {
        let cells = (0..width * height)
            .map(|_| Cell::new(rng.random::<bool>()))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Create a 25x25 universe with a glider in the middle.
    ///
    /// The glider moves one cell towards increasing x and increasing y (down
    /// and to the right as rendered) every four generations.
    pub fn new_glider() -> Self {
        let mut universe = Self::new(GLIDER_UNIVERSE_SIZE, GLIDER_UNIVERSE_SIZE);
        let c = (GLIDER_UNIVERSE_SIZE / 2) as isize;
        for (x, y) in [(c, c), (c + 1, c), (c + 2, c), (c + 1, c - 2), (c + 2, c - 1)] {
            universe.cells[y as usize * GLIDER_UNIVERSE_SIZE + x as usize] = Cell::alive();
        }
        universe
    }

    /// Create a universe from rows of booleans; all rows must share the first row's length
    pub fn from_cells(rows: Vec<Vec<bool>>) -> Result<Self, UniverseError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(UniverseError::RaggedRow {
                    row,
                    found: cells.len(),
                    expected: width,
                });
            }
        }

        let cells = rows.into_iter().flatten().map(Cell::new).collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Get the cell at `(x, y)`; anything outside the grid is a dead cell
    pub fn get(&self, x: isize, y: isize) -> Cell {
        self.index(x, y).map_or(Cell::dead(), |idx| self.cells[idx])
    }

    /// Set the state of the cell at `(x, y)`
    pub fn set(&mut self, x: isize, y: isize, alive: bool) -> Result<(), UniverseError> {
        let idx = self.index(x, y).ok_or(UniverseError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.cells[idx] = Cell::new(alive);
        Ok(())
    }

    /// The eight cells surrounding `(x, y)`, each resolved through [`Universe::get`]
    pub fn neighbors(&self, x: isize, y: isize) -> Neighbors {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| {
            x.checked_add(dx)
                .zip(y.checked_add(dy))
                .map_or(Cell::dead(), |(x, y)| self.get(x, y))
        })
    }

    fn next_cell(&self, x: isize, y: isize) -> Cell {
        self.get(x, y).interact(&self.neighbors(x, y))
    }

    /// Produce the next generation.
    ///
    /// Every cell is computed from `self` alone, so updates within a
    /// generation never observe each other.
    pub fn evolve(&self) -> Universe {
        let cells: Vec<Cell> = (0..self.height)
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..self.width).map(move |x| self.next_cell(x as isize, y as isize))
            })
            .collect();

        Universe {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Coordinates `(x, y)` of every living cell, row by row
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.height, 0..self.width)
            .filter(|&(y, x)| self.cells[y * self.width + x].is_alive())
            .map(|(y, x)| (x, y))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// True when no cell is alive
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    /// Render as text: `*` for alive, a space for dead, one newline-terminated line per row
    pub fn render(&self) -> String {
        let mut output = String::with_capacity(self.height * (self.width + 1));
        for y in 0..self.height {
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                output.push(if cell.is_alive() { '*' } else { ' ' });
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
