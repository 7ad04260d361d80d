//! Game of Life core functionality

pub mod cell;
pub mod error;
pub mod io;
pub mod rules;
pub mod universe;

pub use cell::{count_alive, Cell, Neighbors};
pub use error::UniverseError;
pub use io::{load_universe_from_file, parse_universe, save_universe_to_file};
pub use rules::GameOfLifeRules;
pub use universe::{Universe, GLIDER_UNIVERSE_SIZE};
