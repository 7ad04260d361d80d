//! Errors raised by grid operations

use thiserror::Error;

/// Errors produced when writing to or building a [`Universe`](super::Universe)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniverseError {
    /// A write targeted a position outside `[0, width) x [0, height)`
    #[error("position ({x}, {y}) is outside the boundaries of a {width}x{height} universe")]
    OutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },

    /// A row did not match the width of the first row
    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}
