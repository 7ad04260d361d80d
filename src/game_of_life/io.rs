//! Pattern file I/O for universes

use super::Universe;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a universe from a pattern file
/// Format: same as `Universe::render`, '*' for alive cells and ' ' or '.' for dead cells
pub fn load_universe_from_file<P: AsRef<Path>>(path: P) -> Result<Universe> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_universe(&content)
        .with_context(|| format!("Failed to parse pattern file: {}", path.as_ref().display()))
}

/// Parse a universe from its text representation.
///
/// Rows shorter than the widest row are padded with dead cells.
pub fn parse_universe(content: &str) -> Result<Universe> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty");
    }

    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let mut rows = Vec::with_capacity(lines.len());

    for (y, line) in lines.iter().enumerate() {
        let mut row = vec![false; width];
        for (x, ch) in line.chars().enumerate() {
            match ch {
                '*' => row[x] = true,
                ' ' | '.' => {}
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '*', '.' and ' ' are allowed",
                    ch,
                    x,
                    y
                ),
            }
        }
        rows.push(row);
    }

    Ok(Universe::from_cells(rows)?)
}

/// Save a universe to a pattern file, creating parent directories as needed
pub fn save_universe_to_file<P: AsRef<Path>>(universe: &Universe, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, universe.render())
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))?;

    Ok(())
}
