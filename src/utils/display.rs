//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::Universe;
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::{Duration, Instant};

/// ANSI sequence that clears the terminal and moves the cursor home
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// A single generation as written in JSON output
#[derive(Debug, Serialize)]
struct JsonFrame {
    generation: u64,
    width: usize,
    height: usize,
    alive: Vec<(usize, usize)>,
}

/// Format generations for the terminal
pub struct FrameFormatter {
    format: OutputFormat,
    clear_screen: bool,
}

impl FrameFormatter {
    pub fn new(format: OutputFormat, clear_screen: bool) -> Self {
        Self {
            format,
            clear_screen,
        }
    }

    /// Format one generation. Text frames are the universe rendering, JSON
    /// frames are a single line listing the living cells.
    pub fn format(&self, universe: &Universe, generation: u64) -> Result<String> {
        match self.format {
            OutputFormat::Text => {
                let mut output = String::new();
                if self.clear_screen {
                    output.push_str(CLEAR_SCREEN);
                }
                output.push_str(&universe.render());
                Ok(output)
            }
            OutputFormat::Json => {
                let frame = JsonFrame {
                    generation,
                    width: universe.width(),
                    height: universe.height(),
                    alive: universe.living_cells(),
                };
                let mut line =
                    serde_json::to_string(&frame).context("Failed to serialize generation")?;
                line.push('\n');
                Ok(line)
            }
        }
    }
}

/// Caps how often frames are emitted
pub struct RefreshLimiter {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl RefreshLimiter {
    /// Allow at most `refresh_hz` frames per second; zero disables the cap
    pub fn new(refresh_hz: u32) -> Self {
        let interval = if refresh_hz == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / refresh_hz
        };
        Self {
            interval,
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until the next frame is due, then mark it as emitted
    pub fn wait(&mut self) {
        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());
    }
}
