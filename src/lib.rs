//! Conway's Game of Life as a cancellable stream of generations
//!
//! A [`Universe`] evolves one generation at a time; the [`Engine`] does so on
//! a background thread and hands each generation to the caller through a
//! bounded buffer until it is cancelled.

pub mod config;
pub mod engine;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use engine::{CancellationToken, Engine, Generations};
pub use game_of_life::{Cell, Universe, UniverseError};

use anyhow::{Context, Result};
use config::SeedKind;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build the first generation described by `settings`
pub fn seed_universe(settings: &Settings) -> Result<Universe> {
    let universe = match settings.universe.seed {
        SeedKind::Random => {
            let mut rng = match settings.universe.rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            Universe::new_random(settings.universe.width, settings.universe.height, &mut rng)
        }
        SeedKind::Glider => Universe::new_glider(),
        SeedKind::File => {
            let path = settings
                .universe
                .pattern_file
                .as_ref()
                .context("Seed 'file' requires a pattern file")?;
            game_of_life::load_universe_from_file(path)?
        }
    };
    Ok(universe)
}

/// Main entry point: seed a universe from `settings` and start streaming its generations
pub fn run_engine(settings: &Settings, cancellation: CancellationToken) -> Result<Generations> {
    let initial = seed_universe(settings)?;

    let mut engine = Engine::new();
    if let Some(limit) = settings.engine.max_generations {
        engine = engine.with_generation_limit(limit);
    }

    engine.run(initial, cancellation, settings.engine.buffer_capacity)
}
