//! Main CLI application for streaming Game of Life generations

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_stream::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{save_universe_to_file, Universe},
    run_engine,
    utils::{FrameFormatter, RefreshLimiter},
    CancellationToken,
};
use log::{debug, info, warn};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "life_stream")]
#[command(about = "Conway's Game of Life, streamed generation by generation")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve a universe and print each generation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed with a 25x25 universe holding a glider in the middle
        #[arg(long)]
        glider: bool,

        /// Seed from a pattern file ('*' alive, ' ' or '.' dead)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Width of a randomly seeded universe
        #[arg(long)]
        width: Option<usize>,

        /// Height of a randomly seeded universe
        #[arg(long)]
        height: Option<usize>,

        /// Seed for the random source, for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of generations buffered ahead of the display
        #[arg(short, long)]
        buffer: Option<usize>,

        /// Stop after this many generations
        #[arg(short, long)]
        generations: Option<u64>,

        /// Maximum frames printed per second
        #[arg(long)]
        fps: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Do not clear the terminal between frames
        #[arg(long)]
        no_clear: bool,
    },

    /// Create a default configuration and an example pattern
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            glider,
            pattern,
            width,
            height,
            seed,
            buffer,
            generations,
            fps,
            format,
            no_clear,
        } => {
            let overrides = CliOverrides {
                glider,
                pattern_file: pattern,
                width,
                height,
                rng_seed: seed,
                buffer_capacity: buffer,
                max_generations: generations,
                refresh_hz: fps,
                format,
                no_clear,
            };
            run_command(config, overrides)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        debug!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    info!(
        "Seeding {:?} universe, buffer {}, refresh {} Hz",
        settings.universe.seed, settings.engine.buffer_capacity, settings.display.refresh_hz
    );

    let generations = run_engine(&settings, CancellationToken::new())
        .context("Failed to start the engine")?;
    let formatter = FrameFormatter::new(settings.display.format, settings.display.clear_screen);
    let mut limiter = RefreshLimiter::new(settings.display.refresh_hz);
    let mut stdout = std::io::stdout().lock();

    for (index, universe) in generations.enumerate() {
        let frame = formatter.format(&universe, index as u64 + 1)?;
        limiter.wait();
        if let Err(e) = stdout.write_all(frame.as_bytes()).and_then(|_| stdout.flush()) {
            // A closed pipe ends the run; dropping the stream stops the engine
            warn!("Stopping: failed to write generation {}: {}", index + 1, e);
            break;
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config/default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let glider_path = directory.join("patterns/glider.txt");
    if !glider_path.exists() || force {
        save_universe_to_file(&Universe::new_glider(), &glider_path)
            .context("Failed to create example pattern")?;
        println!("Created: {}", glider_path.display());
    } else {
        println!("Skipped: {} (already exists)", glider_path.display());
    }

    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: life_stream run --pattern {}", glider_path.display());

    Ok(())
}
