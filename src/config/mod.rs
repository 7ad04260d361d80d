//! Configuration management for the generation stream

pub mod settings;

pub use settings::{
    CliOverrides, DisplayConfig, EngineConfig, OutputFormat, SeedKind, Settings, UniverseConfig,
};
