//! Configuration settings for the generation stream

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub universe: UniverseConfig,
    pub engine: EngineConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    pub seed: SeedKind,
    pub width: usize,
    pub height: usize,
    /// Fixed seed for the random source; `None` draws one from the OS
    pub rng_seed: Option<u64>,
    pub pattern_file: Option<PathBuf>,
}

/// How the first generation is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedKind {
    #[default]
    Random,
    Glider,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub buffer_capacity: usize,
    pub max_generations: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub refresh_hz: u32,
    pub format: OutputFormat,
    pub clear_screen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            universe: UniverseConfig::default(),
            engine: EngineConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            seed: SeedKind::Random,
            width: 25,
            height: 25,
            rng_seed: None,
            pattern_file: None,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 10,
            max_generations: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_hz: 30,
            format: OutputFormat::Text,
            clear_screen: true,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.universe.seed == SeedKind::Random
            && (self.universe.width == 0 || self.universe.height == 0)
        {
            anyhow::bail!(
                "Random universe needs positive dimensions, got {}x{}",
                self.universe.width,
                self.universe.height
            );
        }

        if self.universe.seed == SeedKind::File {
            match &self.universe.pattern_file {
                None => anyhow::bail!("Seed 'file' requires a pattern file"),
                Some(path) if !path.exists() => {
                    anyhow::bail!("Pattern file does not exist: {}", path.display())
                }
                Some(_) => {}
            }
        }

        if self.display.refresh_hz == 0 {
            anyhow::bail!("Refresh rate must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.universe.seed = SeedKind::File;
            self.universe.pattern_file = Some(pattern_file.clone());
        } else if cli_overrides.glider {
            self.universe.seed = SeedKind::Glider;
        }
        if let Some(width) = cli_overrides.width {
            self.universe.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.universe.height = height;
        }
        if let Some(rng_seed) = cli_overrides.rng_seed {
            self.universe.rng_seed = Some(rng_seed);
        }
        if let Some(buffer_capacity) = cli_overrides.buffer_capacity {
            self.engine.buffer_capacity = buffer_capacity;
        }
        if let Some(max_generations) = cli_overrides.max_generations {
            self.engine.max_generations = Some(max_generations);
        }
        if let Some(refresh_hz) = cli_overrides.refresh_hz {
            self.display.refresh_hz = refresh_hz;
        }
        if let Some(format) = cli_overrides.format {
            self.display.format = format;
        }
        if cli_overrides.no_clear {
            self.display.clear_screen = false;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub glider: bool,
    pub pattern_file: Option<PathBuf>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub rng_seed: Option<u64>,
    pub buffer_capacity: Option<usize>,
    pub max_generations: Option<u64>,
    pub refresh_hz: Option<u32>,
    pub format: Option<OutputFormat>,
    pub no_clear: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.universe.seed, SeedKind::Random);
        assert_eq!(settings.universe.width, 25);
        assert_eq!(settings.engine.buffer_capacity, 10);
        assert_eq!(settings.display.refresh_hz, 30);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.universe.seed = SeedKind::Glider;
        settings.engine.max_generations = Some(100);
        settings.to_file(&path).unwrap();

        assert_eq!(Settings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("partial.yaml");
        std::fs::write(&path, "universe:\n  seed: glider\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.universe.seed, SeedKind::Glider);
        assert_eq!(settings.universe.width, 25);
        assert_eq!(settings.engine, EngineConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();
        settings.universe.width = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.universe.seed = SeedKind::File;
        assert!(settings.validate().is_err());
        settings.universe.pattern_file = Some(PathBuf::from("does/not/exist.txt"));
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.display.refresh_hz = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            glider: true,
            buffer_capacity: Some(4),
            max_generations: Some(50),
            format: Some(OutputFormat::Json),
            no_clear: true,
            ..Default::default()
        });

        assert_eq!(settings.universe.seed, SeedKind::Glider);
        assert_eq!(settings.engine.buffer_capacity, 4);
        assert_eq!(settings.engine.max_generations, Some(50));
        assert_eq!(settings.display.format, OutputFormat::Json);
        assert!(!settings.display.clear_screen);
    }

    #[test]
    fn test_pattern_file_wins_over_glider() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            glider: true,
            pattern_file: Some(PathBuf::from("glider.txt")),
            ..Default::default()
        });
        assert_eq!(settings.universe.seed, SeedKind::File);
    }
}
