use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Preset that generated annotations are written against
    #[serde(default = "default_preset")]
    pub default_preset: String,

    /// Optional JSON file with additional presets (`name → settings tree`)
    #[serde(default)]
    pub presets_file: Option<String>,

    /// Optional JSON file with the base settings tree
    #[serde(default)]
    pub settings_file: Option<String>,

    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty_output: bool,

    /// Extension of lyric files picked up in folder mode
    #[serde(default = "default_lyrics_extension")]
    pub lyrics_extension: String,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_preset() -> String {
    crate::settings::DEFAULT_PRESET.to_string()
}

fn default_true() -> bool {
    true
}

fn default_lyrics_extension() -> String {
    "txt".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.default_preset.trim().is_empty() {
            return Err(anyhow!("Default preset name must not be empty"));
        }

        if self.lyrics_extension.trim().trim_start_matches('.').is_empty() {
            return Err(anyhow!("Lyrics file extension must not be empty"));
        }

        if let Some(presets_file) = &self.presets_file {
            if !Path::new(presets_file).is_file() {
                return Err(anyhow!("Presets file does not exist: {}", presets_file));
            }
        }

        if let Some(settings_file) = &self.settings_file {
            if !Path::new(settings_file).is_file() {
                return Err(anyhow!("Settings file does not exist: {}", settings_file));
            }
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Load a configuration file, creating one with defaults when missing.
    ///
    /// The flag tells whether the file was created.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            return Ok((Self::load(path)?, false));
        }

        let config = Self::default();
        config.save(path)?;
        Ok((config, true))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            default_preset: default_preset(),
            presets_file: None,
            settings_file: None,
            pretty_output: default_true(),
            lyrics_extension: default_lyrics_extension(),
        }
    }
}
