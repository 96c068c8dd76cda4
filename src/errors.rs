/*!
 * Error types for the lyricdeck library.
 *
 * This module contains custom error types for the different stages of slide
 * generation, using the thiserror crate for ergonomic error definitions.
 * Non-fatal findings (malformed annotations and the like) are not errors; they
 * travel as `GenerationWarning` values next to the generated deck.
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while resolving settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Per-section mode is enabled but the section has no stored settings
    #[error("No settings stored for section '{section}' while per-section settings are enabled")]
    MissingSectionSettings {
        /// Raw section name as written after the marker
        section: String,
    },

    /// Lines per textbox or textbox count resolved to zero
    #[error("Invalid slide layout: {lines_per_textbox} lines per textbox x {textbox_count} textboxes")]
    InvalidLayout {
        /// Lines per textbox
        lines_per_textbox: usize,
        /// Textboxes per slide
        textbox_count: usize,
    },

    /// The layered settings could not be read back into typed form
    #[error("Failed to read resolved settings: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors that can occur during slide generation
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Error while resolving settings
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// The position calculator addressed a textbox the layout does not define
    #[error("Textbox '{key}' is not available (textbox count is {textbox_count})")]
    TextboxOutOfRange {
        /// Textbox key, e.g. `textbox3`
        key: String,
        /// Configured textbox count
        textbox_count: usize,
    },

    /// The presentation sink rejected a call
    #[error("Presentation sink error: {0}")]
    Sink(String),
}

/// Errors that can occur while decoding an overwrite annotation
#[derive(Error, Debug)]
pub enum OverwriteError {
    /// The annotation is not valid JSON
    #[error("Malformed settings annotation: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The reserved `preset` key holds something other than a string
    #[error("Preset name in settings annotation must be a string")]
    InvalidPreset,

    /// Annotations were requested against a preset the catalog does not know
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
}

/// Kind of a non-fatal finding during generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    /// Annotation at an anchor that could not be decoded
    MalformedAnnotation,
    /// Annotation that is not directly after an anchor
    StrayAnnotation,
    /// Annotation naming a preset the catalog does not know
    UnknownPreset,
}

/// A non-fatal finding reported next to the generated deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationWarning {
    pub kind: WarningKind,
    /// 1-based line in the original text, when the finding has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    pub message: String,
}

impl GenerationWarning {
    pub fn new(kind: WarningKind, line_number: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            line_number,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from settings resolution
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Error from slide generation
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    /// Classify by the typed error at the root of the context chain
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<GenerationError>() {
            Ok(generation) => return Self::Generation(generation),
            Err(error) => error,
        };
        let error = match error.downcast::<SettingsError>() {
            Ok(settings) => return Self::Settings(settings),
            Err(error) => error,
        };
        if error.downcast_ref::<std::io::Error>().is_some() {
            return Self::File(format!("{:#}", error));
        }
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
