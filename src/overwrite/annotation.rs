/*!
 * Encoding of a settings overwrite as one inline annotation line.
 *
 * The line is a compact JSON object. The reserved `preset` key names the
 * baseline the diff was taken against; every other key is part of the diff.
 */

use serde_json::{Map, Value};

use crate::errors::OverwriteError;

/// Reserved key carrying the preset name
pub const PRESET_KEY: &str = "preset";

/// A settings diff plus the preset it is relative to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverwrite {
    pub preset: Option<String>,
    /// Partial scope object, e.g. `{"content":{"main":{"text":{"fontSize":40}}}}`
    pub diff: Map<String, Value>,
}

impl SettingsOverwrite {
    pub fn new(preset: Option<String>, diff: Map<String, Value>) -> Self {
        Self { preset, diff }
    }

    /// Whether the overwrite changes nothing relative to its preset
    pub fn is_empty(&self) -> bool {
        self.diff.is_empty()
    }

    /// Encode as a single compact JSON line
    pub fn to_line(&self) -> String {
        let mut object = Map::new();
        if let Some(preset) = &self.preset {
            object.insert(PRESET_KEY.to_string(), Value::String(preset.clone()));
        }
        for (key, value) in &self.diff {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object).to_string()
    }

    /// Decode an annotation line
    pub fn from_line(line: &str) -> Result<Self, OverwriteError> {
        let mut object: Map<String, Value> = serde_json::from_str(line.trim())?;

        let preset = match object.remove(PRESET_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(_) => return Err(OverwriteError::InvalidPreset),
        };

        Ok(Self { preset, diff: object })
    }
}
