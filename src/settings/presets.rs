/*!
 * Presets catalog.
 *
 * A preset is a named baseline settings tree. Overwrite annotations are
 * expressed as a diff against one of them, so the catalog is consulted both
 * when annotations are written and when they are merged back.
 */

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::registry::SettingsRegistry;
use super::tree::{layered, SettingsTree};

/// Name of the preset used when nothing else is configured
pub const DEFAULT_PRESET: &str = "Default";

/// Read-only lookup of presets by name
pub trait PresetsCatalog {
    /// The preset tree, if the catalog knows the name
    fn get(&self, name: &str) -> Option<SettingsTree>;

    /// All preset names
    fn names(&self) -> Vec<String>;
}

/// Resolved global scopes of a preset: registry defaults with the preset on top
pub fn resolved_preset(registry: &SettingsRegistry, preset: &SettingsTree) -> Value {
    let mut value = layered(&[registry.defaults(), &preset.global_value()]);
    registry.clamp(&mut value);
    value
}

/// In-memory presets catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetLibrary {
    presets: BTreeMap<String, SettingsTree>,
}

impl PresetLibrary {
    /// Empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Library with the presets shipped with lyricdeck
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.insert(DEFAULT_PRESET, SettingsTree::default());

        let mut light = SettingsTree::default();
        light.set("cover.background.color", json!("#FFFFFF"));
        light.set("content.background.color", json!("#FFFFFF"));
        light.set("cover.main.text.color", json!("#111111"));
        light.set("cover.secondary.text.color", json!("#444444"));
        light.set("content.main.text.color", json!("#111111"));
        light.set("content.secondary.text.color", json!("#555555"));
        library.insert("Light", light);

        let mut stage = SettingsTree::default();
        stage.set("content.textbox.linesPerTextbox", json!(4));
        stage.set("content.textbox.textboxCount", json!(1));
        stage.set("content.textboxes.textbox1.positionY", json!(55.0));
        stage.set("content.main.text.fontSize", json!(44));
        stage.set("content.main.text.outline.enabled", json!(true));
        stage.set("content.secondary.enabled", json!(false));
        library.insert("Stage", stage);

        library
    }

    /// Load a library from a JSON object of `name → settings tree`
    pub fn from_json(json: &str) -> Result<Self> {
        let presets: BTreeMap<String, SettingsTree> =
            serde_json::from_str(json).context("Failed to parse presets JSON")?;
        Ok(Self { presets })
    }

    /// Load a library from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read presets file: {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Add or replace a preset
    pub fn insert(&mut self, name: &str, preset: SettingsTree) {
        self.presets.insert(name.to_string(), preset);
    }

    /// Add every preset of another library, replacing same-named ones
    pub fn extend(&mut self, other: PresetLibrary) {
        self.presets.extend(other.presets);
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl PresetsCatalog for PresetLibrary {
    fn get(&self, name: &str) -> Option<SettingsTree> {
        self.presets.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }
}
