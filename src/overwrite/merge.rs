/*!
 * Merging decoded overwrites into a settings tree.
 *
 * A named preset resets the scope to the preset's resolved values first,
 * carrying over the fields annotations never touch, and the diff is deep
 * merged on top. Without a preset the diff is merged onto the scope as it is.
 * Applying the same overwrites twice yields the same tree.
 */

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::errors::{GenerationWarning, WarningKind};
use crate::settings::presets::resolved_preset;
use crate::settings::resolver::layer_settings;
use crate::settings::tree::{deep_merge, restrict, GLOBAL_SCOPES, SECTION_SCOPES};
use crate::settings::{PresetsCatalog, SettingsRegistry, SettingsTree};

use super::annotation::SettingsOverwrite;
use super::diff::is_denylisted;
use super::document::ParsedDocument;

/// Copy every denylisted field of `from` into `into`, at any depth
fn carry_denylisted(from: &Value, into: &mut Value) {
    let (Value::Object(from_map), Value::Object(into_map)) = (from, into) else {
        return;
    };
    for (key, value) in from_map {
        if is_denylisted(key) {
            into_map.insert(key.clone(), value.clone());
        } else if value.is_object() {
            let child = into_map
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            carry_denylisted(value, child);
        }
    }
}

/// Merges overwrites using a registry and a presets catalog
pub struct OverwriteMerger<'a> {
    registry: &'a SettingsRegistry,
    presets: &'a dyn PresetsCatalog,
}

impl<'a> OverwriteMerger<'a> {
    pub fn new(registry: &'a SettingsRegistry, presets: &'a dyn PresetsCatalog) -> Self {
        Self { registry, presets }
    }

    /// Starting point for a scope: the preset's resolved values when the
    /// overwrite names a known preset, otherwise `current`
    fn baseline(
        &self,
        overwrite: &SettingsOverwrite,
        current: &Value,
        scopes: &[&str],
        line_number: Option<usize>,
        warnings: &mut Vec<GenerationWarning>,
    ) -> Value {
        let Some(name) = &overwrite.preset else {
            return current.clone();
        };
        match self.presets.get(name) {
            Some(preset) => {
                let mut reset = restrict(&resolved_preset(self.registry, &preset), scopes);
                carry_denylisted(current, &mut reset);
                reset
            }
            None => {
                let warning = GenerationWarning::new(
                    WarningKind::UnknownPreset,
                    line_number,
                    format!("Unknown preset '{}'; applying the annotation to the current settings", name),
                );
                warn!("{}", warning);
                warnings.push(warning);
                current.clone()
            }
        }
    }

    fn merged(
        &self,
        overwrite: &SettingsOverwrite,
        current: &Value,
        scopes: &[&str],
        line_number: Option<usize>,
        warnings: &mut Vec<GenerationWarning>,
    ) -> Value {
        let mut value = self.baseline(overwrite, current, scopes, line_number, warnings);
        let diff = restrict(&Value::Object(overwrite.diff.clone()), scopes);
        deep_merge(&mut value, &diff);
        value
    }

    /// Merge the global overwrite into the global scopes
    pub fn apply_global(
        &self,
        tree: &mut SettingsTree,
        overwrite: &SettingsOverwrite,
        line_number: Option<usize>,
        warnings: &mut Vec<GenerationWarning>,
    ) {
        let value = self.merged(overwrite, &tree.global_value(), &GLOBAL_SCOPES, line_number, warnings);
        tree.set_global_value(&value);
    }

    /// Merge a per-section overwrite into that section's own settings.
    ///
    /// The section stops inheriting the main settings. Its current scope is
    /// what it effectively used before, so an inheriting section starts from
    /// the global values.
    pub fn apply_section(
        &self,
        tree: &mut SettingsTree,
        section: &str,
        overwrite: &SettingsOverwrite,
        line_number: Option<usize>,
        warnings: &mut Vec<GenerationWarning>,
    ) {
        let current = restrict(
            &layer_settings(self.registry, &tree.global_value(), tree.section(section), true),
            &SECTION_SCOPES,
        );
        let value = self.merged(overwrite, &current, &SECTION_SCOPES, line_number, warnings);

        let entry = tree.section_entry(section);
        entry.use_main_section_settings = false;
        entry.set_value(&value);
    }

    /// Merge everything found in a document; returns a new tree.
    ///
    /// Scopes without an overwrite keep their settings.
    pub fn apply(&self, tree: &SettingsTree, document: &ParsedDocument) -> (SettingsTree, Vec<GenerationWarning>) {
        let mut merged = tree.clone();
        let mut warnings = Vec::new();

        if let Some(global) = &document.global {
            self.apply_global(&mut merged, global, Some(1), &mut warnings);
        }
        for section in &document.sections {
            self.apply_section(
                &mut merged,
                &section.section,
                &section.overwrite,
                Some(section.line_number),
                &mut warnings,
            );
        }

        debug!(
            "Merged {} global and {} section overwrites",
            usize::from(document.global.is_some()),
            document.sections.len()
        );
        (merged, warnings)
    }
}
