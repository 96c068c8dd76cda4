/*!
 * Inline settings overwrites.
 *
 * Settings that differ from a preset can be stored inside the lyric text as
 * one-line JSON annotations, so a text file carries its own styling:
 *
 * - `annotation`: the line format
 * - `diff`: computing the difference against a preset
 * - `document`: finding, stripping and upserting annotation lines
 * - `merge`: applying decoded annotations back onto a settings tree
 */

pub mod annotation;
pub mod diff;
pub mod document;
pub mod merge;

use std::collections::BTreeSet;

use log::debug;

use crate::errors::OverwriteError;
use crate::lyrics::LineKind;
use crate::settings::{PresetsCatalog, SettingsRegistry, SettingsTree};

pub use annotation::{SettingsOverwrite, PRESET_KEY};
pub use diff::{diff_values, global_diff, section_diff, DENYLISTED_KEYS};
pub use document::{parse_document, strip_overwrites, upsert_global, upsert_section, ParsedDocument, SectionOverwrite, StrippedText};
pub use merge::OverwriteMerger;

/// Raw names of the main sections in a text, in order of first appearance
pub fn main_section_names(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    strip_overwrites(text)
        .classified()
        .into_iter()
        .filter_map(|line| match line.kind {
            LineKind::Section { name } => Some(name),
            _ => None,
        })
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Rewrite every annotation in `text` to describe `tree` relative to a preset.
///
/// The global annotation is always refreshed. Section annotations are written
/// for sections with their own settings while per-section mode is on and are
/// removed everywhere else. Empty diffs leave no annotation behind.
pub fn write_overwrites(
    registry: &SettingsRegistry,
    presets: &dyn PresetsCatalog,
    tree: &SettingsTree,
    preset_name: &str,
    text: &str,
) -> Result<String, OverwriteError> {
    let preset = presets
        .get(preset_name)
        .ok_or_else(|| OverwriteError::UnknownPreset(preset_name.to_string()))?;

    let global = global_diff(registry, tree, preset_name, &preset);
    let mut result = upsert_global(text, Some(&global));

    for name in main_section_names(text) {
        let owns_settings = tree.use_different_setting_for_each_section()
            && tree.section(&name).is_some_and(|section| !section.use_main_section_settings);

        let overwrite = owns_settings.then(|| section_diff(registry, tree, &name, preset_name, &preset));
        debug!(
            "Section '{}': {}",
            name,
            if overwrite.as_ref().is_some_and(|o| !o.is_empty()) { "writing annotation" } else { "no annotation" }
        );
        result = upsert_section(&result, &name, overwrite.as_ref());
    }

    Ok(result)
}
