/*!
 * Settings diffs against a preset.
 *
 * Both sides are filled with registry defaults and clamped before they are
 * compared, so a field left unset and a field set to its default compare
 * equal. Objects are compared key by key; arrays and scalars are leaves.
 */

use serde_json::{Map, Value};

use crate::settings::presets::resolved_preset;
use crate::settings::resolver::layer_settings;
use crate::settings::tree::{layered, restrict, GLOBAL_SCOPES, SECTION_SCOPES};
use crate::settings::{SettingsRegistry, SettingsTree};

use super::annotation::SettingsOverwrite;

/// Keys never written to or read from an annotation, at any depth
pub const DENYLISTED_KEYS: [&str; 3] = ["image", "useDifferentSettingForEachSection", "autoOutput"];

pub fn is_denylisted(key: &str) -> bool {
    DENYLISTED_KEYS.contains(&key)
}

/// Recursive difference of `current` against `baseline`.
///
/// Returns the parts of `current` that differ, or `None` when nothing does.
pub fn diff_values(current: &Value, baseline: &Value) -> Option<Value> {
    match (current, baseline) {
        (Value::Object(current_map), Value::Object(baseline_map)) => {
            let mut changed = Map::new();
            for (key, value) in current_map {
                if is_denylisted(key) {
                    continue;
                }
                let difference = match baseline_map.get(key) {
                    Some(base) => diff_values(value, base),
                    None => Some(value.clone()),
                };
                if let Some(difference) = difference {
                    changed.insert(key.clone(), difference);
                }
            }
            (!changed.is_empty()).then_some(Value::Object(changed))
        }
        (current, baseline) if current == baseline => None,
        (current, _) => Some(current.clone()),
    }
}

fn into_overwrite(preset_name: &str, difference: Option<Value>) -> SettingsOverwrite {
    let diff = match difference {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    SettingsOverwrite::new(Some(preset_name.to_string()), diff)
}

/// Diff of the global scopes (`general`, `file`, `cover`, `content`)
pub fn global_diff(
    registry: &SettingsRegistry,
    tree: &SettingsTree,
    preset_name: &str,
    preset: &SettingsTree,
) -> SettingsOverwrite {
    let mut current = layered(&[registry.defaults(), &tree.global_value()]);
    registry.clamp(&mut current);
    let baseline = resolved_preset(registry, preset);

    into_overwrite(
        preset_name,
        diff_values(&restrict(&current, &GLOBAL_SCOPES), &restrict(&baseline, &GLOBAL_SCOPES)),
    )
}

/// Diff of a section's effective `cover` and `content` scopes.
///
/// Sections without a stored entry, or inheriting the main settings, are
/// compared through the global settings they effectively use.
pub fn section_diff(
    registry: &SettingsRegistry,
    tree: &SettingsTree,
    section_name: &str,
    preset_name: &str,
    preset: &SettingsTree,
) -> SettingsOverwrite {
    let current = layer_settings(registry, &tree.global_value(), tree.section(section_name), true);
    let baseline = resolved_preset(registry, preset);

    into_overwrite(
        preset_name,
        diff_values(&restrict(&current, &SECTION_SCOPES), &restrict(&baseline, &SECTION_SCOPES)),
    )
}
