/*!
 * Stored settings tree.
 *
 * The tree is sparse: every scope is a JSON object holding only
 * the fields that were set explicitly. Missing fields fall back to the global
 * scope and then to the registry defaults when the resolver layers them.
 */

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scopes that make up the global part of a settings tree
pub const GLOBAL_SCOPES: [&str; 4] = ["general", "file", "cover", "content"];

/// Scopes a section may override
pub const SECTION_SCOPES: [&str; 2] = ["cover", "content"];

/// Hierarchical, sparse settings configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsTree {
    /// Behavior flags shared by the whole document
    #[serde(default)]
    pub general: Map<String, Value>,

    /// Presentation file properties
    #[serde(default)]
    pub file: Map<String, Value>,

    /// Cover slide style
    #[serde(default)]
    pub cover: Map<String, Value>,

    /// Content slide style and layout
    #[serde(default)]
    pub content: Map<String, Value>,

    /// Per-section settings keyed by the raw main section name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<String, SectionSettings>,
}

/// Settings stored for a single main section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSettings {
    /// When set, the section ignores its own scopes and uses the global ones
    #[serde(default)]
    pub use_main_section_settings: bool,

    /// Cover style override
    #[serde(default)]
    pub cover: Map<String, Value>,

    /// Content style override
    #[serde(default)]
    pub content: Map<String, Value>,
}

/// Outcome of synchronizing section entries with a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSync {
    /// Section names that received a fresh inheriting entry
    pub added: Vec<String>,
    /// Section names whose entries were dropped
    pub removed: Vec<String>,
}

impl SettingsTree {
    /// Parse a settings tree from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a tree whose global scopes are taken from a scope object
    pub fn from_global_value(value: &Value) -> Self {
        let mut tree = Self::default();
        tree.set_global_value(value);
        tree
    }

    /// Global scopes as one JSON object (`general`, `file`, `cover`, `content`)
    pub fn global_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("general".to_string(), Value::Object(self.general.clone()));
        object.insert("file".to_string(), Value::Object(self.file.clone()));
        object.insert("cover".to_string(), Value::Object(self.cover.clone()));
        object.insert("content".to_string(), Value::Object(self.content.clone()));
        Value::Object(object)
    }

    /// Replace the global scopes from a scope object; scopes absent from the
    /// object are left untouched
    pub fn set_global_value(&mut self, value: &Value) {
        for scope in GLOBAL_SCOPES {
            if let Some(Value::Object(map)) = value.get(scope) {
                *self.scope_mut(scope) = map.clone();
            }
        }
    }

    fn scope_mut(&mut self, scope: &str) -> &mut Map<String, Value> {
        match scope {
            "general" => &mut self.general,
            "file" => &mut self.file,
            "cover" => &mut self.cover,
            _ => &mut self.content,
        }
    }

    fn scope(&self, scope: &str) -> Option<&Map<String, Value>> {
        match scope {
            "general" => Some(&self.general),
            "file" => Some(&self.file),
            "cover" => Some(&self.cover),
            "content" => Some(&self.content),
            _ => None,
        }
    }

    /// Read a field by dotted path, e.g. `content.main.text.fontSize`
    pub fn get(&self, path: &str) -> Option<&Value> {
        let (scope, rest) = path.split_once('.')?;
        get_in_map(self.scope(scope)?, rest)
    }

    /// Write a field by dotted path, creating intermediate objects
    pub fn set(&mut self, path: &str, value: Value) {
        if let Some((scope, rest)) = path.split_once('.') {
            if GLOBAL_SCOPES.contains(&scope) {
                set_in_map(self.scope_mut(scope), rest, value);
            }
        }
    }

    /// Whether sections may carry their own settings
    pub fn use_different_setting_for_each_section(&self) -> bool {
        self.general
            .get("useDifferentSettingForEachSection")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_use_different_setting_for_each_section(&mut self, enabled: bool) {
        self.general.insert(
            "useDifferentSettingForEachSection".to_string(),
            Value::Bool(enabled),
        );
    }

    /// Stored settings for a section
    pub fn section(&self, name: &str) -> Option<&SectionSettings> {
        self.sections.get(name)
    }

    /// Stored settings for a section, inserting an inheriting entry if absent
    pub fn section_entry(&mut self, name: &str) -> &mut SectionSettings {
        self.sections
            .entry(name.to_string())
            .or_insert_with(SectionSettings::inheriting)
    }

    /// Make the stored section entries match the given section names.
    ///
    /// New names get an entry that inherits the global settings, names no
    /// longer present are pruned. Existing entries are kept untouched.
    pub fn sync_sections<I, S>(&mut self, names: I) -> SectionSync
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        let mut sync = SectionSync::default();

        let stale: Vec<String> = self
            .sections
            .keys()
            .filter(|name| !wanted.contains(*name))
            .cloned()
            .collect();
        for name in stale {
            self.sections.remove(&name);
            sync.removed.push(name);
        }

        for name in wanted {
            if !self.sections.contains_key(&name) {
                self.sections.insert(name.clone(), SectionSettings::inheriting());
                sync.added.push(name);
            }
        }

        sync
    }
}

impl SectionSettings {
    /// An entry that follows the global settings
    pub fn inheriting() -> Self {
        Self {
            use_main_section_settings: true,
            cover: Map::new(),
            content: Map::new(),
        }
    }

    /// Section scopes as one JSON object (`cover`, `content`)
    pub fn value(&self) -> Value {
        let mut object = Map::new();
        object.insert("cover".to_string(), Value::Object(self.cover.clone()));
        object.insert("content".to_string(), Value::Object(self.content.clone()));
        Value::Object(object)
    }

    /// Replace the section scopes from a scope object
    pub fn set_value(&mut self, value: &Value) {
        if let Some(Value::Object(map)) = value.get("cover") {
            self.cover = map.clone();
        }
        if let Some(Value::Object(map)) = value.get("content") {
            self.content = map.clone();
        }
    }

    /// Write a field by dotted path (`cover.…` or `content.…`)
    pub fn set(&mut self, path: &str, value: Value) {
        match path.split_once('.') {
            Some(("cover", rest)) => set_in_map(&mut self.cover, rest, value),
            Some(("content", rest)) => set_in_map(&mut self.content, rest, value),
            _ => {}
        }
    }
}

/// Merge `patch` into `target`: objects merge key by key, anything else replaces
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                let nested = patch_value.is_object()
                    && target_map.get(key).is_some_and(Value::is_object);
                if nested {
                    if let Some(existing) = target_map.get_mut(key) {
                        deep_merge(existing, patch_value);
                    }
                } else {
                    target_map.insert(key.clone(), patch_value.clone());
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

/// Layer a list of scope objects on top of each other, later layers winning
pub fn layered(layers: &[&Value]) -> Value {
    let mut result = Value::Object(Map::new());
    for layer in layers {
        deep_merge(&mut result, layer);
    }
    result
}

/// Keep only the named top-level scopes of a scope object
pub fn restrict(value: &Value, scopes: &[&str]) -> Value {
    let mut object = Map::new();
    for scope in scopes {
        if let Some(scope_value) = value.get(*scope) {
            object.insert(scope.to_string(), scope_value.clone());
        }
    }
    Value::Object(object)
}

/// Read a value by dotted path
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// Write a value by dotted path, creating intermediate objects
pub fn set_path(value: &mut Value, path: &str, new_value: Value) {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    if let Value::Object(map) = value {
        set_in_map(map, path, new_value);
    }
}

fn get_in_map<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    match path.split_once('.') {
        None => map.get(path),
        Some((head, rest)) => get_path(map.get(head)?, rest),
    }
}

fn set_in_map(map: &mut Map<String, Value>, path: &str, new_value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), new_value);
        }
        Some((head, rest)) => {
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            set_path(child, rest, new_value);
        }
    }
}
