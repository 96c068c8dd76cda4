/*!
 * Settings resolution.
 *
 * Decides which stored scopes apply to a section and layers them over the
 * registry defaults: section value → global value → registry default, field
 * by field. Resolution is a pure function of its inputs; it runs at every
 * section boundary during generation.
 */

use serde_json::Value;

use crate::errors::SettingsError;
use super::model::ResolvedSettings;
use super::registry::SettingsRegistry;
use super::tree::{layered, SectionSettings, SettingsTree};

/// Which stored scope the effective settings came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsScope {
    Global,
    /// Settings owned by the named main section
    Section(String),
}

impl SettingsScope {
    /// Short identifier used for background master names
    pub fn key(&self) -> String {
        match self {
            Self::Global => "main".to_string(),
            Self::Section(name) => format!("section:{}", name),
        }
    }
}

/// Resolved settings together with the scope they came from
#[derive(Debug, Clone)]
pub struct ScopedSettings {
    pub scope: SettingsScope,
    pub settings: ResolvedSettings,
}

/// Layer the stored scopes for one section over the registry defaults.
///
/// `section` is only consulted when `use_different_setting_for_each_section`
/// is on and the section does not inherit the main settings.
pub fn layer_settings(
    registry: &SettingsRegistry,
    global: &Value,
    section: Option<&SectionSettings>,
    use_different_setting_for_each_section: bool,
) -> Value {
    let own = section.filter(|s| use_different_setting_for_each_section && !s.use_main_section_settings);

    let mut effective = match own {
        Some(section) => layered(&[registry.defaults(), global, &section.value()]),
        None => layered(&[registry.defaults(), global]),
    };
    registry.clamp(&mut effective);
    effective
}

/// Resolves effective settings from a stored tree
pub struct SettingsResolver<'a> {
    registry: &'a SettingsRegistry,
}

impl<'a> SettingsResolver<'a> {
    pub fn new(registry: &'a SettingsRegistry) -> Self {
        Self { registry }
    }

    /// Which scope applies to a section.
    ///
    /// Fails when per-section mode is on and the section has no stored entry.
    pub fn scope_for(&self, tree: &SettingsTree, section: Option<&str>) -> Result<SettingsScope, SettingsError> {
        let Some(name) = section else {
            return Ok(SettingsScope::Global);
        };
        if !tree.use_different_setting_for_each_section() {
            return Ok(SettingsScope::Global);
        }
        let stored = tree
            .section(name)
            .ok_or_else(|| SettingsError::MissingSectionSettings {
                section: name.to_string(),
            })?;
        if stored.use_main_section_settings {
            Ok(SettingsScope::Global)
        } else {
            Ok(SettingsScope::Section(name.to_string()))
        }
    }

    /// Effective scope object (`general`, `file`, `cover`, `content`)
    pub fn effective_value(&self, tree: &SettingsTree, section: Option<&str>) -> Result<Value, SettingsError> {
        let scope = self.scope_for(tree, section)?;
        let stored = match &scope {
            SettingsScope::Global => None,
            SettingsScope::Section(name) => tree.section(name),
        };
        Ok(layer_settings(
            self.registry,
            &tree.global_value(),
            stored,
            tree.use_different_setting_for_each_section(),
        ))
    }

    /// Typed effective settings for a section, or the global ones for `None`
    pub fn resolve(&self, tree: &SettingsTree, section: Option<&str>) -> Result<ScopedSettings, SettingsError> {
        let scope = self.scope_for(tree, section)?;
        let value = self.effective_value(tree, section)?;
        let settings: ResolvedSettings = serde_json::from_value(value)?;
        Ok(ScopedSettings { scope, settings })
    }
}
