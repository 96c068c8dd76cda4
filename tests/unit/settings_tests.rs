/*!
 * Tests for the settings registry, presets catalog and resolver
 */

use anyhow::Result;
use serde_json::json;
use lyricdeck::errors::SettingsError;
use lyricdeck::settings::{
    PresetLibrary, PresetsCatalog, SecondaryTextSource, SettingsRegistry, SettingsResolver, SettingsScope,
    SettingsTree, DEFAULT_PRESET,
};
use crate::common;

#[test]
fn test_resolve_withDefaultTree_shouldUseRegistryDefaults() -> Result<()> {
    let registry = SettingsRegistry::standard();
    let resolved = SettingsResolver::new(&registry).resolve(&SettingsTree::default(), None)?;

    assert_eq!(resolved.scope, SettingsScope::Global);
    assert_eq!(resolved.settings.content.textbox.lines_per_textbox, 2);
    assert_eq!(resolved.settings.content.textbox.textbox_count, 2);
    assert_eq!(resolved.settings.content.textbox.capacity(), 4);
    assert_eq!(resolved.settings.general.secondary_text, SecondaryTextSource::Transliteration);
    assert!(!resolved.settings.general.use_different_setting_for_each_section);
    Ok(())
}

#[test]
fn test_resolve_withOutOfRangeLayout_shouldClamp() -> Result<()> {
    let registry = SettingsRegistry::standard();
    let settings = common::layout(50, 0);

    let resolved = SettingsResolver::new(&registry).resolve(&settings, None)?;

    assert_eq!(resolved.settings.content.textbox.lines_per_textbox, 20);
    assert_eq!(resolved.settings.content.textbox.textbox_count, 1);
    Ok(())
}

#[test]
fn test_resolve_withWrongTypes_shouldFallBackToDefaults() -> Result<()> {
    let registry = SettingsRegistry::standard();
    let mut settings = SettingsTree::default();
    settings.set("content.main.text.color", json!("red-ish"));
    settings.set("general.secondaryText", json!("subtitles"));

    let resolved = SettingsResolver::new(&registry).resolve(&settings, None)?;

    assert_eq!(resolved.settings.content.main.text.color, "#FFFFFF");
    assert_eq!(resolved.settings.general.secondary_text, SecondaryTextSource::Transliteration);
    Ok(())
}

#[test]
fn test_resolve_perSectionMode_shouldLayerSectionOverGlobal() -> Result<()> {
    let registry = SettingsRegistry::standard();
    let mut settings = SettingsTree::default();
    settings.set("content.main.text.color", json!("#00FF00"));
    settings.set_use_different_setting_for_each_section(true);
    let chorus = settings.section_entry("Chorus");
    chorus.use_main_section_settings = false;
    chorus.set("content.main.text.fontSize", json!(60));
    settings.section_entry("Verse");

    let resolver = SettingsResolver::new(&registry);
    let chorus = resolver.resolve(&settings, Some("Chorus"))?;
    let verse = resolver.resolve(&settings, Some("Verse"))?;

    assert_eq!(chorus.scope, SettingsScope::Section("Chorus".to_string()));
    assert_eq!(chorus.scope.key(), "section:Chorus");
    assert_eq!(chorus.settings.content.main.text.font_size, 60.0);
    assert_eq!(chorus.settings.content.main.text.color, "#00FF00");
    assert_eq!(verse.scope, SettingsScope::Global);
    assert_eq!(verse.settings.content.main.text.font_size, 36.0);
    Ok(())
}

#[test]
fn test_resolve_perSectionMode_withUnknownSection_shouldFail() {
    let registry = SettingsRegistry::standard();
    let mut settings = SettingsTree::default();
    settings.set_use_different_setting_for_each_section(true);

    let result = SettingsResolver::new(&registry).resolve(&settings, Some("Bridge"));

    assert!(matches!(result, Err(SettingsError::MissingSectionSettings { section }) if section == "Bridge"));
}

#[test]
fn test_resolve_sectionSettingsIgnored_whenModeIsOff() -> Result<()> {
    let registry = SettingsRegistry::standard();
    let mut settings = SettingsTree::default();
    let own = settings.section_entry("Chorus");
    own.use_main_section_settings = false;
    own.set("content.main.text.fontSize", json!(60));

    let resolved = SettingsResolver::new(&registry).resolve(&settings, Some("Chorus"))?;

    assert_eq!(resolved.scope, SettingsScope::Global);
    assert_eq!(resolved.settings.content.main.text.font_size, 36.0);
    Ok(())
}

#[test]
fn test_syncSections_shouldAddInheritingAndPruneStale() {
    let mut settings = SettingsTree::default();
    let kept = settings.section_entry("Kept");
    kept.use_main_section_settings = false;
    settings.section_entry("Gone");

    let sync = settings.sync_sections(["Kept", "New"]);

    assert_eq!(sync.added, vec!["New".to_string()]);
    assert_eq!(sync.removed, vec!["Gone".to_string()]);
    assert!(!settings.section("Kept").unwrap().use_main_section_settings);
    assert!(settings.section("New").unwrap().use_main_section_settings);
    assert!(settings.section("Gone").is_none());
}

#[test]
fn test_settingsTree_fromJson_shouldReadSparseScopes() -> Result<()> {
    let settings = SettingsTree::from_json(
        r#"{"content": {"textbox": {"linesPerTextbox": 3}}, "sections": {"Song": {"useMainSectionSettings": false, "content": {"main": {"text": {"bold": true}}}}}}"#,
    )?;

    assert_eq!(settings.get("content.textbox.linesPerTextbox"), Some(&json!(3)));
    assert!(settings.general.is_empty());
    let song = settings.section("Song").unwrap();
    assert!(!song.use_main_section_settings);
    assert!(song.cover.is_empty());
    Ok(())
}

#[test]
fn test_presetLibrary_fromJson_thenExtend_shouldReplaceSameNames() -> Result<()> {
    let mut library = PresetLibrary::builtin();
    let custom = PresetLibrary::from_json(
        r##"{"Stage": {"content": {"textbox": {"textboxCount": 2}}}, "Church": {"cover": {"background": {"color": "#202040"}}}}"##,
    )?;

    library.extend(custom);

    assert_eq!(library.len(), 4);
    assert!(library.get(DEFAULT_PRESET).is_some());
    let stage = library.get("Stage").unwrap();
    assert_eq!(stage.get("content.textbox.textboxCount"), Some(&json!(2)));
    assert_eq!(stage.get("content.textbox.linesPerTextbox"), None);
    assert_eq!(library.names(), vec!["Church", "Default", "Light", "Stage"]);
    Ok(())
}

#[test]
fn test_presetLibrary_load_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "presets.json", "[1, 2]")?;

    assert!(PresetLibrary::load(&path).is_err());
    Ok(())
}

#[test]
fn test_registry_fields_shouldKnowCategoriesAndDefaults() {
    let registry = SettingsRegistry::standard();

    let field = registry.field("content.textbox.textboxCount").unwrap();
    assert_eq!(field.category(), "content");
    assert_eq!(registry.defaults()["cover"]["main"]["text"]["fontSize"], json!(48));
    assert!(registry.category("general").count() >= 4);
    assert!(registry.field("content.unknown").is_none());
}
