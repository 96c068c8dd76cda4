/*!
 * Integration tests for annotation write, parse and merge cycles
 */

use serde_json::{json, Value};
use lyricdeck::errors::WarningKind;
use lyricdeck::overwrite::{
    global_diff, parse_document, section_diff, strip_overwrites, upsert_section, write_overwrites, OverwriteMerger,
    SettingsOverwrite,
};
use lyricdeck::settings::{PresetLibrary, PresetsCatalog, SettingsRegistry, SettingsResolver, SettingsTree, DEFAULT_PRESET};
use crate::common::{self, TWO_SONGS};

/// A settings tree differing from its preset in one field round-trips through
/// an annotation after a section marker
#[test]
fn test_sectionDiff_insertParseMerge_shouldReproduceSettings() {
    let registry = SettingsRegistry::standard();
    let presets = PresetLibrary::builtin();
    let preset = presets.get(DEFAULT_PRESET).unwrap();

    let mut settings = SettingsTree::default();
    settings.set_use_different_setting_for_each_section(true);
    let song = settings.section_entry("Song One");
    song.use_main_section_settings = false;
    song.set("content.main.text.fontSize", json!(52));

    let overwrite = section_diff(&registry, &settings, "Song One", DEFAULT_PRESET, &preset);
    assert_eq!(Value::Object(overwrite.diff.clone()), json!({"content": {"main": {"text": {"fontSize": 52}}}}));

    let text = upsert_section(TWO_SONGS, "Song One", Some(&overwrite));
    assert_eq!(text.lines().nth(1), Some(overwrite.to_line().as_str()));

    let mut fresh = SettingsTree::default();
    fresh.set_use_different_setting_for_each_section(true);
    fresh.section_entry("Song Two");
    let (merged, warnings) = OverwriteMerger::new(&registry, &presets).apply(&fresh, &parse_document(&text));
    assert!(warnings.is_empty());

    let resolver = SettingsResolver::new(&registry);
    let expected = resolver.resolve(&settings, Some("Song One")).unwrap();
    let actual = resolver.resolve(&merged, Some("Song One")).unwrap();
    assert_eq!(actual.settings, expected.settings);
    assert_eq!(actual.settings.content.main.text.font_size, 52.0);

    let untouched = resolver.resolve(&merged, Some("Song Two")).unwrap();
    let baseline = resolver.resolve(&preset, None).unwrap();
    assert_eq!(untouched.settings.content, baseline.settings.content);
}

/// A global annotation against a non-default preset reproduces the settings
#[test]
fn test_globalDiff_againstNamedPreset_shouldRoundTrip() {
    let registry = SettingsRegistry::standard();
    let presets = PresetLibrary::builtin();
    let stage = presets.get("Stage").unwrap();

    let mut settings = stage.clone();
    settings.set("content.main.text.fontSize", json!(30));

    let overwrite = global_diff(&registry, &settings, "Stage", &stage);
    assert_eq!(overwrite.preset.as_deref(), Some("Stage"));
    assert_eq!(Value::Object(overwrite.diff.clone()), json!({"content": {"main": {"text": {"fontSize": 30}}}}));

    let text = format!("{}\nLine", overwrite.to_line());
    let (merged, warnings) =
        OverwriteMerger::new(&registry, &presets).apply(&SettingsTree::default(), &parse_document(&text));
    assert!(warnings.is_empty());

    let resolver = SettingsResolver::new(&registry);
    assert_eq!(
        resolver.resolve(&merged, None).unwrap().settings,
        resolver.resolve(&settings, None).unwrap().settings
    );
}

#[test]
fn test_stripOverwrites_withoutAnnotations_shouldBeNoOp() {
    for text in [TWO_SONGS, "", "single", "a\n\n\nb\n", "# Cover ## Sub\n@ meta\n***"] {
        let stripped = strip_overwrites(text);
        assert_eq!(stripped.text, text);
        assert_eq!(stripped.origins.len(), if text.is_empty() { 0 } else { text.split('\n').count() });
    }
}

#[test]
fn test_writeOverwrites_shouldBeIdempotentAndReplaceExistingAnnotations() {
    let registry = SettingsRegistry::standard();
    let presets = PresetLibrary::builtin();
    let mut settings = SettingsTree::default();
    settings.set("cover.background.color", json!("#112233"));
    settings.set_use_different_setting_for_each_section(true);
    let own = settings.section_entry("Song Two");
    own.use_main_section_settings = false;
    own.set("content.main.text.italic", json!(true));
    settings.section_entry("Song One");

    let once = write_overwrites(&registry, &presets, &settings, DEFAULT_PRESET, TWO_SONGS).unwrap();
    let twice = write_overwrites(&registry, &presets, &settings, DEFAULT_PRESET, &once).unwrap();
    assert_eq!(once, twice);

    let lines: Vec<&str> = once.lines().collect();
    assert_eq!(lines.len(), TWO_SONGS.lines().count() + 2);
    let global = SettingsOverwrite::from_line(lines[0]).unwrap();
    assert_eq!(Value::Object(global.diff), json!({"cover": {"background": {"color": "#112233"}}}));
    assert_eq!(lines[1], "---- Song One");
    assert_eq!(lines[5], "---- Song Two");
    let section = SettingsOverwrite::from_line(lines[6]).unwrap();
    assert_eq!(section.diff["content"], json!({"main": {"text": {"italic": true}}}));
    assert_eq!(section.diff["cover"], json!({"background": {"color": "#112233"}}));

    assert_eq!(strip_overwrites(&once).text, TWO_SONGS);
}

#[test]
fn test_writeOverwrites_thenGenerate_shouldMatchGenerationFromSettings() {
    let registry = SettingsRegistry::standard();
    let presets = PresetLibrary::builtin();
    let mut settings = common::layout(1, 2);
    settings.set("content.main.text.color", json!("#ABCDEF"));

    let annotated = write_overwrites(&registry, &presets, &settings, DEFAULT_PRESET, TWO_SONGS).unwrap();

    let (from_settings, _) = common::generate(TWO_SONGS, &settings);
    let (from_text, _) = common::generate(&annotated, &SettingsTree::default());
    assert_eq!(from_text.deck.len(), from_settings.deck.len());
    for (left, right) in from_text.deck.slides.iter().zip(&from_settings.deck.slides) {
        assert_eq!(left.text_objects, right.text_objects);
    }
}

#[test]
fn test_parseDocument_withUnknownPreset_shouldWarnAndMergeDiff() {
    let registry = SettingsRegistry::standard();
    let presets = PresetLibrary::builtin();
    let text = "{\"preset\":\"Nope\",\"content\":{\"main\":{\"text\":{\"bold\":true}}}}\nLine";

    let (merged, warnings) =
        OverwriteMerger::new(&registry, &presets).apply(&SettingsTree::default(), &parse_document(text));

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::UnknownPreset);
    assert_eq!(merged.get("content.main.text.bold"), Some(&json!(true)));
}

#[test]
fn test_parseDocument_withAnnotationAfterSubsection_shouldWarnSpecifically() {
    let document = parse_document("---- Song\n--- Verse\n{\"content\":{}}\nLine");

    assert_eq!(document.stripped.text, "---- Song\n--- Verse\nLine");
    assert_eq!(document.stripped.origins, vec![1, 2, 4]);
    assert!(document.sections.is_empty());
    assert_eq!(document.warnings.len(), 1);
    assert_eq!(document.warnings[0].kind, WarningKind::StrayAnnotation);
    assert!(document.warnings[0].message.contains("subsection"));
}
