/*!
 * End-to-end generation scenarios
 */

use serde_json::json;
use lyricdeck::errors::{GenerationError, SettingsError, WarningKind};
use lyricdeck::generator::SlideGenerator;
use lyricdeck::lyrics::{classify_lines, LineType};
use lyricdeck::presentation::{emit_deck, RecordingSink, SinkCall};
use lyricdeck::settings::{PresetLibrary, SettingsRegistry, SettingsTree};
use lyricdeck::slides::{LineToSlideMapper, SlideKind};
use crate::common::{self, TWO_SONGS};

/// Section boundary forces a fresh slide even when the next line would fit
#[test]
fn test_generate_twoSongs_shouldSplitAtSectionBoundary() {
    let (output, mapper) = common::generate(TWO_SONGS, &common::layout(2, 1));
    let deck = &output.deck;

    assert_eq!(deck.len(), 3);
    assert_eq!(deck.slide(1).unwrap().primary_lines(), vec!["Line A", "Line B"]);
    assert_eq!(deck.slide(2).unwrap().primary_lines(), vec!["Line C"]);
    assert_eq!(deck.slide(3).unwrap().primary_lines(), vec!["Line D"]);

    assert_eq!(mapper.slide_index_for_line(common::line_of(TWO_SONGS, "Line C")), Some(2));
    assert_eq!(mapper.slide_index_for_line(common::line_of(TWO_SONGS, "Line D")), Some(3));
    assert_eq!(mapper.lines_for_slide(1), vec![1, 2, 3]);
    assert_eq!(deck.slide(3).unwrap().section_name.as_deref(), Some("2. Song Two"));
}

/// N uninterrupted lines fill ⌈N / capacity⌉ slides, full textboxes first
#[test]
fn test_generate_uninterruptedLines_shouldPackToCeilOfCapacity() {
    for (lines_per_textbox, textbox_count) in [(1, 1), (2, 1), (2, 2), (3, 2), (4, 3)] {
        let capacity = lines_per_textbox * textbox_count;
        for n in 1..=13usize {
            let text: Vec<String> = (1..=n).map(|i| format!("line {}", i)).collect();
            let (output, mapper) = common::generate(&text.join("\n"), &common::layout(lines_per_textbox, textbox_count));

            assert_eq!(output.deck.len(), n.div_ceil(capacity), "n={} capacity={}", n, capacity);

            let text_objects: Vec<usize> = output
                .deck
                .slides
                .iter()
                .flat_map(|slide| slide.text_objects.iter().map(|text| text.primary.len()))
                .collect();
            let (last, full) = text_objects.split_last().unwrap();
            assert!(full.iter().all(|&count| count == lines_per_textbox), "n={} capacity={}", n, capacity);
            assert!(*last >= 1 && *last <= lines_per_textbox);
            assert_eq!(text_objects.iter().sum::<usize>(), n);

            for line in 1..=n {
                let expected = (line - 1) / capacity + 1;
                assert_eq!(mapper.slide_index_for_line(line), Some(expected), "line {} of {}", line, n);
            }
        }
    }
}

#[test]
fn test_generate_newMainSection_shouldAlwaysStartFreshSlide() {
    let text = "---- One\na\nb\nc\n--- Chorus\nd\n---- Two\ne\n---- Three\n\n@ capo\nf";
    let (output, mapper) = common::generate(text, &common::layout(2, 2));

    assert_eq!(output.deck.len(), 4);
    assert_eq!(output.deck.slide(1).unwrap().primary_lines(), vec!["a", "b", "c"]);
    assert_eq!(output.deck.slide(2).unwrap().primary_lines(), vec!["d"]);
    assert_eq!(output.deck.slide(3).unwrap().primary_lines(), vec!["e"]);
    assert_eq!(output.deck.slide(4).unwrap().primary_lines(), vec!["f"]);
    assert_eq!(mapper.slide_index_for_line(common::line_of(text, "e")), Some(3));
    assert_eq!(mapper.slide_index_for_line(common::line_of(text, "f")), Some(4));
    assert_eq!(output.deck.slides.iter().filter(|s| s.kind == SlideKind::Content).count(), 4);
}

#[test]
fn test_generate_everyContentLine_shouldResolveThroughMapper() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_lyrics(&temp_dir.path().to_path_buf(), "grace.txt").unwrap();
    let text = std::fs::read_to_string(path).unwrap();

    for settings in [SettingsTree::default(), common::layout(1, 1), common::layout(3, 2)] {
        let (output, mapper) = common::generate(&text, &settings);
        for line in classify_lines(&text) {
            if line.line_type().is_content() {
                let slide = mapper.slide_index_for_line(line.line_number);
                assert!(slide.is_some(), "line {} has no slide", line.line_number);
                assert!(slide.unwrap() <= output.deck.len());
            }
        }
        assert_eq!(mapper.closest_slide_for_line(1), Some(1));
    }
}

#[test]
fn test_generate_withCoverAndEmptySlides_shouldKeepMarkerSlides() {
    let text = "# Amazing Grace\n---- Song\nLine\n***\nAfter";
    let (output, mapper) = common::generate(text, &SettingsTree::default());

    let kinds: Vec<SlideKind> = output.deck.slides.iter().map(|slide| slide.kind).collect();
    assert_eq!(kinds, vec![SlideKind::Cover, SlideKind::Content, SlideKind::Empty, SlideKind::Content]);
    let cover = output.deck.slide(1).unwrap();
    assert_eq!(cover.primary_lines(), vec!["Amazing Grace"]);
    assert_eq!(mapper.slide_index_for_line(4), Some(3));
    assert_eq!(mapper.mappings()[0].line_type, LineType::Cover);
}

#[test]
fn test_generate_withAnnotations_shouldStripThemAndKeepOriginalLineNumbers() {
    let text = "{\"content\":{\"textbox\":{\"textboxCount\":1,\"linesPerTextbox\":1}}}\n---- Song\n{\"content\":{\"main\":{\"text\":{\"fontSize\":52}}}}\nFirst\nSecond";
    let mut settings = SettingsTree::default();
    settings.set_use_different_setting_for_each_section(true);

    let (output, mapper) = common::generate(text, &settings);

    assert_eq!(output.stripped_text, "---- Song\nFirst\nSecond");
    assert!(output.warnings.is_empty());
    assert_eq!(output.deck.len(), 2);
    assert_eq!(mapper.slide_index_for_line(4), Some(1));
    assert_eq!(mapper.slide_index_for_line(5), Some(2));

    let slide = output.deck.slide(1).unwrap();
    assert_eq!(slide.background, "section:Song/content");
    assert_eq!(slide.text_object("textbox1").unwrap().style.font_size, 52.0);
    assert!(output.deck.master("section:Song/content").is_some());
    assert_eq!(output.settings.get("content.textbox.linesPerTextbox"), Some(&json!(1)));
    assert!(!output.settings.section("Song").unwrap().use_main_section_settings);
}

#[test]
fn test_generate_withMalformedAnnotation_shouldWarnAndContinue() {
    let (output, _) = common::generate("{not: json}\nLine", &SettingsTree::default());

    assert_eq!(output.deck.len(), 1);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].kind, WarningKind::MalformedAnnotation);
    assert_eq!(output.warnings[0].line_number, Some(1));
}

#[test]
fn test_generate_perSectionMode_withoutSectionSettings_shouldFail() {
    let registry = SettingsRegistry::standard();
    let presets = PresetLibrary::builtin();
    let mut settings = SettingsTree::default();
    settings.set_use_different_setting_for_each_section(true);
    let mut mapper = LineToSlideMapper::new();

    let result = SlideGenerator::new(&registry, &presets).generate(TWO_SONGS, &settings, None, &mut mapper);

    assert!(matches!(
        result,
        Err(GenerationError::Settings(SettingsError::MissingSectionSettings { .. }))
    ));
}

#[test]
fn test_generate_withTranslation_shouldUseItAsSecondaryLine() {
    let registry = SettingsRegistry::standard();
    let presets = PresetLibrary::builtin();
    let mut settings = common::layout(2, 1);
    settings.set("general.secondaryText", json!("translation"));
    let mut mapper = LineToSlideMapper::new();

    let output = SlideGenerator::new(&registry, &presets)
        .generate("Holy night\nSilent night", &settings, Some("Heilige Nacht\nStille Nacht"), &mut mapper)
        .unwrap();

    let text = output.deck.slide(1).unwrap().text_object("textbox1").unwrap();
    assert_eq!(text.secondary, vec!["Heilige Nacht", "Stille Nacht"]);
}

#[test]
fn test_emitDeck_afterGeneration_shouldReplayEverySlide() {
    let (output, _) = common::generate("# Title ## Sub\n---- Song\nA\nB\nC", &common::layout(2, 1));
    let mut sink = RecordingSink::new();
    emit_deck(&output.deck, &mut sink).unwrap();

    let calls = sink.into_calls();
    let masters = calls.iter().take_while(|call| matches!(call, SinkCall::DefineMaster { .. })).count();
    assert_eq!(masters, output.deck.masters.len());
    let slides: Vec<usize> = calls
        .iter()
        .filter_map(|call| match call {
            SinkCall::AddSlide { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(slides, vec![1, 2, 3]);
    let texts = calls.iter().filter(|call| matches!(call, SinkCall::AddText { .. })).count();
    assert_eq!(texts, 3);
}
