/*!
 * Tests for error types and conversions
 */

use lyricdeck::errors::{
    AppError, GenerationError, GenerationWarning, OverwriteError, SettingsError, WarningKind,
};

#[test]
fn test_settings_error_missingSection_shouldNameTheSection() {
    let error = SettingsError::MissingSectionSettings {
        section: "Song One".to_string(),
    };
    assert!(error.to_string().contains("'Song One'"));
}

#[test]
fn test_generation_error_fromSettingsError_shouldWrap() {
    let error: GenerationError = SettingsError::InvalidLayout {
        lines_per_textbox: 0,
        textbox_count: 2,
    }
    .into();

    assert!(matches!(error, GenerationError::Settings(SettingsError::InvalidLayout { .. })));
    assert_eq!(
        error.to_string(),
        "Settings error: Invalid slide layout: 0 lines per textbox x 2 textboxes"
    );
}

#[test]
fn test_textbox_out_of_range_display_shouldIncludeKeyAndCount() {
    let error = GenerationError::TextboxOutOfRange {
        key: "textbox3".to_string(),
        textbox_count: 2,
    };
    assert_eq!(error.to_string(), "Textbox 'textbox3' is not available (textbox count is 2)");
}

#[test]
fn test_overwrite_error_fromJsonError_shouldBeMalformed() {
    let json_error = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let error: OverwriteError = json_error.into();
    assert!(matches!(error, OverwriteError::Malformed(_)));
}

#[test]
fn test_app_error_conversions_shouldPickMatchingVariant() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(AppError::from(io_error), AppError::File(_)));

    let generation = GenerationError::Sink("closed".to_string());
    let app_error: AppError = generation.into();
    assert_eq!(app_error.to_string(), "Generation error: Presentation sink error: closed");

    let other = AppError::from(anyhow::anyhow!("boom"));
    assert!(matches!(other, AppError::Unknown(ref message) if message == "boom"));
}

#[test]
fn test_app_error_fromContextChain_shouldClassifyByRootError() {
    let generation = anyhow::Error::from(GenerationError::TextboxOutOfRange {
        key: "textbox2".to_string(),
        textbox_count: 2,
    })
    .context("Failed to generate slides");
    assert!(matches!(
        AppError::from(generation),
        AppError::Generation(GenerationError::TextboxOutOfRange { .. })
    ));

    let settings = anyhow::Error::from(SettingsError::MissingSectionSettings {
        section: "Song".to_string(),
    })
    .context("Failed to resolve settings");
    assert!(matches!(AppError::from(settings), AppError::Settings(_)));

    let io_error = std::io::Error::new(std::io::ErrorKind::InvalidData, "not utf-8");
    let read = anyhow::Error::from(io_error).context("Failed to read file: song.txt");
    match AppError::from(read) {
        AppError::File(message) => assert_eq!(message, "Failed to read file: song.txt: not utf-8"),
        other => panic!("expected a file error, got {:?}", other),
    }
}

#[test]
fn test_generation_warning_display_withAndWithoutLine() {
    let with_line = GenerationWarning::new(WarningKind::StrayAnnotation, Some(4), "ignored");
    let without_line = GenerationWarning::new(WarningKind::UnknownPreset, None, "unknown preset");

    assert_eq!(with_line.to_string(), "line 4: ignored");
    assert_eq!(without_line.to_string(), "unknown preset");
}

#[test]
fn test_generation_warning_serialize_shouldUseCamelCase() {
    let warning = GenerationWarning::new(WarningKind::MalformedAnnotation, Some(2), "bad json");
    let json = serde_json::to_value(&warning).unwrap();

    assert_eq!(json["kind"], "malformedAnnotation");
    assert_eq!(json["lineNumber"], 2);
}
