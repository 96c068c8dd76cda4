/*!
 * Common test utilities for the lyricdeck test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use serde_json::json;
use tempfile::TempDir;
use lyricdeck::generator::{GenerationOutput, SlideGenerator};
use lyricdeck::settings::{PresetLibrary, SettingsRegistry, SettingsTree};
use lyricdeck::slides::LineToSlideMapper;

/// Two songs split into main sections, used by several scenarios
pub const TWO_SONGS: &str = "---- Song One\nLine A\nLine B\nLine C\n---- Song Two\nLine D";

/// Routes `log` output through the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample lyric file for testing
pub fn create_test_lyrics(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "# Amazing Grace ## Hymn
---- Amazing Grace
--- Verse
Amazing grace, how sweet the sound
That saved a wretch like me
I once was lost, but now am found
Was blind, but now I see
***
--- Verse
'Twas grace that taught my heart to fear
And grace my fears relieved";
    create_test_file(dir, filename, content)
}

/// Settings tree with the given content layout
pub fn layout(lines_per_textbox: usize, textbox_count: usize) -> SettingsTree {
    let mut tree = SettingsTree::default();
    tree.set("content.textbox.linesPerTextbox", json!(lines_per_textbox));
    tree.set("content.textbox.textboxCount", json!(textbox_count));
    tree
}

/// Run one generation pass with the standard registry and built-in presets
pub fn generate(text: &str, settings: &SettingsTree) -> (GenerationOutput, LineToSlideMapper) {
    let registry = SettingsRegistry::standard();
    let presets = PresetLibrary::builtin();
    let mut mapper = LineToSlideMapper::new();
    let output = SlideGenerator::new(&registry, &presets)
        .generate(text, settings, None, &mut mapper)
        .expect("generation should succeed");
    (output, mapper)
}

/// 1-based line number of the first line equal to `needle`
pub fn line_of(text: &str, needle: &str) -> usize {
    text.split('\n')
        .position(|line| line == needle)
        .map(|index| index + 1)
        .expect("line should exist")
}
