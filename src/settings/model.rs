/*!
 * Typed view of fully resolved settings.
 *
 * These structs are produced by the resolver after layering and clamping, so
 * every field is present and within range.
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Effective settings for one scope (global or a single section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    pub general: GeneralSettings,
    pub file: FileSettings,
    pub cover: CoverSettings,
    pub content: ContentSettings,
}

/// Where the secondary text track comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryTextSource {
    None,
    /// Lines of a parallel translation text, matched by position
    Translation,
    /// Transliteration of the primary line
    #[default]
    Transliteration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    pub use_different_setting_for_each_section: bool,
    pub remove_identical_words: bool,
    pub secondary_text: SecondaryTextSource,
    pub auto_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSettings {
    pub file_name: String,
    pub title: String,
    pub author: String,
    pub layout: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverSettings {
    pub background: BackgroundSettings,
    pub position: TextboxPosition,
    pub main: PrimaryTrack,
    pub secondary: SecondaryTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSettings {
    pub background: BackgroundSettings,
    pub textbox: TextboxLayout,
    /// Textbox geometry keyed `textbox1` … `textboxN`
    pub textboxes: BTreeMap<String, TextboxPosition>,
    pub main: PrimaryTrack,
    pub secondary: SecondaryTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSettings {
    pub color: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Lines per textbox and textboxes per slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextboxLayout {
    pub lines_per_textbox: usize,
    pub textbox_count: usize,
}

impl TextboxLayout {
    /// Number of content lines one slide holds
    pub fn capacity(&self) -> usize {
        self.lines_per_textbox * self.textbox_count
    }
}

/// Position and size of a text region, in percent of the slide
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextboxPosition {
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Style of the primary text track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryTrack {
    pub text: TextStyle,
}

/// Style of the secondary (translation / transliteration) text track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryTrack {
    pub enabled: bool,
    pub text: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_face: String,
    pub font_size: f64,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub align: String,
    pub line_spacing: f64,
    pub shadow: ShadowStyle,
    pub glow: GlowStyle,
    pub outline: OutlineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    pub enabled: bool,
    pub color: String,
    pub blur: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlowStyle {
    pub enabled: bool,
    pub color: String,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineStyle {
    pub enabled: bool,
    pub color: String,
    pub width: f64,
}
