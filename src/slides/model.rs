/*!
 * Slide deck model produced by the assembler.
 *
 * These types are JSON-serializable so the UI layer and the presentation
 * file boundary can consume them directly.
 */

use serde::{Deserialize, Serialize};

use crate::lyrics::SectionInfo;
use crate::settings::{TextStyle, TextboxPosition};

/// What a slide was generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideKind {
    /// Title slide from a `#` line
    Cover,
    /// Lyric lines packed into textboxes
    Content,
    /// Background-only slide from `***`
    Empty,
}

/// A background definition shared by all slides referencing it by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundMaster {
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One positioned text region on a slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextObject {
    /// `textbox1` … `textboxN`, or `cover`
    pub textbox_key: String,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_style: Option<TextStyle>,
    pub primary: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<String>,
}

impl TextObject {
    pub fn new(
        textbox_key: &str,
        position: &TextboxPosition,
        style: TextStyle,
        secondary_style: Option<TextStyle>,
    ) -> Self {
        Self {
            textbox_key: textbox_key.to_string(),
            position_x: position.position_x,
            position_y: position.position_y,
            width: position.width,
            height: position.height,
            style,
            secondary_style,
            primary: Vec::new(),
            secondary: Vec::new(),
        }
    }

    /// Append a primary line and its secondary counterpart.
    ///
    /// Secondary lines stay aligned with primary lines by index, so an empty
    /// string is stored when the secondary track is on but has no text.
    pub fn push_line(&mut self, primary: &str, secondary: Option<String>) {
        self.primary.push(primary.to_string());
        if self.secondary_style.is_some() {
            self.secondary.push(secondary.unwrap_or_default());
        }
    }

    /// Whether any secondary line carries text
    pub fn has_secondary_text(&self) -> bool {
        self.secondary.iter().any(|line| !line.is_empty())
    }
}

/// A single generated slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDescriptor {
    /// 1-based position in the deck
    pub index: usize,
    pub kind: SlideKind,
    /// Display name of the section the slide belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
    /// Name of the background master
    pub background: String,
    pub text_objects: Vec<TextObject>,
}

impl SlideDescriptor {
    /// Text object for a textbox key
    pub fn text_object(&self, key: &str) -> Option<&TextObject> {
        self.text_objects.iter().find(|text| text.textbox_key == key)
    }

    /// All primary lines on the slide in textbox order
    pub fn primary_lines(&self) -> Vec<&str> {
        self.text_objects
            .iter()
            .flat_map(|text| text.primary.iter().map(String::as_str))
            .collect()
    }
}

/// Ordered slides plus everything needed to render them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDeck {
    pub slides: Vec<SlideDescriptor>,
    pub masters: Vec<BackgroundMaster>,
    pub sections: Vec<SectionInfo>,
}

impl SlideDeck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide by 1-based index
    pub fn slide(&self, index: usize) -> Option<&SlideDescriptor> {
        index.checked_sub(1).and_then(|i| self.slides.get(i))
    }

    pub fn master(&self, name: &str) -> Option<&BackgroundMaster> {
        self.masters.iter().find(|master| master.name == name)
    }
}
