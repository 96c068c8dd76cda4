/*!
 * Line classification.
 *
 * Every lyric line gets exactly one structural role. Markers share prefixes
 * (`----` vs `---`, `***` vs `**`), so the rules live in one ordered table
 * and the first matching predicate wins.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @const: Inline settings overwrite annotation
static OVERWRITE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{.*\}$").expect("Invalid overwrite annotation regex"));

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

pub const SECTION_MARKER: &str = "----";
pub const SUBSECTION_MARKER: &str = "---";
pub const COVER_MARKER: &str = "#";
pub const SUBTITLE_MARKER: &str = "##";
pub const EMPTY_SLIDE_MARKER: &str = "***";
pub const FILL_SLIDE_MARKER: &str = "**";
pub const METADATA_MARKER: &str = "@";

/// Structural role of a line, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineType {
    Section,
    Subsection,
    Cover,
    EmptySlide,
    FillSlide,
    Metadata,
    Overwrite,
    Blank,
    Normal,
}

impl LineType {
    /// Whether lines of this type end up as text on a slide
    pub fn is_content(&self) -> bool {
        matches!(self, Self::Normal | Self::Cover)
    }
}

/// Structural role of a line with the data extracted from its marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `---- name`
    Section { name: String },
    /// `--- name`
    Subsection { name: String },
    /// `# title ## subtitle`
    Cover { title: String, subtitle: Option<String> },
    /// `***`
    EmptySlide,
    /// `**`
    FillSlide,
    /// `@…`
    Metadata { content: String },
    /// `{…}`
    Overwrite { json: String },
    Blank,
    Normal,
}

impl LineKind {
    pub fn line_type(&self) -> LineType {
        match self {
            Self::Section { .. } => LineType::Section,
            Self::Subsection { .. } => LineType::Subsection,
            Self::Cover { .. } => LineType::Cover,
            Self::EmptySlide => LineType::EmptySlide,
            Self::FillSlide => LineType::FillSlide,
            Self::Metadata { .. } => LineType::Metadata,
            Self::Overwrite { .. } => LineType::Overwrite,
            Self::Blank => LineType::Blank,
            Self::Normal => LineType::Normal,
        }
    }
}

/// Marker rules in priority order
static CLASSIFICATION_TABLE: &[(LineType, fn(&str) -> bool)] = &[
    (LineType::Section, |line| line.starts_with(SECTION_MARKER)),
    (LineType::Subsection, |line| line.starts_with(SUBSECTION_MARKER)),
    (LineType::Cover, |line| line.starts_with(COVER_MARKER)),
    (LineType::EmptySlide, |line| line == EMPTY_SLIDE_MARKER),
    (LineType::FillSlide, |line| line == FILL_SLIDE_MARKER),
    (LineType::Metadata, |line| line.starts_with(METADATA_MARKER)),
    (LineType::Overwrite, is_overwrite_annotation),
    (LineType::Blank, str::is_empty),
];

/// Whether a trimmed line is an inline settings overwrite annotation
pub fn is_overwrite_annotation(line: &str) -> bool {
    OVERWRITE_REGEX.is_match(line)
}

/// Role of a line, ignoring surrounding whitespace
pub fn line_type(line: &str) -> LineType {
    let trimmed = line.trim();
    CLASSIFICATION_TABLE
        .iter()
        .find(|(_, matches)| matches(trimmed))
        .map(|(line_type, _)| *line_type)
        .unwrap_or(LineType::Normal)
}

/// Classify a line and extract its marker payload
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    match line_type(trimmed) {
        LineType::Section => LineKind::Section {
            name: trimmed[SECTION_MARKER.len()..].trim().to_string(),
        },
        LineType::Subsection => LineKind::Subsection {
            name: trimmed[SUBSECTION_MARKER.len()..].trim().to_string(),
        },
        LineType::Cover => {
            let (title, subtitle) = parse_cover(trimmed);
            LineKind::Cover { title, subtitle }
        }
        LineType::EmptySlide => LineKind::EmptySlide,
        LineType::FillSlide => LineKind::FillSlide,
        LineType::Metadata => LineKind::Metadata {
            content: trimmed[METADATA_MARKER.len()..].trim().to_string(),
        },
        LineType::Overwrite => LineKind::Overwrite {
            json: trimmed.to_string(),
        },
        LineType::Blank => LineKind::Blank,
        LineType::Normal => LineKind::Normal,
    }
}

/// Split a cover line into title and optional subtitle.
///
/// The title is the text between the leading `#` and the next `#`, the
/// subtitle whatever follows `##`.
pub fn parse_cover(line: &str) -> (String, Option<String>) {
    let body = line.trim().strip_prefix(COVER_MARKER).unwrap_or(line);
    let title = body.split('#').next().unwrap_or_default().trim().to_string();

    let subtitle = line
        .find(SUBTITLE_MARKER)
        .map(|pos| line[pos + SUBTITLE_MARKER.len()..].trim_start_matches('#').trim().to_string())
        .filter(|subtitle| !subtitle.is_empty());

    (title, subtitle)
}

/// A classified lyric line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    /// 1-based line number in the original text
    pub line_number: usize,
    pub raw_text: String,
    pub kind: LineKind,
    /// Trimmed text with runs of whitespace collapsed
    pub normalized_text: String,
}

impl LyricLine {
    pub fn new(line_number: usize, raw_text: &str) -> Self {
        let kind = classify(raw_text);
        let normalized_text = WHITESPACE_REGEX.replace_all(raw_text.trim(), " ").into_owned();
        Self {
            line_number,
            raw_text: raw_text.to_string(),
            kind,
            normalized_text,
        }
    }

    pub fn line_type(&self) -> LineType {
        self.kind.line_type()
    }
}

/// Classify every line of a text; line numbers start at 1
pub fn classify_lines(text: &str) -> Vec<LyricLine> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .enumerate()
        .map(|(index, line)| LyricLine::new(index + 1, line))
        .collect()
}
