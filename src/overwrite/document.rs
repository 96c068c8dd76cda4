/*!
 * Annotation placement inside lyric text.
 *
 * A global annotation sits on the first line of the document; a per-section
 * annotation sits on the line directly after a `----` marker. Annotation
 * lines anywhere else are stray: they are reported and ignored. Every
 * annotation line is removed before the text reaches the assembler.
 */

use log::warn;

use crate::errors::{GenerationWarning, WarningKind};
use crate::lyrics::{classify, is_overwrite_annotation, LineKind, LyricLine};

use super::annotation::SettingsOverwrite;

/// Text with annotation lines removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrippedText {
    pub text: String,
    /// Original 1-based line number of every remaining line
    pub origins: Vec<usize>,
}

impl StrippedText {
    /// Classify the remaining lines, numbered as in the original text
    pub fn classified(&self) -> Vec<LyricLine> {
        if self.text.is_empty() && self.origins.is_empty() {
            return Vec::new();
        }
        self.text
            .split('\n')
            .zip(&self.origins)
            .map(|(line, &origin)| LyricLine::new(origin, line))
            .collect()
    }
}

/// Annotation anchored after a main section marker
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOverwrite {
    /// Raw section name as written after the marker
    pub section: String,
    /// Line of the annotation
    pub line_number: usize,
    pub overwrite: SettingsOverwrite,
}

/// Everything the annotation pass found in one text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub stripped: StrippedText,
    pub global: Option<SettingsOverwrite>,
    pub sections: Vec<SectionOverwrite>,
    pub warnings: Vec<GenerationWarning>,
}

enum Anchor {
    Global,
    Section(String),
}

fn decode(line: &str, line_number: usize, warnings: &mut Vec<GenerationWarning>) -> Option<SettingsOverwrite> {
    match SettingsOverwrite::from_line(line) {
        Ok(overwrite) => Some(overwrite),
        Err(e) => {
            warnings.push(GenerationWarning::new(
                WarningKind::MalformedAnnotation,
                Some(line_number),
                e.to_string(),
            ));
            None
        }
    }
}

/// Extract the anchored annotations and strip every annotation line
pub fn parse_document(text: &str) -> ParsedDocument {
    let mut document = ParsedDocument::default();
    if text.is_empty() {
        return document;
    }

    let mut kept: Vec<&str> = Vec::new();
    // Anchor the next line may attach to
    let mut anchor = Some(Anchor::Global);
    let mut after_subsection = false;
    let mut removed = 0;

    for (index, line) in text.split('\n').enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();

        if !is_overwrite_annotation(trimmed) {
            match classify(trimmed) {
                LineKind::Section { name } => {
                    anchor = Some(Anchor::Section(name));
                    after_subsection = false;
                }
                LineKind::Subsection { .. } => {
                    anchor = None;
                    after_subsection = true;
                }
                _ => {
                    anchor = None;
                    after_subsection = false;
                }
            }
            kept.push(line);
            document.stripped.origins.push(line_number);
            continue;
        }

        removed += 1;
        match anchor.take() {
            Some(Anchor::Global) => {
                document.global = decode(trimmed, line_number, &mut document.warnings);
            }
            Some(Anchor::Section(section)) => {
                if let Some(overwrite) = decode(trimmed, line_number, &mut document.warnings) {
                    document.sections.push(SectionOverwrite {
                        section,
                        line_number,
                        overwrite,
                    });
                }
            }
            None => {
                let message = if after_subsection {
                    "Settings annotation after a subsection is ignored; move it after the main section marker"
                } else {
                    "Settings annotation away from the document start or a section marker is ignored"
                };
                document.warnings.push(GenerationWarning::new(
                    WarningKind::StrayAnnotation,
                    Some(line_number),
                    message,
                ));
            }
        }
        after_subsection = false;
    }

    for warning in &document.warnings {
        warn!("{}", warning);
    }

    document.stripped.text = if removed == 0 { text.to_string() } else { kept.join("\n") };
    document
}

/// Remove every annotation line
pub fn strip_overwrites(text: &str) -> StrippedText {
    parse_document(text).stripped
}

fn annotation_run(lines: &[&str], start: usize) -> usize {
    lines[start..]
        .iter()
        .take_while(|line| is_overwrite_annotation(line.trim()))
        .count()
}

fn encoded(overwrite: Option<&SettingsOverwrite>) -> Option<String> {
    overwrite.filter(|overwrite| !overwrite.is_empty()).map(SettingsOverwrite::to_line)
}

/// Replace the annotation at the start of the document.
///
/// An empty or absent overwrite removes the annotation.
pub fn upsert_global(text: &str, overwrite: Option<&SettingsOverwrite>) -> String {
    let lines: Vec<&str> = if text.is_empty() { Vec::new() } else { text.split('\n').collect() };
    let skip = annotation_run(&lines, 0);
    let encoded = encoded(overwrite);

    let mut result: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    if let Some(line) = &encoded {
        result.push(line);
    }
    result.extend(&lines[skip..]);
    result.join("\n")
}

/// Replace the annotation after every `----` marker named `section`.
///
/// An empty or absent overwrite removes the annotation.
pub fn upsert_section(text: &str, section: &str, overwrite: Option<&SettingsOverwrite>) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lines: Vec<&str> = text.split('\n').collect();
    let encoded = encoded(overwrite);

    let mut result: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        result.push(line);
        index += 1;

        let is_target = matches!(classify(line), LineKind::Section { ref name } if name == section);
        if is_target {
            index += annotation_run(&lines, index);
            if let Some(encoded) = &encoded {
                result.push(encoded);
            }
        }
    }
    result.join("\n")
}
