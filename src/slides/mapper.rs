/*!
 * Line-to-slide mapping.
 *
 * Records which slide every source line ended up on so an editor can
 * scroll-sync between text and preview. The mapper belongs to one editing
 * session and is rebuilt from scratch on every generation pass.
 */

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::lyrics::LineType;

/// One line → slide association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineToSlideMapping {
    /// 1-based source line number
    pub line_number: usize,
    /// 1-based slide index
    pub slide_index: usize,
    pub line_type: LineType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
}

/// Index of line ↔ slide associations for the last generation pass
#[derive(Debug, Clone, Default)]
pub struct LineToSlideMapper {
    mappings: Vec<LineToSlideMapping>,
    /// Lines packed into another line's textbox
    skipped: BTreeSet<usize>,
}

impl LineToSlideMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; must run before every generation pass
    pub fn clear(&mut self) {
        self.mappings.clear();
        self.skipped.clear();
    }

    pub fn add_mapping(
        &mut self,
        line_number: usize,
        slide_index: usize,
        line_type: LineType,
        section_name: Option<&str>,
    ) {
        self.mappings.push(LineToSlideMapping {
            line_number,
            slide_index,
            line_type,
            section_name: section_name.map(str::to_string),
        });
    }

    /// Record lines that were pulled into a textbox opened by an earlier line
    pub fn add_skipped_lines(&mut self, lines: &[usize]) {
        self.skipped.extend(lines.iter().copied());
    }

    pub fn mappings(&self) -> &[LineToSlideMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Whether a line was recorded as packed into another line's textbox
    pub fn is_skipped(&self, line_number: usize) -> bool {
        self.skipped.contains(&line_number)
    }

    fn direct(&self, line_number: usize) -> Option<&LineToSlideMapping> {
        self.mappings.iter().find(|m| m.line_number == line_number)
    }

    fn preceding(&self, line_number: usize) -> Option<&LineToSlideMapping> {
        self.mappings
            .iter()
            .filter(|m| m.line_number <= line_number)
            .max_by_key(|m| m.line_number)
    }

    /// Slide a line was placed on.
    ///
    /// Skipped lines resolve to the line that opened their textbox, which is
    /// the nearest direct mapping before them.
    pub fn slide_index_for_line(&self, line_number: usize) -> Option<usize> {
        if let Some(mapping) = self.direct(line_number) {
            return Some(mapping.slide_index);
        }
        if self.is_skipped(line_number) {
            return self.preceding(line_number).map(|m| m.slide_index);
        }
        None
    }

    /// All lines placed on a slide, skipped ones included, in line order
    pub fn lines_for_slide(&self, slide_index: usize) -> Vec<usize> {
        let mut lines: BTreeSet<usize> = self
            .mappings
            .iter()
            .filter(|m| m.slide_index == slide_index)
            .map(|m| m.line_number)
            .collect();

        for &line in &self.skipped {
            if self.slide_index_for_line(line) == Some(slide_index) {
                lines.insert(line);
            }
        }

        lines.into_iter().collect()
    }

    /// Best-effort slide for any line, mapped or not.
    ///
    /// Uses the nearest mapping at or before the line, else the first slide.
    /// Returns `None` only when nothing has been mapped.
    pub fn closest_slide_for_line(&self, line_number: usize) -> Option<usize> {
        self.preceding(line_number)
            .or_else(|| self.mappings.iter().min_by_key(|m| m.slide_index))
            .map(|m| m.slide_index)
    }
}
