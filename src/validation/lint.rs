/*!
 * Line-level lyric checks.
 *
 * Covers annotation placement, section naming and cover lines. Line numbers
 * always refer to the text as written, annotations included.
 */

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::WarningKind;
use crate::lyrics::{LineKind, SUBTITLE_MARKER};
use crate::overwrite::parse_document;

/// Severity of a lint finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Generation output is as written, but worth knowing
    Info,
    /// Part of the text is ignored or likely misplaced
    Warning,
}

/// A single lint finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricIssue {
    /// 1-based line number in the original text
    pub line_number: usize,
    pub severity: IssueSeverity,
    /// Short name of the check that found the issue
    pub check: String,
    pub message: String,
}

impl LyricIssue {
    /// Create a warning issue
    pub fn warning(line_number: usize, check: &str, message: String) -> Self {
        Self {
            line_number,
            severity: IssueSeverity::Warning,
            check: check.to_string(),
            message,
        }
    }

    /// Create an info issue
    pub fn info(line_number: usize, check: &str, message: String) -> Self {
        Self {
            line_number,
            severity: IssueSeverity::Info,
            check: check.to_string(),
            message,
        }
    }
}

/// Run every check; issues come back ordered by line
pub fn validate_lyrics(text: &str) -> Vec<LyricIssue> {
    let document = parse_document(text);
    let mut issues: Vec<LyricIssue> = document
        .warnings
        .iter()
        .map(|warning| {
            let line_number = warning.line_number.unwrap_or(1);
            match warning.kind {
                WarningKind::MalformedAnnotation => {
                    LyricIssue::warning(line_number, "annotation", warning.message.clone())
                }
                _ => LyricIssue::warning(line_number, "annotation-placement", warning.message.clone()),
            }
        })
        .collect();

    let lines = document.stripped.classified();
    let has_sections = lines
        .iter()
        .any(|line| matches!(line.kind, LineKind::Section { .. }));
    let mut seen_sections: HashMap<String, usize> = HashMap::new();
    let mut inside_section = false;
    let mut reported_orphan_content = false;

    for line in &lines {
        match &line.kind {
            LineKind::Section { name } => {
                inside_section = true;
                if name.is_empty() {
                    issues.push(LyricIssue::warning(
                        line.line_number,
                        "section-name",
                        "Main section has no name; per-section settings cannot address it".to_string(),
                    ));
                } else if let Some(first) = seen_sections.get(name) {
                    issues.push(LyricIssue::warning(
                        line.line_number,
                        "section-name",
                        format!(
                            "Section '{}' already appears at line {}; both share one set of settings",
                            name, first
                        ),
                    ));
                } else {
                    seen_sections.insert(name.clone(), line.line_number);
                }
            }
            LineKind::Subsection { name } if name.is_empty() => {
                issues.push(LyricIssue::warning(
                    line.line_number,
                    "section-name",
                    "Subsection has no name".to_string(),
                ));
            }
            LineKind::Cover { title, .. } if !line.raw_text.contains(SUBTITLE_MARKER) => {
                issues.push(LyricIssue::info(
                    line.line_number,
                    "cover",
                    format!(
                        "Cover '{}' has no '{}' subtitle; the subtitle is derived from the title",
                        title, SUBTITLE_MARKER
                    ),
                ));
            }
            LineKind::Normal if has_sections && !inside_section && !reported_orphan_content => {
                reported_orphan_content = true;
                issues.push(LyricIssue::info(
                    line.line_number,
                    "section-order",
                    "Content before the first main section uses the global settings".to_string(),
                ));
            }
            _ => {}
        }
    }

    issues.sort_by_key(|issue| issue.line_number);
    debug!("Lint found {} issues", issues.len());
    issues
}

/// Aggregated lint result
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    pub issues: Vec<LyricIssue>,
    pub warning_count: usize,
    pub info_count: usize,
}

impl LintReport {
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            return "No issues found".to_string();
        }
        format!("{} warnings, {} info", self.warning_count, self.info_count)
    }
}

/// Lint a text and count findings by severity
pub fn lint_report(text: &str) -> LintReport {
    let issues = validate_lyrics(text);
    let warning_count = issues
        .iter()
        .filter(|issue| issue.severity == IssueSeverity::Warning)
        .count();
    let info_count = issues.len() - warning_count;
    LintReport {
        issues,
        warning_count,
        info_count,
    }
}
