/*!
 * Validation of lyric text before generation.
 *
 * Findings never block generation; they point at text that will not render
 * the way its author probably expects.
 *
 * - `lint`: line-level checks and the aggregated report
 */

pub mod lint;

// Re-export main types
pub use lint::{lint_report, validate_lyrics, IssueSeverity, LintReport, LyricIssue};
