/*!
 * Tests for the lyric lint checks
 */

use lyricdeck::validation::{lint_report, validate_lyrics, IssueSeverity};

fn checks(text: &str) -> Vec<(usize, String, IssueSeverity)> {
    validate_lyrics(text)
        .into_iter()
        .map(|issue| (issue.line_number, issue.check, issue.severity))
        .collect()
}

#[test]
fn test_validate_lyrics_withCleanText_shouldReportNothing() {
    let text = "{\"cover\":{\"main\":{\"text\":{\"bold\":false}}}}\n---- Song\n# Song ## Live\nLine one\nLine two";
    assert!(validate_lyrics(text).is_empty());
    assert_eq!(lint_report(text).summary(), "No issues found");
}

#[test]
fn test_validate_lyrics_withMalformedGlobalAnnotation_shouldWarn() {
    assert_eq!(
        checks("{bad json}\nLine"),
        vec![(1, "annotation".to_string(), IssueSeverity::Warning)]
    );
}

#[test]
fn test_validate_lyrics_withStrayAnnotation_shouldWarnAboutPlacement() {
    assert_eq!(
        checks("Line\n{\"cover\":{}}\nMore"),
        vec![(2, "annotation-placement".to_string(), IssueSeverity::Warning)]
    );
}

#[test]
fn test_validate_lyrics_withDuplicateAndEmptySections_shouldWarn() {
    let found = checks("---- Song\nA\n---- Song\nB\n----\nC\n---\nD");
    assert_eq!(
        found,
        vec![
            (3, "section-name".to_string(), IssueSeverity::Warning),
            (5, "section-name".to_string(), IssueSeverity::Warning),
            (7, "section-name".to_string(), IssueSeverity::Warning),
        ]
    );
}

#[test]
fn test_validate_lyrics_withCoverWithoutSubtitle_shouldReportInfo() {
    assert_eq!(
        checks("# Just a title\nLine"),
        vec![(1, "cover".to_string(), IssueSeverity::Info)]
    );
}

#[test]
fn test_validate_lyrics_withContentBeforeFirstSection_shouldReportOnce() {
    assert_eq!(
        checks("Intro line\nSecond intro line\n---- Song\nA"),
        vec![(1, "section-order".to_string(), IssueSeverity::Info)]
    );
    assert!(checks("No sections here\nAt all").is_empty());
}

#[test]
fn test_lint_report_shouldCountBySeverity() {
    let report = lint_report("# Title\n---- Song\n---- Song\nA");

    assert_eq!(report.warning_count, 1);
    assert_eq!(report.info_count, 1);
    assert!(report.has_warnings());
    assert_eq!(report.summary(), "1 warnings, 1 info");
}
