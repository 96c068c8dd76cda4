/*!
 * Lyric text structure: line classification and section ranges.
 */

pub mod classifier;
pub mod sections;

pub use classifier::{
    classify, classify_lines, is_overwrite_annotation, line_type, LineKind, LineType, LyricLine, SECTION_MARKER,
    SUBSECTION_MARKER, SUBTITLE_MARKER,
};
pub use sections::{SectionInfo, SectionNumbering, SectionTracker};
