/*!
 * Section numbering and range tracking.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @const: Leading "2", "2.", "2.1" numbering on a section name
static NUMBER_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)(?:\.(\d+))?\.?(?:\s|$)").expect("Invalid section number regex")
});

/// Line range of one section or subsection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInfo {
    /// Numbered name shown to the user, e.g. `2. Verse`
    pub section_name: String,
    /// Name as written after the marker
    pub raw_name: String,
    /// Number part of the display name, e.g. `2` or `2.1`
    pub display_number: String,
    pub is_subsection: bool,
    /// Line number of the marker
    pub start_line: usize,
    /// Last line number belonging to the section
    pub end_line: usize,
}

/// Running display numbers for sections and subsections
#[derive(Debug, Clone, Default)]
pub struct SectionNumbering {
    main: u32,
    sub: u32,
    seen_main: bool,
}

impl SectionNumbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number a main section; returns (display number, display name)
    pub fn number_section(&mut self, name: &str) -> (String, String) {
        self.seen_main = true;
        self.sub = 0;

        if let Some(caps) = NUMBER_PREFIX_REGEX.captures(name) {
            self.main = caps[1].parse().unwrap_or(self.main + 1);
            return (self.main.to_string(), name.to_string());
        }

        self.main += 1;
        (self.main.to_string(), join_number(&format!("{}.", self.main), name))
    }

    /// Number a subsection; returns (display number, display name)
    pub fn number_subsection(&mut self, name: &str) -> (String, String) {
        if let Some(caps) = NUMBER_PREFIX_REGEX.captures(name) {
            match caps.get(2) {
                Some(sub) => {
                    self.main = caps[1].parse().unwrap_or(self.main);
                    self.sub = sub.as_str().parse().unwrap_or(self.sub + 1);
                    self.seen_main = true;
                }
                None => self.sub = caps[1].parse().unwrap_or(self.sub + 1),
            }
            return (self.display_sub_number(), name.to_string());
        }

        self.sub += 1;
        let number = self.display_sub_number();
        let prefix = if self.seen_main {
            number.clone()
        } else {
            format!("{}.", number)
        };
        (number, join_number(&prefix, name))
    }

    fn display_sub_number(&self) -> String {
        if self.seen_main {
            format!("{}.{}", self.main, self.sub)
        } else {
            self.sub.to_string()
        }
    }
}

fn join_number(prefix: &str, name: &str) -> String {
    if name.is_empty() {
        prefix.to_string()
    } else {
        format!("{} {}", prefix, name)
    }
}

/// Opens and closes section ranges as markers are encountered
#[derive(Debug, Default)]
pub struct SectionTracker {
    numbering: SectionNumbering,
    open: Option<SectionInfo>,
    closed: Vec<SectionInfo>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the open range (if any) and open a new one at `line_number`
    pub fn open(&mut self, line_number: usize, raw_name: &str, is_subsection: bool) -> &SectionInfo {
        self.close(line_number.saturating_sub(1));

        let (display_number, section_name) = if is_subsection {
            self.numbering.number_subsection(raw_name)
        } else {
            self.numbering.number_section(raw_name)
        };

        self.open.insert(SectionInfo {
            section_name,
            raw_name: raw_name.to_string(),
            display_number,
            is_subsection,
            start_line: line_number,
            end_line: line_number,
        })
    }

    /// The range currently open
    pub fn current(&self) -> Option<&SectionInfo> {
        self.open.as_ref()
    }

    fn close(&mut self, end_line: usize) {
        if let Some(mut section) = self.open.take() {
            section.end_line = end_line.max(section.start_line);
            self.closed.push(section);
        }
    }

    /// Close the final range at the last line of the document
    pub fn finish(mut self, last_line: usize) -> Vec<SectionInfo> {
        self.close(last_line);
        self.closed
    }
}
