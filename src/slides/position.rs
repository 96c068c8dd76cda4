/*!
 * Slide position calculation.
 *
 * Content lines are placed by a running virtual index: `index / capacity`
 * selects the slide, `index % capacity` the slot within it. Lines that take
 * no slot (markers, metadata) or force a break (sections, covers, empty and
 * fill slides) are compensated by weight accumulators so that the modulo
 * stays aligned with the slides actually materialized.
 *
 * The cursor is a plain `Copy` value; every transition returns a new cursor,
 * which keeps the algorithm testable line by line.
 */

use crate::errors::SettingsError;
use crate::lyrics::LineType;
use crate::settings::TextboxLayout;

/// Correction counters, one per kind of line that does not map 1:1 to a slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Weights {
    pub cover: i64,
    pub section: i64,
    pub empty: i64,
    pub fill: i64,
    /// Metadata, blank and stray annotation lines
    pub skipped: i64,
}

impl Weights {
    pub fn total(&self) -> i64 {
        self.cover + self.section + self.empty + self.fill + self.skipped
    }
}

/// Where a line lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPosition {
    pub virtual_index: i64,
    /// Slot within the slide, `0..capacity`
    pub index_in_slide: usize,
    /// Slots left on the slide including this one
    pub remaining: usize,
    /// 1-based textbox on the slide
    pub textbox_number: usize,
    /// Row within the textbox, `0..lines_per_textbox`
    pub row: usize,
}

impl SlotPosition {
    /// Whether this slot is the first of a slide
    pub fn starts_slide(&self) -> bool {
        self.index_in_slide == 0
    }

    /// Whether this slot is the first row of its textbox
    pub fn starts_textbox(&self) -> bool {
        self.row == 0
    }
}

/// Running state of the position algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionCursor {
    layout: TextboxLayout,
    /// Virtual index of the first slot of the current main section
    base: i64,
    /// Ordinal of the first line counted from `base`
    origin: i64,
    weights: Weights,
    seen_section: bool,
}

fn checked_layout(layout: TextboxLayout) -> Result<TextboxLayout, SettingsError> {
    if layout.capacity() == 0 {
        return Err(SettingsError::InvalidLayout {
            lines_per_textbox: layout.lines_per_textbox,
            textbox_count: layout.textbox_count,
        });
    }
    Ok(layout)
}

impl PositionCursor {
    /// Cursor at the start of a document
    pub fn new(layout: TextboxLayout) -> Result<Self, SettingsError> {
        Ok(Self {
            layout: checked_layout(layout)?,
            base: 0,
            origin: 0,
            weights: Weights::default(),
            seen_section: false,
        })
    }

    pub fn layout(&self) -> TextboxLayout {
        self.layout
    }

    pub fn capacity(&self) -> usize {
        self.layout.capacity()
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Virtual index of the line at `ordinal` (position in the stripped text)
    pub fn current_index(&self, ordinal: usize) -> i64 {
        self.base + (ordinal as i64 - self.origin) + self.weights.total()
    }

    /// Slot for the line at `ordinal`
    pub fn locate(&self, ordinal: usize) -> SlotPosition {
        let capacity = self.capacity() as i64;
        let virtual_index = self.current_index(ordinal);
        let index_in_slide = virtual_index.rem_euclid(capacity) as usize;
        SlotPosition {
            virtual_index,
            index_in_slide,
            remaining: self.capacity() - index_in_slide,
            textbox_number: index_in_slide / self.layout.lines_per_textbox + 1,
            row: index_in_slide % self.layout.lines_per_textbox,
        }
    }

    /// Realign at a main section marker.
    ///
    /// The running counter is not trusted across sections because their
    /// capacities may differ: the next line starts at the first slot after
    /// the slides that already exist, counted with the new capacity.
    pub fn enter_section(
        self,
        ordinal: usize,
        slide_count: usize,
        layout: TextboxLayout,
    ) -> Result<Self, SettingsError> {
        let layout = checked_layout(layout)?;
        Ok(Self {
            layout,
            base: (slide_count * layout.capacity()) as i64,
            origin: ordinal as i64 + 1,
            weights: Weights::default(),
            seen_section: true,
        })
    }

    /// Account for a line that does not occupy a regular content slot.
    ///
    /// Each kind pushes the next line to the following slide boundary by
    /// adding `remaining - 1`. The first section object of a document that
    /// has no slides yet only removes its own line (`-1`). Empty slides
    /// consume one more full slide. Lines that are never rendered take no
    /// slot at all.
    pub fn absorb(self, ordinal: usize, line_type: LineType, slide_count: usize) -> Self {
        let remaining = self.locate(ordinal).remaining as i64;
        let capacity = self.capacity() as i64;
        let mut next = self;

        match line_type {
            LineType::Section | LineType::Subsection => {
                if !self.seen_section && slide_count == 0 {
                    next.weights.section -= 1;
                } else {
                    next.weights.section += remaining - 1;
                }
                next.seen_section = true;
            }
            LineType::Cover => next.weights.cover += remaining - 1,
            LineType::EmptySlide => next.weights.empty += remaining - 1 + capacity,
            LineType::FillSlide => next.weights.fill += remaining - 1,
            LineType::Metadata | LineType::Overwrite | LineType::Blank => next.weights.skipped -= 1,
            LineType::Normal => {}
        }

        next
    }
}
