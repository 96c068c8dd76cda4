/*!
 * Slide and textbox assembly.
 *
 * Walks the classified lines once, asks the position cursor where each line
 * lands, and materializes slides, text objects, background masters and
 * section ranges. Every placed line is recorded in the line-to-slide mapper.
 */

use log::{debug, warn};

use crate::errors::GenerationError;
use crate::lyrics::{LineKind, LineType, LyricLine, SectionTracker};
use crate::settings::{ScopedSettings, SecondaryTextSource, SettingsResolver, SettingsTree};
use crate::transliteration::{needs_transliteration, remove_identical_words, transliterate};

use super::mapper::LineToSlideMapper;
use super::model::{BackgroundMaster, SlideDeck, SlideDescriptor, SlideKind, TextObject};
use super::position::PositionCursor;

/// Key of the text object on cover slides
pub const COVER_TEXTBOX_KEY: &str = "cover";

/// Builds a slide deck from classified lines
pub struct Assembler<'a> {
    resolver: &'a SettingsResolver<'a>,
    settings: &'a SettingsTree,
    /// Secondary lines aligned with the classified lines by position
    translation: Option<&'a [String]>,
}

/// Mutable state of one assembly pass
struct Pass {
    slides: Vec<SlideDescriptor>,
    masters: Vec<BackgroundMaster>,
    tracker: SectionTracker,
    cursor: PositionCursor,
    scoped: ScopedSettings,
    /// Display name of the innermost open section
    section_name: Option<String>,
    /// Whether the last slide takes content lines of the current section
    content_slide_open: bool,
    /// Section markers waiting for the first slide of their section,
    /// with the display name each marker opened
    pending_markers: Vec<(usize, LineType, String)>,
}

impl Pass {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Background master for a slide kind under the current settings scope
    fn master_for(&mut self, kind: SlideKind) -> String {
        let (suffix, background) = match kind {
            SlideKind::Cover => ("cover", &self.scoped.settings.cover.background),
            SlideKind::Content | SlideKind::Empty => ("content", &self.scoped.settings.content.background),
        };
        let name = format!("{}/{}", self.scoped.scope.key(), suffix);

        if !self.masters.iter().any(|master| master.name == name) {
            self.masters.push(BackgroundMaster {
                name: name.clone(),
                color: background.color.clone(),
                image: background.image.clone(),
            });
        }

        name
    }

    /// Append a new slide and map any section markers waiting for it
    fn open_slide(&mut self, kind: SlideKind, mapper: &mut LineToSlideMapper) -> usize {
        let index = self.slide_count() + 1;
        let background = self.master_for(kind);

        self.slides.push(SlideDescriptor {
            index,
            kind,
            section_name: self.section_name.clone(),
            background,
            text_objects: Vec::new(),
        });

        for (line_number, line_type, section_name) in self.pending_markers.drain(..) {
            mapper.add_mapping(line_number, index, line_type, Some(&section_name));
        }

        self.content_slide_open = kind == SlideKind::Content;
        index
    }
}

impl<'a> Assembler<'a> {
    pub fn new(resolver: &'a SettingsResolver<'a>, settings: &'a SettingsTree) -> Self {
        Self {
            resolver,
            settings,
            translation: None,
        }
    }

    /// Use the lines of a parallel translation as the secondary track
    pub fn with_translation(mut self, translation: &'a [String]) -> Self {
        self.translation = Some(translation);
        self
    }

    /// Assemble the deck for `lines`, recording placements in `mapper`.
    ///
    /// The mapper is not cleared here; the generator does that before the pass.
    pub fn assemble(&self, lines: &[LyricLine], mapper: &mut LineToSlideMapper) -> Result<SlideDeck, GenerationError> {
        let scoped = self.resolver.resolve(self.settings, None)?;
        let mut pass = Pass {
            slides: Vec::new(),
            masters: Vec::new(),
            tracker: SectionTracker::new(),
            cursor: PositionCursor::new(scoped.settings.content.textbox)?,
            scoped,
            section_name: None,
            content_slide_open: false,
            pending_markers: Vec::new(),
        };

        let mut consumed = vec![false; lines.len()];

        for (ordinal, line) in lines.iter().enumerate() {
            if consumed[ordinal] {
                continue;
            }

            match &line.kind {
                LineKind::Section { name } => {
                    let display = pass.tracker.open(line.line_number, name, false).section_name.clone();
                    pass.section_name = Some(display.clone());
                    pass.scoped = self.resolver.resolve(self.settings, Some(name))?;
                    pass.cursor = pass.cursor.enter_section(
                        ordinal,
                        pass.slide_count(),
                        pass.scoped.settings.content.textbox,
                    )?;
                    pass.content_slide_open = false;
                    pass.pending_markers.push((line.line_number, LineType::Section, display));
                    debug!("Section '{}' starts at line {}", name, line.line_number);
                }
                LineKind::Subsection { name } => {
                    let display = pass.tracker.open(line.line_number, name, true).section_name.clone();
                    pass.section_name = Some(display.clone());
                    pass.cursor = pass.cursor.absorb(ordinal, LineType::Subsection, pass.slide_count());
                    pass.content_slide_open = false;
                    pass.pending_markers.push((line.line_number, LineType::Subsection, display));
                }
                LineKind::Cover { title, subtitle } => {
                    self.place_cover(&mut pass, line, title, subtitle.as_deref(), mapper);
                    pass.cursor = pass.cursor.absorb(ordinal, LineType::Cover, pass.slide_count());
                }
                LineKind::EmptySlide => {
                    let index = pass.open_slide(SlideKind::Empty, mapper);
                    pass.content_slide_open = false;
                    mapper.add_mapping(line.line_number, index, LineType::EmptySlide, pass.section_name.as_deref());
                    pass.cursor = pass.cursor.absorb(ordinal, LineType::EmptySlide, pass.slide_count());
                }
                LineKind::FillSlide => {
                    pass.content_slide_open = false;
                    pass.cursor = pass.cursor.absorb(ordinal, LineType::FillSlide, pass.slide_count());
                }
                LineKind::Overwrite { .. } => {
                    warn!("Ignoring settings annotation at line {} outside of an anchor", line.line_number);
                    pass.cursor = pass.cursor.absorb(ordinal, LineType::Overwrite, pass.slide_count());
                }
                LineKind::Metadata { .. } | LineKind::Blank => {
                    pass.cursor = pass.cursor.absorb(ordinal, line.line_type(), pass.slide_count());
                }
                LineKind::Normal => {
                    self.place_content(&mut pass, lines, ordinal, &mut consumed, mapper)?;
                }
            }
        }

        // Markers at the very end have no slide of their own
        if let Some(last) = pass.slides.last() {
            let index = last.index;
            for (line_number, line_type, section_name) in pass.pending_markers.drain(..) {
                mapper.add_mapping(line_number, index, line_type, Some(&section_name));
            }
        }

        let last_line = lines.last().map(|line| line.line_number).unwrap_or(0);
        let sections = pass.tracker.finish(last_line);

        debug!(
            "Assembled {} slides, {} masters, {} sections",
            pass.slides.len(),
            pass.masters.len(),
            sections.len()
        );

        Ok(SlideDeck {
            slides: pass.slides,
            masters: pass.masters,
            sections,
        })
    }

    fn place_cover(
        &self,
        pass: &mut Pass,
        line: &LyricLine,
        title: &str,
        subtitle: Option<&str>,
        mapper: &mut LineToSlideMapper,
    ) {
        let index = pass.open_slide(SlideKind::Cover, mapper);
        let cover = &pass.scoped.settings.cover;
        let general = &pass.scoped.settings.general;

        let secondary_style = cover.secondary.enabled.then(|| cover.secondary.text.clone());
        let mut text = TextObject::new(
            COVER_TEXTBOX_KEY,
            &cover.position,
            cover.main.text.clone(),
            secondary_style,
        );

        let secondary = match subtitle {
            Some(subtitle) => subtitle.to_string(),
            None if needs_transliteration(title) => transliterate(title),
            None => String::new(),
        };
        let secondary = if general.remove_identical_words {
            remove_identical_words(title, &secondary)
        } else {
            secondary
        };
        text.push_line(title, Some(secondary));

        pass.slides[index - 1].text_objects.push(text);
        mapper.add_mapping(line.line_number, index, LineType::Cover, pass.section_name.as_deref());
    }

    /// Place a normal line and greedily pull the following normal lines into
    /// the same textbox
    fn place_content(
        &self,
        pass: &mut Pass,
        lines: &[LyricLine],
        ordinal: usize,
        consumed: &mut [bool],
        mapper: &mut LineToSlideMapper,
    ) -> Result<(), GenerationError> {
        let line = &lines[ordinal];
        let slot = pass.cursor.locate(ordinal);
        let layout = pass.cursor.layout();

        let slide_index = if slot.starts_slide() || !pass.content_slide_open {
            pass.open_slide(SlideKind::Content, mapper)
        } else {
            pass.slide_count()
        };

        let key = format!("textbox{}", slot.textbox_number);
        let content = &pass.scoped.settings.content;
        let position = content
            .textboxes
            .get(&key)
            .filter(|_| slot.textbox_number <= layout.textbox_count)
            .copied()
            .ok_or_else(|| GenerationError::TextboxOutOfRange {
                key: key.clone(),
                textbox_count: layout.textbox_count,
            })?;

        let secondary_enabled = content.secondary.enabled
            && pass.scoped.settings.general.secondary_text != SecondaryTextSource::None;
        let secondary_style = secondary_enabled.then(|| content.secondary.text.clone());
        let primary_style = content.main.text.clone();

        // Lines sharing this textbox
        let mut group = vec![ordinal];
        if slot.starts_textbox() {
            let pull_limit = layout.lines_per_textbox - 1;
            group.extend(
                (ordinal + 1..lines.len())
                    .take_while(|&next| lines[next].line_type() == LineType::Normal)
                    .take(pull_limit),
            );
        }

        let rows: Vec<(String, Option<String>)> = group
            .iter()
            .map(|&index| {
                let text = lines[index].normalized_text.clone();
                let secondary = secondary_enabled.then(|| self.secondary_line(pass, index, &text));
                (text, secondary)
            })
            .collect();

        let section_name = pass.section_name.clone();
        // An open content slide is always the last one
        let slide = &mut pass.slides[slide_index - 1];

        if !slide.text_objects.iter().any(|text| text.textbox_key == key) {
            slide
                .text_objects
                .push(TextObject::new(&key, &position, primary_style, secondary_style));
        }
        if let Some(text) = slide.text_objects.iter_mut().find(|text| text.textbox_key == key) {
            for (primary, secondary) in rows {
                text.push_line(&primary, secondary);
            }
        }

        mapper.add_mapping(line.line_number, slide_index, LineType::Normal, section_name.as_deref());

        let pulled: Vec<usize> = group[1..]
            .iter()
            .map(|&index| {
                consumed[index] = true;
                lines[index].line_number
            })
            .collect();
        if !pulled.is_empty() {
            mapper.add_skipped_lines(&pulled);
        }

        Ok(())
    }

    /// Secondary text for the line at `ordinal`
    fn secondary_line(&self, pass: &Pass, ordinal: usize, primary: &str) -> String {
        let general = &pass.scoped.settings.general;
        let secondary = match general.secondary_text {
            SecondaryTextSource::None => String::new(),
            SecondaryTextSource::Translation => self
                .translation
                .and_then(|lines| lines.get(ordinal))
                .map(|line| line.trim().to_string())
                .unwrap_or_default(),
            SecondaryTextSource::Transliteration if needs_transliteration(primary) => transliterate(primary),
            SecondaryTextSource::Transliteration => String::new(),
        };

        if general.remove_identical_words {
            remove_identical_words(primary, &secondary)
        } else {
            secondary
        }
    }
}
