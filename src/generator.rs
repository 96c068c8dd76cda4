/*!
 * End-to-end slide generation.
 *
 * One pass turns lyric text and a settings tree into a slide deck:
 *
 * 1. Annotation lines are extracted and stripped from the text
 * 2. Their overwrites are merged into a copy of the settings
 * 3. The stripped lines are classified with their original line numbers
 * 4. The assembler places every line and fills the line-to-slide mapper
 *
 * The caller owns the mapper and must not run two passes on it at once;
 * `&mut` borrows enforce that.
 */

use log::{debug, info};
use serde::Serialize;

use crate::errors::{GenerationError, GenerationWarning};
use crate::overwrite::{parse_document, OverwriteMerger};
use crate::settings::{PresetsCatalog, SettingsRegistry, SettingsResolver, SettingsTree};
use crate::slides::{Assembler, LineToSlideMapper, SlideDeck};

/// Result of one generation pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    pub deck: SlideDeck,
    /// Input text without annotation lines
    pub stripped_text: String,
    /// Settings after merging the annotations
    pub settings: SettingsTree,
    pub warnings: Vec<GenerationWarning>,
}

/// Generates slide decks from lyric text
pub struct SlideGenerator<'a> {
    registry: &'a SettingsRegistry,
    presets: &'a dyn PresetsCatalog,
}

impl<'a> SlideGenerator<'a> {
    pub fn new(registry: &'a SettingsRegistry, presets: &'a dyn PresetsCatalog) -> Self {
        Self { registry, presets }
    }

    /// Run one full pass.
    ///
    /// `translation` is a parallel text whose lines become the secondary
    /// track when `general.secondaryText` is `translation`; its lines are
    /// matched to the lyric lines after annotations are stripped from both.
    /// The mapper is cleared before anything is recorded.
    pub fn generate(
        &self,
        text: &str,
        settings: &SettingsTree,
        translation: Option<&str>,
        mapper: &mut LineToSlideMapper,
    ) -> Result<GenerationOutput, GenerationError> {
        mapper.clear();

        let document = parse_document(text);
        let (merged, merge_warnings) = OverwriteMerger::new(self.registry, self.presets).apply(settings, &document);

        let lines = document.stripped.classified();
        let translation_lines: Vec<String> = translation
            .map(|translation| {
                let stripped = parse_document(translation).stripped;
                stripped.text.split('\n').map(str::to_string).collect()
            })
            .unwrap_or_default();

        let resolver = SettingsResolver::new(self.registry);
        let mut assembler = Assembler::new(&resolver, &merged);
        if translation.is_some() {
            assembler = assembler.with_translation(&translation_lines);
        }
        let deck = assembler.assemble(&lines, mapper)?;

        let mut warnings = document.warnings;
        warnings.extend(merge_warnings);

        debug!("Mapped {} lines to slides", mapper.len());
        info!(
            "Generated {} slides from {} lines ({} warnings)",
            deck.len(),
            lines.len(),
            warnings.len()
        );

        Ok(GenerationOutput {
            deck,
            stripped_text: document.stripped.text,
            settings: merged,
            warnings,
        })
    }
}
