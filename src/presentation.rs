/*!
 * Presentation boundary.
 *
 * The generated deck is handed to a presentation library through a small
 * trait, so the core never depends on a concrete file format. A recording
 * implementation captures the calls as serializable values for inspection.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;
use crate::slides::{BackgroundMaster, SlideDeck, SlideDescriptor, SlideKind, TextObject};

/// Receiver of the define-master / add-slide / add-text call sequence
///
/// Implementations translate each call into their own document model.
pub trait PresentationSink {
    /// Register a background master before any slide references it
    ///
    /// # Arguments
    /// * `master` - Master name and background definition
    fn define_master(&mut self, master: &BackgroundMaster) -> Result<(), GenerationError>;

    /// Start a new slide
    ///
    /// # Arguments
    /// * `slide` - The slide being started; its text objects follow as `add_text` calls
    fn add_slide(&mut self, slide: &SlideDescriptor) -> Result<(), GenerationError>;

    /// Add a text object to the slide started last
    ///
    /// # Arguments
    /// * `slide_index` - 1-based index of the slide started last
    /// * `text` - Positioned, styled lines
    fn add_text(&mut self, slide_index: usize, text: &TextObject) -> Result<(), GenerationError>;
}

/// Feed a deck to a sink: all masters first, then every slide with its text
pub fn emit_deck(deck: &SlideDeck, sink: &mut dyn PresentationSink) -> Result<(), GenerationError> {
    for master in &deck.masters {
        sink.define_master(master)?;
    }

    for slide in &deck.slides {
        sink.add_slide(slide)?;
        for text in &slide.text_objects {
            sink.add_text(slide.index, text)?;
        }
    }

    debug!(
        "Emitted {} masters and {} slides",
        deck.masters.len(),
        deck.slides.len()
    );
    Ok(())
}

/// One recorded sink call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum SinkCall {
    #[serde(rename_all = "camelCase")]
    DefineMaster {
        name: String,
        color: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    AddSlide {
        index: usize,
        kind: SlideKind,
        master: String,
    },
    #[serde(rename_all = "camelCase")]
    AddText {
        slide_index: usize,
        text: TextObject,
    },
}

/// Sink that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<SinkCall> {
        self.calls
    }
}

impl PresentationSink for RecordingSink {
    fn define_master(&mut self, master: &BackgroundMaster) -> Result<(), GenerationError> {
        self.calls.push(SinkCall::DefineMaster {
            name: master.name.clone(),
            color: master.color.clone(),
            image: master.image.clone(),
        });
        Ok(())
    }

    fn add_slide(&mut self, slide: &SlideDescriptor) -> Result<(), GenerationError> {
        self.calls.push(SinkCall::AddSlide {
            index: slide.index,
            kind: slide.kind,
            master: slide.background.clone(),
        });
        Ok(())
    }

    fn add_text(&mut self, slide_index: usize, text: &TextObject) -> Result<(), GenerationError> {
        self.calls.push(SinkCall::AddText {
            slide_index,
            text: text.clone(),
        });
        Ok(())
    }
}
