/*!
 * # lyricdeck - lyrics to slide decks
 *
 * A Rust library that compiles song lyrics with inline structural markers
 * into an ordered deck of slide descriptions for a presentation.
 *
 * ## Features
 *
 * - Line classification: covers, subtitles, sections, empty slides, fills
 * - Layered settings: registry defaults, global scopes, per-section overrides
 * - Textbox packing with an explicit position cursor
 * - Line-to-slide mapping for scroll-syncing an editor with the deck
 * - Settings annotations embedded in the lyric text as JSON diffs
 *   against a named preset
 * - Transliteration or translation as a secondary text track
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `settings`: Settings registry, tree, presets and resolver
 * - `lyrics`: Line classification and section tracking
 * - `transliteration`: Cyrillic and Greek to Latin transliteration
 * - `slides`: Position cursor, assembler, deck model and line mapper
 * - `overwrite`: Settings annotations (diff, write, parse, strip, merge)
 * - `generator`: The end-to-end generation pass
 * - `presentation`: Sink trait receiving the deck as presentation calls
 * - `validation`: Lint checks for lyric text
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod generator;
pub mod lyrics;
pub mod overwrite;
pub mod presentation;
pub mod settings;
pub mod slides;
pub mod transliteration;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, GenerationError, GenerationWarning, OverwriteError, SettingsError};
pub use generator::{GenerationOutput, SlideGenerator};
pub use presentation::{emit_deck, PresentationSink, RecordingSink};
pub use settings::{PresetLibrary, SettingsRegistry, SettingsTree};
pub use slides::{LineToSlideMapper, SlideDeck};
