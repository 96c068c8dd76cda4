use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::generator::{GenerationOutput, SlideGenerator};
use crate::overwrite::{main_section_names, write_overwrites};
use crate::presentation::{emit_deck, RecordingSink};
use crate::settings::{PresetLibrary, PresetsCatalog, SettingsRegistry, SettingsTree};
use crate::slides::{LineToSlideMapper, LineToSlideMapping};
use crate::validation::{lint_report, LintReport};

// @module: Application controller for lyric files

// @const: Suffix marking a parallel translation file (`song.translation.txt`)
pub const TRANSLATION_SUFFIX: &str = "translation";

// @const: Issue log written next to processed folders
pub const ISSUES_LOG_FILE: &str = "lyricdeck.issues.log";

/// What a generated file contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Deck, mappings, stripped text, merged settings and warnings
    #[default]
    Deck,
    /// The define-master / add-slide / add-text call sequence
    Calls,
}

impl OutputFormat {
    fn suffix(self) -> &'static str {
        match self {
            Self::Deck => "deck",
            Self::Calls => "calls",
        }
    }
}

/// Outcome of processing one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    Skipped(PathBuf),
}

/// Counts of a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Deck output document
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckDocument<'a> {
    #[serde(flatten)]
    output: &'a GenerationOutput,
    mappings: &'a [LineToSlideMapping],
}

/// Main application controller for lyric files
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Presets known to this run
    presets: PresetLibrary,
    // @field: Base settings every file starts from
    settings: SettingsTree,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let mut presets = PresetLibrary::builtin();
        if let Some(presets_file) = &config.presets_file {
            let extra = PresetLibrary::load(presets_file)?;
            debug!("Loaded {} presets from {}", extra.len(), presets_file);
            presets.extend(extra);
        }

        let settings = match &config.settings_file {
            Some(settings_file) => {
                let content = FileManager::read_to_string(settings_file)?;
                SettingsTree::from_json(&content)
                    .with_context(|| format!("Failed to parse settings file: {}", settings_file))?
            }
            None => SettingsTree::default(),
        };

        if presets.get(&config.default_preset).is_none() {
            return Err(anyhow!(
                "Default preset '{}' not found (known: {})",
                config.default_preset,
                presets.names().join(", ")
            ));
        }

        Ok(Self { config, presets, settings })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn presets(&self) -> &PresetLibrary {
        &self.presets
    }

    pub fn settings(&self) -> &SettingsTree {
        &self.settings
    }

    /// Run one generation pass over in-memory text
    ///
    /// In per-section mode, sections of the text that the base settings do
    /// not know yet get an entry inheriting the global settings.
    pub fn generate_text(
        &self,
        text: &str,
        translation: Option<&str>,
        mapper: &mut LineToSlideMapper,
    ) -> Result<GenerationOutput> {
        let mut settings = self.settings.clone();
        if settings.use_different_setting_for_each_section() {
            let sync = settings.sync_sections(main_section_names(text));
            if !sync.added.is_empty() || !sync.removed.is_empty() {
                debug!("Section settings synced: added {:?}, removed {:?}", sync.added, sync.removed);
            }
        }

        let generator = SlideGenerator::new(SettingsRegistry::global(), &self.presets);
        let output = generator.generate(text, &settings, translation, mapper)?;
        Ok(output)
    }

    /// Generate the output file for one lyric file
    ///
    /// A translation file given explicitly wins over a sibling
    /// `<stem>.translation.<ext>` file.
    pub fn run(
        &self,
        input_file: &Path,
        output_dir: &Path,
        translation_file: Option<&Path>,
        format: OutputFormat,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::generate_output_path(input_file, output_dir, format.suffix(), "json");
        if FileManager::file_exists(&output_path) && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", input_file);
            return Ok(FileOutcome::Skipped(output_path));
        }

        let text = FileManager::read_to_string(input_file)?;
        let translation_path = translation_file
            .map(Path::to_path_buf)
            .or_else(|| self.sibling_translation(input_file));
        let translation = match &translation_path {
            Some(path) => {
                debug!("Using translation file {:?}", path);
                Some(FileManager::read_to_string(path)?)
            }
            None => None,
        };

        let mut mapper = LineToSlideMapper::new();
        let output = self
            .generate_text(&text, translation.as_deref(), &mut mapper)
            .with_context(|| format!("Failed to generate slides for {:?}", input_file))?;

        for warning in &output.warnings {
            warn!("{}: {}", input_file.display(), warning);
        }

        let json = match format {
            OutputFormat::Deck => {
                let document = DeckDocument {
                    output: &output,
                    mappings: mapper.mappings(),
                };
                self.to_json(&document)?
            }
            OutputFormat::Calls => {
                let mut sink = RecordingSink::new();
                emit_deck(&output.deck, &mut sink)?;
                self.to_json(&sink.into_calls())?
            }
        };

        FileManager::write_to_file(&output_path, &json)?;
        info!("Wrote {} slides to {}", output.deck.len(), output_path.display());
        Ok(FileOutcome::Written(output_path))
    }

    /// Run the workflow in folder mode, processing every lyric file in a directory
    /// Outputs land next to their inputs; existing outputs are skipped
    pub fn run_folder(&self, input_dir: &Path, format: OutputFormat, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let lyric_files: Vec<PathBuf> = FileManager::find_files(input_dir, &self.config.lyrics_extension)?
            .into_iter()
            .filter(|path| !Self::is_translation_file(path))
            .collect();

        if lyric_files.is_empty() {
            return Err(anyhow!("No lyric files found in directory: {:?}", input_dir));
        }

        let mut summary = FolderSummary::default();
        let mut issues = Vec::new();
        for lyric_file in &lyric_files {
            let output_dir = lyric_file.parent().unwrap_or(input_dir);
            match self.run(lyric_file, output_dir, None, format, force_overwrite) {
                Ok(FileOutcome::Written(_)) => summary.processed += 1,
                Ok(FileOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    let app_error = AppError::from(e);
                    error!("Error processing file {}: {}", lyric_file.display(), app_error);
                    issues.push(format!("{} - {}", lyric_file.display(), app_error));
                    summary.errors += 1;
                }
            }
        }

        let summary_message = format!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.errors
        );
        info!("{}", summary_message);

        let log_file_path = input_dir.join(ISSUES_LOG_FILE);
        for issue in &issues {
            if let Err(e) = FileManager::append_to_log_file(&log_file_path, issue) {
                warn!("Failed to write folder log: {}", e);
            }
        }
        let entry = format!(
            "{} - {} - Duration: {}.{:03}s",
            input_dir.display(),
            summary_message,
            start_time.elapsed().as_secs(),
            start_time.elapsed().subsec_millis()
        );
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &entry) {
            warn!("Failed to write folder log: {}", e);
        }

        Ok(summary)
    }

    /// Rewrite the annotations of a lyric file against a preset
    ///
    /// Returns the new text; the file is only touched when `in_place` is set.
    pub fn write_overwrites_file(&self, input_file: &Path, preset: Option<&str>, in_place: bool) -> Result<String> {
        let text = FileManager::read_to_string(input_file)?;
        let preset = preset.unwrap_or(&self.config.default_preset);

        let updated = write_overwrites(SettingsRegistry::global(), &self.presets, &self.settings, preset, &text)
            .with_context(|| format!("Failed to write annotations for {:?}", input_file))?;

        if in_place {
            if updated == text {
                info!("Annotations of {} are up to date", input_file.display());
            } else {
                FileManager::write_to_file(input_file, &updated)?;
                info!("Rewrote annotations of {} against preset '{}'", input_file.display(), preset);
            }
        }

        Ok(updated)
    }

    /// Lint a lyric file
    pub fn lint_file(&self, input_file: &Path) -> Result<LintReport> {
        let text = FileManager::read_to_string(input_file)?;
        let report = lint_report(&text);
        debug!("{}: {}", input_file.display(), report.summary());
        Ok(report)
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.config.pretty_output {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.context("Failed to serialize output")
    }

    fn sibling_translation(&self, input_file: &Path) -> Option<PathBuf> {
        let stem = input_file.file_stem()?.to_string_lossy();
        let extension = input_file
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_else(|| self.config.lyrics_extension.clone());
        let candidate = input_file.with_file_name(format!("{}.{}.{}", stem, TRANSLATION_SUFFIX, extension));
        FileManager::file_exists(&candidate).then_some(candidate)
    }

    fn is_translation_file(path: &Path) -> bool {
        path.file_stem()
            .and_then(|stem| Path::new(stem).extension())
            .is_some_and(|ext| ext == TRANSLATION_SUFFIX)
    }
}
