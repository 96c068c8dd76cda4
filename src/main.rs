// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use lyricdeck::app_config::{self, Config};
use lyricdeck::app_controller::{Controller, FileOutcome, OutputFormat};
use lyricdeck::validation::IssueSeverity;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate slide decks from a lyric file or every lyric file of a directory
    Generate(GenerateArgs),

    /// Rewrite the settings annotations of a lyric file against a preset
    WriteOverwrites(WriteOverwritesArgs),

    /// Report lyric text that will not render as its author probably expects
    Lint(LintArgs),

    /// Generate shell completions for lyricdeck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input lyric file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Parallel translation file (single file mode only)
    #[arg(short, long)]
    translation: Option<PathBuf>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// What the output file contains
    #[arg(long, value_enum, default_value_t = OutputFormat::Deck)]
    format: OutputFormat,

    /// Base settings tree (JSON), overrides the configured one
    #[arg(short, long)]
    settings: Option<String>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

#[derive(Parser, Debug)]
struct WriteOverwritesArgs {
    /// Lyric file whose annotations are rewritten
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Preset the annotations are written against
    #[arg(short, long)]
    preset: Option<String>,

    /// Base settings tree (JSON), overrides the configured one
    #[arg(short, long)]
    settings: Option<String>,

    /// Write the result back to the file instead of stdout
    #[arg(short, long)]
    in_place: bool,
}

#[derive(Parser, Debug)]
struct LintArgs {
    /// Lyric file to check
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Fail when any warning is reported
    #[arg(long)]
    strict: bool,
}

/// lyricdeck - lyrics to slide decks
///
/// Compiles song lyrics with inline structural markers and settings
/// annotations into slide deck descriptions.
#[derive(Parser, Debug)]
#[command(name = "lyricdeck")]
#[command(version)]
#[command(about = "Lyrics to slide deck compiler")]
#[command(long_about = "lyricdeck compiles lyric text into an ordered deck of slide descriptions.

EXAMPLES:
    lyricdeck generate song.txt                      # Write song.deck.json next to the lyrics
    lyricdeck generate -f --format calls song.txt    # Recorded presentation calls, overwrite
    lyricdeck generate -t song.de.txt song.txt       # Use a translation as the secondary line
    lyricdeck generate /songs/                       # Process every lyric file of a directory
    lyricdeck write-overwrites -p Stage -i song.txt  # Refresh annotations in place
    lyricdeck lint --strict song.txt                 # Fail on lint warnings
    lyricdeck completions bash > lyricdeck.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in lyricdeck.json by default. You can specify a
    different config file with --config-path. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "lyricdeck.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger with trace so later max-level changes take effect;
    // the visible level is set by log::set_max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(log_level) = &cli.log_level {
        let level: app_config::LogLevel = log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "lyricdeck", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(&cli.config_path)?;
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    match cli.command {
        Commands::Generate(args) => run_generate(config, args),
        Commands::WriteOverwrites(args) => run_write_overwrites(config, args),
        Commands::Lint(args) => run_lint(config, args),
        Commands::Completions { .. } => Ok(()),
    }
}

// @loads: Configuration, creating a default file when missing
fn load_config(config_path: &str) -> Result<Config> {
    let (config, created) = Config::load_or_create(config_path)?;
    if created {
        warn!("Config file not found at '{}', creating default config.", config_path);
    }
    Ok(config)
}

fn controller_for(mut config: Config, settings: Option<String>) -> Result<Controller> {
    if settings.is_some() {
        config.settings_file = settings;
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;
    Controller::with_config(config)
}

fn run_generate(config: Config, args: GenerateArgs) -> Result<()> {
    let controller = controller_for(config, args.settings)?;

    if args.input_path.is_file() {
        let output_dir = match &args.output_dir {
            Some(dir) => dir.clone(),
            None => args.input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };
        let outcome = controller.run(
            &args.input_path,
            &output_dir,
            args.translation.as_deref(),
            args.format,
            args.force_overwrite,
        )?;
        if let FileOutcome::Skipped(path) = outcome {
            info!("Kept existing {}", path.display());
        }
    } else if args.input_path.is_dir() {
        if args.translation.is_some() {
            warn!("--translation is ignored in folder mode; sibling .translation files are used instead");
        }
        if args.output_dir.is_some() {
            warn!("--output-dir is ignored in folder mode; outputs are written next to their inputs");
        }
        let summary = controller.run_folder(&args.input_path, args.format, args.force_overwrite)?;
        if summary.errors > 0 {
            return Err(anyhow!("{} files failed", summary.errors));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

fn run_write_overwrites(config: Config, args: WriteOverwritesArgs) -> Result<()> {
    let controller = controller_for(config, args.settings)?;
    let text = controller.write_overwrites_file(&args.input_file, args.preset.as_deref(), args.in_place)?;

    if !args.in_place {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", text).context("Failed to write to stdout")?;
    }
    Ok(())
}

fn run_lint(config: Config, args: LintArgs) -> Result<()> {
    let controller = controller_for(config, None)?;
    let report = controller.lint_file(&args.input_file)?;

    for issue in &report.issues {
        match issue.severity {
            IssueSeverity::Warning => warn!("line {} [{}]: {}", issue.line_number, issue.check, issue.message),
            IssueSeverity::Info => info!("line {} [{}]: {}", issue.line_number, issue.check, issue.message),
        }
    }
    info!("{}: {}", args.input_file.display(), report.summary());

    if args.strict && report.has_warnings() {
        error!("Lint failed in strict mode");
        return Err(anyhow!("{} lint warnings", report.warning_count));
    }
    Ok(())
}
