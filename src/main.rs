// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::app_config::{Config, ExportTarget, LogLevel};
use crate::app_controller::{Controller, RunReport};
use crate::transcript::format_timestamp;

mod app_config;
mod app_controller;
mod cutlist;
mod diff;
mod errors;
mod export;
mod summary;
mod text_match;
mod timing;
mod transcript;

/// CLI wrapper for ExportTarget to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExportTarget {
    FinalCutPro,
    Premiere,
    Resolve,
}

impl From<CliExportTarget> for ExportTarget {
    fn from(cli_target: CliExportTarget) -> Self {
        match cli_target {
            CliExportTarget::FinalCutPro => ExportTarget::FinalCutPro,
            CliExportTarget::Premiere => ExportTarget::Premiere,
            CliExportTarget::Resolve => ExportTarget::Resolve,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the cut list from a transcript pair
    Cut(CutArgs),

    /// Generate shell completions for srtcut
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CutArgs {
    /// Original transcript file (.srt.orig, as generated by transcription)
    #[arg(value_name = "ORIGINAL_SRT")]
    original: PathBuf,

    /// Edited transcript file (.srt, after the human removed blocks)
    #[arg(value_name = "EDITED_SRT")]
    edited: PathBuf,

    /// Word-level timing record (WhisperX-style .json)
    #[arg(value_name = "TIMING_JSON")]
    timing: PathBuf,

    /// Automatic cutlist file (JSON array of [start, end] seconds)
    #[arg(short, long)]
    auto_cuts: Option<PathBuf>,

    /// Margin in seconds around every cut
    #[arg(short, long)]
    margin: Option<f64>,

    /// Similarity threshold for block matching (0.0-1.0)
    #[arg(long)]
    threshold: Option<f32>,

    /// Export target passed to auto-editor
    #[arg(short, long, value_enum)]
    export: Option<CliExportTarget>,

    /// Video file to hand to auto-editor together with the cut list
    #[arg(short, long, requires = "export")]
    video: Option<PathBuf>,

    /// Print the auto-editor command without running it
    #[arg(short, long)]
    dry_run: bool,

    /// Print the summary as JSON instead of text
    #[arg(short, long)]
    json: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "cutconf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// srtcut - transcript edits to timeline cuts
///
/// Diffs an edited transcript against the transcription's original, recovers
/// the deleted blocks' time ranges from the word-level timing record, merges
/// them with automatic cuts, and prints or exports the final cut list.
#[derive(Parser, Debug)]
#[command(name = "srtcut")]
#[command(version = "1.0.0")]
#[command(about = "Turn transcript edits into video timeline cuts")]
#[command(long_about = "srtcut compares an edited SRT transcript against the original one the
transcription produced, recovers the deleted blocks' time ranges from the
word-level timing JSON (the source of truth; edited timestamps are never
trusted), merges them with an automatic cutlist, and emits the final cut
and keep lists.

EXAMPLES:
    srtcut cut talk.srt.orig talk.srt talk.json           # Basic cut list
    srtcut cut -m 0.25 talk.srt.orig talk.srt talk.json   # Wider margin
    srtcut cut -a silence.json talk.srt.orig talk.srt talk.json
    srtcut cut -e resolve -v talk.mp4 talk.srt.orig talk.srt talk.json
    srtcut cut --json talk.srt.orig talk.srt talk.json    # JSON summary
    srtcut completions bash > srtcut.bash                 # Shell completions

CONFIGURATION:
    Defaults are read from cutconf.json when present; command-line flags
    override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// Logger writing colored, timestamped lines to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_code(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[0m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[0;37m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                Self::color_code(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn to_level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    match options.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        Commands::Cut(args) => run_cut(args).await,
    }
}

async fn run_cut(args: CutArgs) -> Result<()> {
    let mut config = Config::from_file_or_default(&args.config_path)
        .with_context(|| format!("Failed loading config from {}", args.config_path))?;

    // Command-line flags override the config file
    if let Some(margin) = args.margin {
        config.margin = margin;
    }
    if let Some(threshold) = args.threshold {
        config.match_threshold = threshold;
    }
    if let Some(export) = args.export.clone() {
        config.export = Some(export.into());
    }
    if let Some(level) = args.log_level {
        config.log_level = level.into();
    }

    CustomLogger::init(to_level_filter(&config.log_level))
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    config.validate()?;

    let controller = Controller::new(config.clone());
    let report = controller
        .run_files(
            &args.original,
            &args.edited,
            &args.timing,
            args.auto_cuts.as_deref(),
        )
        .map_err(|e| anyhow!("{}", e))?;

    for warning in &report.warnings {
        warn!("{}", warning);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    } else {
        print_report(&report);
    }

    if let Some(video) = args.video {
        let export_args =
            export::build_auto_editor_args(&video, &report.merged, config.export);
        if args.dry_run {
            println!("{}", export::format_command(&export_args));
        } else {
            export::run_auto_editor(&export_args, config.export_timeout_secs).await?;
        }
    }

    if report.warnings.is_empty() {
        info!("Run completed");
    } else {
        info!("Run completed with {} warning(s)", report.warnings.len());
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    let summary = &report.summary;

    println!("Cut list ({} range(s)):", report.merged.len());
    for cut in &report.merged {
        let mut origins = Vec::new();
        if cut.sources.transcript {
            origins.push("transcript");
        }
        if cut.sources.automatic {
            origins.push("automatic");
        }
        println!(
            "  {} --> {}  ({:.3}s, {})",
            format_timestamp(cut.start),
            format_timestamp(cut.end),
            cut.duration(),
            origins.join("+")
        );
    }

    println!("Keep list ({} segment(s)):", report.kept.len());
    for range in &report.kept {
        println!(
            "  {} --> {}  ({:.3}s)",
            format_timestamp(range.start),
            format_timestamp(range.end),
            range.duration()
        );
    }

    println!(
        "Removed {:.3}s of {:.3}s ({:.1}% reduced), {} block(s) deleted",
        summary.removed_duration,
        summary.total_duration,
        summary.percent_reduced * 100.0,
        summary.deleted_block_count
    );
}
