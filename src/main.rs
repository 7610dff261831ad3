// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use ezchajim::app_config::{self, Config};
use ezchajim::app_controller::Controller;
use ezchajim::numerals::{to_hebrew_numeral, GematriaCalculator};
use ezchajim::translation::StudySchedule;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Segment and annotate a manuscript file or every manuscript in a directory
    Analyze {
        /// Manuscript text file or directory
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Force overwrite of existing analysis files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Export translation batches from an analysis
    Batches {
        /// Analysis JSON written by `analyze`
        analysis: PathBuf,

        /// Directory receiving BATCH_nnn.json files
        #[arg(short, long, default_value = "batches")]
        output_dir: PathBuf,
    },

    /// Check returned translations without merging them
    Validate {
        analysis: PathBuf,

        /// JSON object mapping chunk ids to translated text
        translations: PathBuf,
    },

    /// Merge returned translations into an analysis
    Merge {
        analysis: PathBuf,

        /// JSON object mapping chunk ids to translated text
        translations: PathBuf,

        /// Output file (default: <analysis>.merged.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the gematria values of a text
    Gematria {
        text: String,
    },

    /// Apply the German target orthography to a translated text file
    Normalize {
        file: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the 49-day study schedule for an analysis
    Schedule {
        analysis: PathBuf,

        /// Show only this day (1-49)
        #[arg(short, long)]
        day: Option<usize>,
    },

    /// Generate shell completions for ezchajim
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Ez Chajim manuscript preparation
///
/// Segments a Hebrew manuscript into chunks, annotates them with gematria,
/// terminology changes and key terms, exports translation batches, and
/// validates and merges the returned translations.
#[derive(Parser, Debug)]
#[command(name = "ezchajim")]
#[command(version)]
#[command(about = "Hebrew manuscript preparation for translation")]
#[command(long_about = "ezchajim prepares Hebrew manuscripts for translation and checks the results.

EXAMPLES:
    ezchajim analyze ez_chajim.txt                      # Write ez_chajim.analysis.json
    ezchajim analyze -f manuscripts/                    # Re-analyze a whole directory
    ezchajim batches ez_chajim.analysis.json -o out/    # Export BATCH_001.json ...
    ezchajim validate ez_chajim.analysis.json de.json   # Check translations
    ezchajim merge ez_chajim.analysis.json de.json      # Write ez_chajim.analysis.merged.json
    ezchajim gematria \"עץ חיים\"                          # Print gematria values
    ezchajim completions bash > ezchajim.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is loaded; the level is adjusted afterwards
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    // Commands that need no configuration
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "ezchajim", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Gematria { text } => return print_gematria(text),
        _ => {}
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command).await
}

async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Analyze { input_path, force_overwrite } => {
            if input_path.is_file() {
                let output_dir = input_path.parent().unwrap_or(Path::new(".")).to_path_buf();
                controller.analyze_file(&input_path, &output_dir, force_overwrite).await?;
            } else if input_path.is_dir() {
                controller.analyze_folder(&input_path, force_overwrite).await?;
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", input_path));
            }
        }
        Commands::Batches { analysis, output_dir } => {
            controller.export_batches(&analysis, &output_dir).await?;
        }
        Commands::Validate { analysis, translations } => {
            let summary = controller.validate_translations(&analysis, &translations).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to serialize validation summary")?
            );
        }
        Commands::Merge { analysis, translations, output } => {
            let (path, outcome) = controller.merge(&analysis, &translations, output).await?;
            if !outcome.unknown_ids.is_empty() {
                println!("Unknown chunk ids: {}", outcome.unknown_ids.join(", "));
            }
            info!("Success: {:?}", path);
        }
        Commands::Normalize { file, output } => {
            let (path, result) = controller.normalize_file(&file, output).await?;
            for change in &result.changes {
                println!("{}", change);
            }
            info!("Success: {:?}", path);
        }
        Commands::Schedule { analysis, day } => {
            let schedule = controller.schedule(&analysis).await?;
            let days: Vec<_> = match day {
                Some(day) => vec![day],
                None => (1..=schedule.days().len()).collect(),
            };
            for day in days {
                let focus = StudySchedule::day_focus(day)?;
                let chunks = schedule.chunks_for(day).unwrap_or_default();
                println!(
                    "Day {:>2} ({}) {}: {}",
                    focus.day,
                    focus.hebrew_day,
                    focus.combination,
                    chunks.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
                );
            }
        }
        Commands::Gematria { .. } | Commands::Completions { .. } => {}
    }
    Ok(())
}

fn print_gematria(text: &str) -> Result<()> {
    let values = GematriaCalculator::new().calculate(text);
    println!("standard: {}", values.standard);
    println!("small:    {}", values.small);
    println!("full:     {}", values.full);
    println!("ordinal:  {}", values.ordinal);
    if values.standard > 0 {
        let numeral = to_hebrew_numeral(i64::try_from(values.standard)?)?;
        println!("numeral:  {}", numeral);
    }
    Ok(())
}
