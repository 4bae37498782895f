// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};
use std::io::Write;
use std::path::PathBuf;

use cuneify::app_config::{Config, LogLevel};
use cuneify::app_controller::Controller;
use cuneify::batch::BatchReport;
use cuneify::markup::Dialect;

/// CLI Wrapper for Dialect to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDialect {
    Etcsl,
    Cdli,
    EnumaElish,
}

impl From<CliDialect> for Dialect {
    fn from(cli_dialect: CliDialect) -> Self {
        match cli_dialect {
            CliDialect::Etcsl => Dialect::Etcsl,
            CliDialect::Cdli => Dialect::Cdli,
            CliDialect::EnumaElish => Dialect::EnumaElish,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Transliterate documents (default command)
    Run(RunArgs),

    /// Only rewrite source dialects into canonical markup
    Normalize(RunArgs),

    /// Generate shell completions for cuneify
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Documents or folders to process; configured sources when omitted
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", env = "CUNEIFY_CONFIG")]
    config: PathBuf,

    /// Script identifier (selects <dictionary-dir>/<script>.json)
    #[arg(short, long)]
    script: Option<String>,

    /// Directory holding dictionary files
    #[arg(long)]
    dictionary_dir: Option<PathBuf>,

    /// Root of the configured sources
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Root of the output tree
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Maximum number of documents processed at once
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Force the source dialect instead of detecting it
    #[arg(short, long, value_enum)]
    dialect: Option<CliDialect>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

impl RunArgs {
    // @applies: CLI overrides on top of the file configuration
    fn apply(&self, config: &mut Config) {
        if let Some(script) = &self.script {
            config.script = script.clone();
        }
        if let Some(dir) = &self.dictionary_dir {
            config.dictionary_dir = dir.clone();
        }
        if let Some(dir) = &self.source_dir {
            config.source_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(level) = self.log_level {
            config.log_level = level.into();
        }
    }
}

/// cuneify - cuneiform sign-code transliteration
///
/// Replaces romanized sign-codes in ETCSL, CDLI and Enuma Elish pages with
/// Unicode cuneiform and adds ruby glosses.
#[derive(Parser, Debug)]
#[command(name = "cuneify")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Cuneiform sign-code transliteration")]
#[command(long_about = "cuneify rewrites romanized cuneiform sign-codes (ed3-de3-a-ba, NU:3) into Unicode glyphs using a per-script JSON dictionary.

EXAMPLES:
    cuneify                                   # Transliterate every configured source
    cuneify run src/etcsl                     # Transliterate one folder
    cuneify run -d cdli tablet.html           # Force the CDLI dialect
    cuneify normalize src/cdli -o build       # Write canonical markup only
    cuneify completions bash > cuneify.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
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

    // @returns: ANSI color code for level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
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
    // Initialize the logger once with trace so later max-level changes take effect;
    // the visible level is set right after
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let report = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cuneify", &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Run(args)) => run(args, false).await?,
        Some(Commands::Normalize(args)) => run(args, true).await?,
        None => run(cli.run, false).await?,
    };

    if !report.is_success() {
        for failure in &report.failed {
            error!("Failed: {:?}", failure.input);
        }
        return Err(anyhow!(
            "{} of {} document(s) failed",
            report.failed.len(),
            report.total()
        ));
    }

    Ok(())
}

async fn run(args: RunArgs, normalize_only: bool) -> Result<BatchReport> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = args.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    let mut config = Config::load_or_create(&args.config)?;
    args.apply(&mut config);
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    let dialect = args.dialect.map(Dialect::from);

    if normalize_only {
        controller.normalize(&args.inputs, dialect).await
    } else {
        controller.run(&args.inputs, dialect).await
    }
}
