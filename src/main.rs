// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::{Config, FileCredentialStore};
use crate::app_controller::Controller;
use crate::providers::openai::OpenAiProvider;
use crate::session::DifficultyLevel;

mod app_config;
mod app_controller;
mod dom;
mod errors;
mod extractor;
mod partitioner;
mod providers;
mod renderer;
mod session;
mod speech;
mod translation;

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
    /// Rewrite a captured page into a reader view (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for simplyread
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Captured HTML page to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Difficulty level from 1 (simplest) to 10
    #[arg(short, long)]
    difficulty: Option<u8>,

    /// Target language name or code (e.g. 'Spanish', 'fr')
    #[arg(short = 't', long)]
    target_language: Option<String>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Output file for the reader page (defaults to <input>.reader.html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// SimplyRead - difficulty-scaled article reader
///
/// Turns a captured web page into a clean reader view, rewriting the article
/// text at a chosen difficulty level through an LLM provider.
#[derive(Parser, Debug)]
#[command(name = "simplyread")]
#[command(author = "SimplyRead Team")]
#[command(version = "0.3.0")]
#[command(about = "AI-powered reader view with difficulty-scaled text")]
#[command(long_about = "SimplyRead extracts the readable article from a captured web page and
rewrites it at a chosen difficulty level using an LLM provider.

EXAMPLES:
    simplyread page.html                     # Rewrite using default config
    simplyread -d 3 page.html                # Simplify to difficulty 3
    simplyread -t Spanish -d 6 page.html     # Spanish at difficulty 6
    simplyread -m gpt-4o page.html           # Use a specific model
    simplyread -o reader.html page.html      # Write the reader page here
    simplyread --log-level debug page.html   # Verbose run
    simplyread completions bash              # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically. The provider API
    key lives in the config file and is re-read on every translation call,
    so a rotated key is picked up without restarting.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Captured HTML page to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Difficulty level from 1 (simplest) to 10
    #[arg(short, long)]
    difficulty: Option<u8>,

    /// Target language name or code (e.g. 'Spanish', 'fr')
    #[arg(short = 't', long)]
    target_language: Option<String>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Output file for the reader page (defaults to <input>.reader.html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "simplyread", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                input_path,
                difficulty: cli.difficulty,
                target_language: cli.target_language,
                model: cli.model,
                output: cli.output,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader::<_, Config>(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        config
            .save(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(difficulty) = options.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(target_language) = &options.target_language {
        config.translation.target_language = target_language.clone();
    }
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    if !options.input_path.is_file() {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    let html = std::fs::read_to_string(&options.input_path)
        .context(format!("Failed to read input file: {:?}", options.input_path))?;

    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| reader_output_path(&options.input_path));

    // The credential is read from the config file on every call, so the
    // store points at the same path the config was loaded from
    let provider = Arc::new(OpenAiProvider::with_timeout(
        config.translation.endpoint.clone(),
        std::time::Duration::from_secs(config.translation.timeout_secs),
    ));
    let credentials = Arc::new(FileCredentialStore::new(config_path));
    let difficulty = DifficultyLevel::new(config.difficulty);

    let controller = Controller::new(config, provider, credentials);
    let page = controller
        .translate(&html, Some(difficulty))
        .await
        .map_err(|e| anyhow!("Translation run failed: {}", e))?;

    std::fs::write(&output_path, page)
        .context(format!("Failed to write reader page: {:?}", output_path))?;
    info!("Success: {:?}", output_path);

    Ok(())
}

// page.html -> page.reader.html
fn reader_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "page".to_string());
    input.with_file_name(format!("{}.reader.html", stem))
}
