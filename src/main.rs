// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subsentence::app_config::{self, Config};
use subsentence::app_controller::Controller;
use subsentence::providers::Formality;

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

/// CLI Wrapper for Formality to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFormality {
    Default,
    More,
    Less,
    PreferMore,
    PreferLess,
}

impl From<CliFormality> for Formality {
    fn from(cli_formality: CliFormality) -> Self {
        match cli_formality {
            CliFormality::Default => Formality::Default,
            CliFormality::More => Formality::More,
            CliFormality::Less => Formality::Less,
            CliFormality::PreferMore => Formality::PreferMore,
            CliFormality::PreferLess => Formality::PreferLess,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate SRT subtitles sentence by sentence
    Translate(TranslateArgs),

    /// Show character usage for the configured provider
    Usage(ConfigArgs),

    /// Generate shell completions for subsentence
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Provider API key (overrides the config file)
    #[arg(long, env = "DEEPL_AUTH_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input .srt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Target language code, repeatable (e.g. -t fr -t de)
    #[arg(short, long = "target-language")]
    target_languages: Vec<String>,

    /// Source language code (detected by the provider when omitted)
    #[arg(short, long)]
    source_language: Option<String>,

    /// Requested formality
    #[arg(long, value_enum)]
    formality: Option<CliFormality>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for translated files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

/// subsentence - sentence-aware subtitle translation
///
/// Rebuilds whole sentences from subtitle cues, translates them in one
/// request and spreads each translation back over the original timing.
#[derive(Parser, Debug)]
#[command(name = "subsentence")]
#[command(version)]
#[command(about = "Sentence-aware SRT subtitle translation")]
#[command(long_about = "subsentence translates SRT subtitles sentence by sentence and keeps the original cue timing.

EXAMPLES:
    subsentence translate movie.srt                  # Translate using default config
    subsentence translate -t fr -t de movie.srt      # Translate into French and German
    subsentence translate -f -o out/ /subtitles/     # Process a directory, overwriting outputs
    subsentence usage                                # Show provider character usage
    subsentence completions bash > subsentence.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. The API key can also be given with DEEPL_AUTH_KEY.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: Marker and ANSI color for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✗", "1;31"),
            Level::Warn => ("!", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("·", "1;36"),
            Level::Trace => ("…", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, color) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subsentence", &mut std::io::stdout());
            Ok(())
        }
        Commands::Usage(args) => run_usage(args).await,
        Commands::Translate(args) => run_translate(args).await,
    }
}

/// Load the config file, creating a default one when missing, and apply
/// the options shared by every subcommand
fn load_config(args: &ConfigArgs) -> Result<Config> {
    if let Some(level) = &args.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config_path = Path::new(&args.config_path);
    let mut config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", args.config_path);
        let config = Config::default();
        config
            .save(config_path)
            .with_context(|| format!("Failed to write default config to file: {}", args.config_path))?;
        config
    };

    if let Some(api_key) = &args.api_key {
        config.provider.api_key = api_key.clone();
    }

    match &args.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

async fn run_usage(args: ConfigArgs) -> Result<()> {
    let config = load_config(&args)?;
    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let usage = controller.usage().await?;

    info!(
        "{}: {}/{} characters used ({:.1}%)",
        controller.config().provider.provider_type.display_name(),
        usage.used,
        usage.limit,
        usage.ratio() * 100.0
    );
    Ok(())
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;

    if !args.target_languages.is_empty() {
        config.target_languages = args.target_languages.clone();
    }
    if let Some(source_language) = &args.source_language {
        config.source_language = Some(source_language.clone());
    }
    if let Some(formality) = &args.formality {
        config.provider.formality = Some(formality.clone().into());
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let output_dir = args.output_dir.as_deref();

    if args.input_path.is_file() {
        controller.run(&args.input_path, output_dir, args.force_overwrite).await?;
    } else if args.input_path.is_dir() {
        let summary = controller.run_folder(&args.input_path, output_dir, args.force_overwrite).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to translate", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}
