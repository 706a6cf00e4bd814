// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use postmill::app_config::{self, Config, TranslationProvider};
use postmill::app_controller::{Controller, RunOptions};
use postmill::file_utils::FileManager;
use postmill::posts::load_posts;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Passthrough,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Passthrough => TranslationProvider::Passthrough,
        }
    }
}

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
    /// Generate translated mirrors of the source-locale posts
    Translate(TranslateArgs),

    /// List posts newest first
    Posts(PostsArgs),

    /// Generate shell completions for postmill
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Regenerate posts whose translation already exists
    #[arg(short, long)]
    force: bool,

    /// Translate without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Source language code (e.g., 'zh', 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Directory holding the source posts
    #[arg(long)]
    source_dir: Option<String>,

    /// Directory receiving the translated posts
    #[arg(long)]
    target_dir: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", env = "POSTMILL_CONFIG")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct PostsArgs {
    /// Post directory to list (defaults to the configured source directory)
    #[arg(long)]
    dir: Option<String>,

    /// JSON file mapping post ids to view counts
    #[arg(long)]
    views: Option<PathBuf>,

    /// Print the listing as JSON
    #[arg(long)]
    json: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", env = "POSTMILL_CONFIG")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// postmill - bilingual post tooling
///
/// Reads MDX posts laid out as <root>/<year>/<slug>/page.mdx, lists their
/// metadata and generates machine-translated mirrors in another locale.
#[derive(Parser, Debug)]
#[command(name = "postmill")]
#[command(version)]
#[command(about = "Metadata extraction and translation for MDX posts")]
#[command(long_about = "postmill reads MDX posts, extracts their metadata and generates translated mirrors.

EXAMPLES:
    postmill translate                          # Translate new posts using conf.json
    postmill translate --force                  # Regenerate every translation
    postmill translate --dry-run -l debug       # Show what would be written
    postmill translate -s zh -t ja --target-dir 'app/(post)/ja'
    postmill posts --json --views views.json    # List posts with view counts
    postmill completions bash > postmill.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically by the translate command.

SUPPORTED PROVIDERS:
    google      - Google Translate web endpoint (default, no API key)
    passthrough - Keeps text unchanged, useful for offline runs")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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
        // The logger itself lets everything through; `log::set_max_level` filters.
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
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
    // Info by default; raised or lowered once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "postmill", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => run_translate(args).await,
        Commands::Posts(args) => run_posts(args),
    }
}

/// Apply the CLI log level, falling back to the configured one
fn apply_log_level(cli_level: Option<&CliLogLevel>, config: &mut Config) {
    if let Some(level) = cli_level {
        config.log_level = level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        log::set_max_level(app_config::LogLevel::from(level.clone()).to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(source_dir) = &options.source_dir {
        config.content.source_dir = source_dir.clone();
    }
    if let Some(target_dir) = &options.target_dir {
        config.content.target_dir = target_dir.clone();
    }
    apply_log_level(options.log_level.as_ref(), &mut config);

    let controller = Controller::with_config(config)?;
    if !options.dry_run {
        // Failures are logged by the check; the run keeps source text where calls fail
        let _ = controller.check_provider().await;
    }
    controller
        .run(RunOptions {
            force: options.force,
            dry_run: options.dry_run,
            show_progress: !options.no_progress,
        })
        .await?;

    Ok(())
}

fn run_posts(options: PostsArgs) -> Result<()> {
    let mut config = if Path::new(&options.config_path).exists() {
        Config::from_file(&options.config_path)?
    } else {
        Config::default()
    };
    apply_log_level(options.log_level.as_ref(), &mut config);

    let views: HashMap<String, u64> = match &options.views {
        Some(path) => {
            let content = FileManager::read_to_string(path)?;
            serde_json::from_str(&content).context(format!("Failed to parse view counts: {:?}", path))?
        }
        None => HashMap::new(),
    };

    let dir = options.dir.unwrap_or_else(|| config.content.source_dir.clone());
    let posts = load_posts(&dir, &config.content.document_name, &views);
    info!("Found {} post(s) in {}", posts.len(), dir);

    let mut stdout = std::io::stdout();
    if options.json {
        let json = serde_json::to_string_pretty(&posts).context("Failed to serialize posts")?;
        writeln!(stdout, "{}", json)?;
    } else {
        for post in &posts {
            writeln!(
                stdout,
                "{:<20} {:>10}  {} ({})",
                post.metadata.date, post.views_formatted, post.metadata.title, post.metadata.id
            )?;
        }
    }

    Ok(())
}
