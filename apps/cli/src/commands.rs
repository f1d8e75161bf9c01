//! CLI command definitions, routing, and tracing setup.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use docstitch_core::renumber::{LevelConfig, TitleStrategy, default_levels};
use docstitch_core::strip::StripPatterns;
use docstitch_core::{MergeOptions, ProgressReporter, merge_site};
use docstitch_shared::{AppConfig, Lang, init_config, load_config, tr};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Docstitch — one docsify site, one Markdown file.
#[derive(Parser)]
#[command(
    name = "docstitch",
    version,
    about = "Stitch a docsify site into a single renumbered Markdown document.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Merge a docsify site into one Markdown document.
    Merge {
        /// Site root containing _sidebar.md.
        #[arg(short, long)]
        root: Option<String>,

        /// Page substituted for bare `/` sidebar links (relative paths
        /// resolve against the site root).
        #[arg(long)]
        homepage: Option<String>,

        /// Output file for the merged document.
        #[arg(short, long)]
        out: Option<String>,

        /// JSON file with regex patterns for stripping old heading serials.
        #[arg(long)]
        strip_config: Option<String>,

        /// JSON file with per-level numbering configs.
        #[arg(long)]
        levels_config: Option<String>,

        /// Strategy for headings deeper than the configured levels:
        /// normal, cite, or title.
        #[arg(long)]
        unconfigured: Option<String>,

        /// Strategy for headings deeper than level 6.
        #[arg(long)]
        overflow: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docstitch=info",
        1 => "docstitch=debug",
        _ => "docstitch=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Merge {
            root,
            homepage,
            out,
            strip_config,
            levels_config,
            unconfigured,
            overflow,
        } => cmd_merge(MergeArgs {
            root,
            homepage,
            out,
            strip_config,
            levels_config,
            unconfigured,
            overflow,
        }),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Raw merge flags; anything unset falls back to the config file defaults.
struct MergeArgs {
    root: Option<String>,
    homepage: Option<String>,
    out: Option<String>,
    strip_config: Option<String>,
    levels_config: Option<String>,
    unconfigured: Option<String>,
    overflow: Option<String>,
}

fn cmd_merge(args: MergeArgs) -> Result<()> {
    let config = load_config()?;
    let defaults = &config.defaults;
    let lang: Lang = defaults.language.parse()?;

    let root = PathBuf::from(args.root.as_deref().unwrap_or(&defaults.root));
    let homepage_raw = args.homepage.as_deref().unwrap_or(&defaults.homepage);
    let homepage = {
        let path = PathBuf::from(homepage_raw);
        if path.is_absolute() {
            path
        } else {
            root.join(homepage_raw)
        }
    };
    let out = PathBuf::from(args.out.as_deref().unwrap_or(&defaults.output));

    let patterns = match args
        .strip_config
        .as_deref()
        .or(defaults.strip_config.as_deref())
    {
        Some(path) => StripPatterns::load(Path::new(path))?,
        None => StripPatterns::defaults(),
    };
    let levels = match args
        .levels_config
        .as_deref()
        .or(defaults.levels_config.as_deref())
    {
        Some(path) => LevelConfig::load(Path::new(path))?,
        None => default_levels(),
    };
    let unconfigured: TitleStrategy = args
        .unconfigured
        .as_deref()
        .unwrap_or(&defaults.unconfigured_strategy)
        .parse()?;
    let overflow: TitleStrategy = args
        .overflow
        .as_deref()
        .unwrap_or(&defaults.overflow_strategy)
        .parse()?;

    info!(
        root = %root.display(),
        out = %out.display(),
        "merging docsify site"
    );

    let reporter = CliProgress::new();
    let options = MergeOptions {
        root,
        homepage,
        patterns,
        levels,
        unconfigured,
        overflow,
    };
    let outcome = merge_site(&options, &reporter)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&out, outcome.lines.concat())?;

    println!();
    println!("  {}", tr(lang, "Merge complete!"));
    println!("  {} {}", tr(lang, "Pages:"), outcome.page_count);
    println!("  {} {}", tr(lang, "Lines:"), outcome.lines.len());
    println!("  {} {}", tr(lang, "Output:"), out.display());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let config = load_config()?;
    let lang: Lang = config.defaults.language.parse()?;
    let path = init_config()?;
    println!("{} {}", tr(lang, "Config initialized at:"), path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
