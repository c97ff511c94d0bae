//! embedkit CLI - embeddable audio players.
//!
//! Provides commands for:
//! - `render`: Render player markup for one or more media URLs
//! - `thumbnail`: Print the thumbnail URI of a media URL
//! - `inspect`: Show how a URL is recognized and resolved
//! - `providers`: List the registered providers

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use embedkit_config::{CliSettings, Config};
use tracing_subscriber::EnvFilter;

use commands::{InspectArgs, ProvidersArgs, RenderArgs, ThumbnailArgs, build_registry};
use error::CliError;
use output::Output;

/// embedkit - Embeddable audio players for Mixcloud and SoundCloud links.
#[derive(Parser)]
#[command(name = "embedkit", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
struct GlobalArgs {
    /// Path to configuration file (default: auto-discover embedkit.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (log every discovery lookup).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP timeout in seconds (overrides config).
    #[arg(long, global = true, env = "EMBEDKIT_TIMEOUT")]
    timeout: Option<u64>,

    /// Cache successful lookups for the rest of the run.
    #[arg(long, global = true)]
    cache: bool,

    /// Disable the lookup cache.
    #[arg(long, global = true, conflicts_with = "cache")]
    no_cache: bool,
}

impl GlobalArgs {
    fn cli_settings(&self) -> CliSettings {
        let cache_enabled = if self.cache {
            Some(true)
        } else if self.no_cache {
            Some(false)
        } else {
            None
        };
        CliSettings {
            timeout_secs: self.timeout,
            cache_enabled,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render player markup for media URLs.
    Render(RenderArgs),
    /// Print the thumbnail URI of a media URL.
    Thumbnail(ThumbnailArgs),
    /// Show how a media URL is recognized and resolved.
    Inspect(InspectArgs),
    /// List registered providers.
    Providers(ProvidersArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    let config = Config::load(cli.global.config.as_deref(), Some(&cli.global.cli_settings()))?;
    let registry = build_registry(&config);

    match cli.command {
        Commands::Render(args) => args.execute(&registry, output),
        Commands::Thumbnail(args) => args.execute(&registry, output),
        Commands::Inspect(args) => args.execute(&registry, output),
        Commands::Providers(args) => args.execute(&registry, output),
    }
}
