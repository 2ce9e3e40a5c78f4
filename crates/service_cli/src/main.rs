//! GARCH Barrier CLI - Command Line Pricing of Knock-In Barrier Calls
//!
//! This is the operational entry point for the pricer_garch engine.
//!
//! # Commands
//!
//! - `garch_barrier price` - Run the Monte Carlo pricer and report the estimate
//! - `garch_barrier check` - Validate configuration and show the resolved parameters
//!
//! # Configuration
//!
//! Settings are resolved with priority CLI flags > `GARCH_*` environment
//! variables > TOML file (`--config`) > built-in reference scenario.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{build_config, CliArgs};

/// GARCH barrier call Monte Carlo pricer
#[derive(Parser)]
#[command(name = "garch_barrier")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging unless --log-level is given)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the barrier call
    Price {
        /// Number of Monte Carlo replications
        #[arg(short = 'n', long)]
        replications: Option<usize>,

        /// Seed for the pseudo-random generator
        #[arg(short, long)]
        seed: Option<u64>,

        /// Run replications in parallel chunks
        #[arg(short, long)]
        parallel: bool,

        /// Replications per parallel chunk
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check configuration without pricing
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            verbose: self.verbose,
            ..Default::default()
        };
        if let Commands::Price {
            replications,
            seed,
            parallel,
            chunk_size,
            ..
        } = &self.command
        {
            args.replications = *replications;
            args.seed = *seed;
            args.parallel = *parallel;
            args.chunk_size = *chunk_size;
        }
        args
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level.as_filter_str());

    info!("GARCH barrier pricer v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "Configuration loaded");

    match &cli.command {
        Commands::Price { format, .. } => commands::price::run(&config, format),
        Commands::Check => commands::check::run(&config),
    }
}
