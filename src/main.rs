//! price-sweep - exhaustive catalog harvesting CLI
//!
//! Sweeps a capped paginated search endpoint by recursive price-range
//! splitting until every listing in range has been collected.

use anyhow::Result;
use clap::{Parser, Subcommand};
use price_sweep::commands::{HarvestCommand, ProbeCommand};
use price_sweep::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "price-sweep",
    version,
    about = "Exhaustive catalog harvester for capped paginated search endpoints",
    long_about = "Collects every listing in a price range from endpoints that cap page sizes and offer no cursor, by recursively splitting the range until each sub-query fits in one page."
)]
struct Cli {
    /// Catalog search endpoint base URL
    #[arg(short, long, global = true, env = "SWEEP_ENDPOINT")]
    endpoint: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SWEEP_PROXY")]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true, env = "SWEEP_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest every listing in a price range
    #[command(alias = "h")]
    Harvest {
        /// Search query
        query: String,

        /// Inclusive lower price bound
        #[arg(long)]
        low: Option<f64>,

        /// Inclusive upper price bound
        #[arg(long)]
        high: Option<f64>,

        /// Smallest increment between two distinct price bounds
        #[arg(long)]
        step: Option<f64>,

        /// Give up on a range still truncated after this many splits
        #[arg(long)]
        max_depth: Option<u32>,
    },

    /// Fetch a single bounded page and report its truncation verdict
    #[command(alias = "p")]
    Probe {
        /// Search query
        query: String,

        /// Inclusive lower price bound
        #[arg(long, default_value = "0")]
        low: f64,

        /// Inclusive upper price bound
        #[arg(long, default_value = "100000")]
        high: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = Some(endpoint);
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Harvest { query, low, high, step, max_depth } => {
            // Apply harvest-specific config
            if let Some(low) = low {
                config.sweep.low_bound = low;
            }
            if let Some(high) = high {
                config.sweep.high_bound = high;
            }
            if let Some(step) = step {
                config.sweep.step = step;
            }
            if let Some(depth) = max_depth {
                config.sweep.max_depth = Some(depth);
            }

            let cmd = HarvestCommand::new(config);
            let output = cmd.execute(&query).await?;
            println!("{}", output);
        }

        Commands::Probe { query, low, high } => {
            let cmd = ProbeCommand::new(config);
            let output = cmd.execute(&query, low, high).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
