//! Catalog Harvester main entry point
//!
//! This is the command-line interface for the catalog harvester.

use anyhow::Context;
use catalog_harvester::config::{load_config_with_hash, validate, Config, Credentials};
use catalog_harvester::harvest::run_harvest;
use catalog_harvester::output::{collect_statistics, print_statistics};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog Harvester: pages through a GraphQL product catalog
///
/// Fetches every product of every category, writes each one to
/// `<output-dir>/<category>/<slug>.json`, and reports how many distinct
/// products were seen across overlapping categories.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvester")]
#[command(version = "1.0.0")]
#[command(about = "Harvests a paginated GraphQL product catalog", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of records requested per page
    #[arg(long)]
    page_size: Option<u32>,

    /// Directory the record tree is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Session CSRF token
    #[arg(long, required_unless_present = "stats")]
    csrf_token: Option<String>,

    /// Session cookie header
    #[arg(long, required_unless_present = "stats")]
    cookie: Option<String>,

    /// Number of categories to skip before harvesting
    #[arg(long)]
    offset: Option<usize>,

    /// Stop each category after this many pages
    #[arg(long)]
    max_pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print statistics for the output directory and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_settings(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    if cli.stats {
        handle_stats(&config)
    } else {
        handle_harvest(&config, &cli).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvester=info,warn"),
            1 => EnvFilter::new("catalog_harvester=debug,info"),
            2 => EnvFilter::new("catalog_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if given, then applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("reading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(page_size) = cli.page_size {
        config.harvest.page_size = page_size;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.harvest.output_dir = output_dir.clone();
    }
    if let Some(offset) = cli.offset {
        config.harvest.offset = offset;
    }
    if let Some(max_pages) = cli.max_pages {
        config.harvest.max_pages_per_grouping = Some(max_pages);
    }

    validate(&config).context("invalid settings")?;
    Ok(config)
}

/// Handles the --stats mode: counts records in the output directory
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let root = &config.harvest.output_dir;
    let stats = collect_statistics(root)
        .with_context(|| format!("collecting statistics under {}", root.display()))?;
    print_statistics(&stats)?;
    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let (Some(csrf_token), Some(cookie)) = (&cli.csrf_token, &cli.cookie) else {
        anyhow::bail!("--csrf-token and --cookie are required to harvest");
    };
    let credentials = Credentials::new(csrf_token.as_str(), cookie.as_str());

    match run_harvest(config, &credentials).await {
        Ok(summary) => {
            tracing::info!(
                "Harvest completed: {} groupings, {} pages, {} records written, {} unique",
                summary.groupings,
                summary.pages,
                summary.records_persisted,
                summary.unique_records
            );
            if summary.slug_collisions > 0 {
                tracing::warn!("{} slug collisions overwrote earlier records", summary.slug_collisions);
            }
            if summary.page_limited > 0 {
                tracing::warn!("{} groupings stopped at the page limit", summary.page_limited);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
