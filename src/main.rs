//! Product-Scraper main entry point
//!
//! This is the command-line interface for the paginated product listing
//! scraper.

use clap::Parser;
use product_scraper::config::{load_config_with_hash, override_start_url, Config};
use product_scraper::crawler::run_scrape;
use product_scraper::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Product-Scraper: a paginated product listing scraper
///
/// Product-Scraper walks a retail site's product listing page by page,
/// visits every product it finds, and writes one record per product to a
/// CSV or JSON dataset.
#[derive(Parser, Debug)]
#[command(name = "product-scraper")]
#[command(version)]
#[command(about = "A paginated product listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Listing URL to start from, overriding the configured one
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Validate config and show what would be scraped without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(start_url) = &cli.start_url {
        if let Err(e) = override_start_url(&mut config, start_url) {
            tracing::error!("Invalid --start-url: {}", e);
            return Err(e.into());
        }
        tracing::info!("Start URL overridden: {}", config.scraper.start_url);
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_scrape(config, config_hash, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("product_scraper=info,warn"),
            1 => EnvFilter::new("product_scraper=debug,info"),
            2 => EnvFilter::new("product_scraper=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Product-Scraper Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Start URL: {}", config.scraper.start_url);
    match &config.scraper.base_url {
        Some(base_url) => println!("  Base URL: {}", base_url),
        None => println!("  Base URL: (origin of start URL)"),
    }
    match config.scraper.max_pages {
        Some(max_pages) => println!("  Max listing pages: {}", max_pages),
        None => println!("  Max listing pages: unlimited"),
    }
    println!(
        "  Progress every: {} products",
        config.scraper.progress_interval
    );

    println!("\nRetry:");
    println!("  Max attempts: {}", config.retry.max_attempts);
    println!("  Delay between attempts: {}s", config.retry.delay_secs);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Dataset: {} ({})", config.output.dataset_path, config.output.format);
    if let Some(summary_path) = &config.output.summary_path {
        println!("  Summary: {}", summary_path);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape operation
async fn handle_scrape(
    config: Config,
    config_hash: String,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Retry policy: {} attempts, {}s apart",
        config.retry.max_attempts,
        config.retry.delay_secs
    );

    match run_scrape(config, Some(config_hash)).await {
        Ok(stats) => {
            tracing::info!("Scrape completed successfully");
            if !quiet {
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
