//! Blog-Harvest main entry point
//!
//! This is the command-line interface for the Blog-Harvest crawler.

use blog_harvest::config::{load_config_with_hash, validate, Config};
use blog_harvest::crawler::crawl;
use blog_harvest::output::print_statistics;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Blog-Harvest: a blog post crawler
///
/// Walks the blog's listing pages, follows every post link, and writes the
/// heading, author and date of each post to a JSON file.
#[derive(Parser, Debug)]
#[command(name = "blog-harvest")]
#[command(version)]
#[command(about = "A blog post crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write records here instead of the configured output path
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(output) = cli.output {
        config.output.json_path = output;
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(config, cli.quiet).await?;
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
            0 => EnvFilter::new("blog_harvest=info,warn"),
            1 => EnvFilter::new("blog_harvest=debug,info"),
            2 => EnvFilter::new("blog_harvest=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = validate(config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    println!("=== Blog-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!(
        "  Retries: {} ({}ms apart)",
        config.crawler.max_retries, config.crawler.retry_delay
    );
    println!("  Dedupe requests: {}", config.crawler.dedupe_requests);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nListing Pages ({}):", config.site.pagination.len() + 1);
    println!("  - {} (start)", config.site.start_url);
    for page in &config.site.pagination {
        println!("  - {}", page);
    }

    println!("\nOutput:");
    println!("  JSON: {}", config.output.json_path);

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Crawling {} plus {} listing pages",
        config.site.start_url,
        config.site.pagination.len()
    );

    match crawl(config).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            if !quiet {
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
